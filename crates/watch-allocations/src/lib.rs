pub mod aggregate;
pub mod error;
pub mod normalize;
pub mod selector;
pub mod service;
pub mod summary;
pub mod table;
pub mod task;

pub use aggregate::aggregate;
pub use error::AllocationError;
pub use normalize::{percentage_of, to_normalized_value, usd_value};
pub use selector::{ChainOption, ChainSelector};
pub use service::AllocationsService;
pub use summary::{ChainSummary, ProtocolSummary, ProtocolsByChain};
pub use table::{TableColumn, TableHeader, parse_sort_key, parse_sort_order};
pub use task::AggregationTask;
