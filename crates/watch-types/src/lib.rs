pub mod chain;
pub mod lenient;
pub mod sort;

pub use chain::{ChainData, Strategy, Vault};
pub use sort::{SortBy, SortOrder};

/// Name of the synthetic chain aggregating every network.
pub const ALL_CHAINS: &str = "All";
