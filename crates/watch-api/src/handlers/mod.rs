pub mod allocations;
pub mod chains;
pub mod columns;

pub use allocations::{aggregate_snapshot, get_allocations, get_allocations_summary};
pub use chains::list_chains;
pub use columns::get_table_columns;
