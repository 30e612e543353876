pub mod allocations;
pub mod query;
pub mod response;

pub use allocations::*;
pub use query::*;
pub use response::*;
