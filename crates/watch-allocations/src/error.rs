#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
    #[error("Unknown sort order: {0}")]
    UnknownSortOrder(String),
}
