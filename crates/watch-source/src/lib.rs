//! Sources of upstream vault snapshots and the task that keeps the latest one published.

pub mod clients;
pub mod config;
pub mod error;
pub mod service;
pub mod task;
pub mod traits;

pub use clients::{FileSource, HttpSource, SnapshotLocation, build_source};
pub use config::SourceConfig;
pub use error::SourceError;
pub use service::SnapshotService;
pub use task::SourceTask;
pub use traits::VaultSource;
