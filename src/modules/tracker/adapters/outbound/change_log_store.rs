use crate::modules::tracker::core::change_log::{ChangeLogEntry, ChangeLogQuery};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChangeLogStoreError {
    #[error("change log store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only data value change log.
#[async_trait]
pub trait ChangeLogStore: Send + Sync {
    /// Appends the entry and returns its sequence number. Sequence numbers start at 1 and only grow.
    async fn append(&self, entry: ChangeLogEntry) -> Result<u64, ChangeLogStoreError>;

    /// Matching entries, oldest first.
    async fn query(&self, query: &ChangeLogQuery) -> Result<Vec<ChangeLogEntry>, ChangeLogStoreError>;
}
