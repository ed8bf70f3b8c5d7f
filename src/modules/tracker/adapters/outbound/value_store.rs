use crate::modules::tracker::core::data_value::{DataValue, DataValueKey};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueStoreError {
    #[error("value store unavailable: {0}")]
    Unavailable(String),
}

/// Current data value per (event, data element). `put` overwrites, `delete` of an absent key is a no-op.
#[async_trait]
pub trait ValueStore: Send + Sync {
    async fn get(&self, key: &DataValueKey) -> Result<Option<DataValue>, ValueStoreError>;
    async fn put(&self, value: DataValue) -> Result<(), ValueStoreError>;
    async fn delete(&self, key: &DataValueKey) -> Result<(), ValueStoreError>;
}
