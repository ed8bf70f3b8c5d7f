use crate::shared::core::primitives::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValueKey {
    pub event: String,
    pub data_element: String,
}

impl DataValueKey {
    pub fn new(event: impl Into<String>, data_element: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            data_element: data_element.into(),
        }
    }
}

/// Current value of one data element recorded against one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValue {
    pub event: String,
    pub data_element: String,
    pub value: String,
    pub provided_elsewhere: bool,
    pub created_at: Timestamp,
    pub last_updated: Timestamp,
    pub stored_by: String,
}

impl DataValue {
    pub fn key(&self) -> DataValueKey {
        DataValueKey::new(self.event.clone(), self.data_element.clone())
    }
}

/// A data value as it arrives in an import, already resolved to an actor and an import time.
/// A `None` or blank `value` asks for the stored value to be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingValue {
    pub event: String,
    pub data_element: String,
    pub value: Option<String>,
    pub provided_elsewhere: bool,
    pub stored_by: String,
    pub timestamp: Timestamp,
}

impl IncomingValue {
    pub fn is_blank(&self) -> bool {
        self.value.as_deref().is_none_or(|v| v.trim().is_empty())
    }

    pub fn key(&self) -> DataValueKey {
        DataValueKey::new(self.event.clone(), self.data_element.clone())
    }
}
