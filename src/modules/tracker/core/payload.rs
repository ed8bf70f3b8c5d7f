// Import objects handed to the core by the upstream parser.
//
// Responsibilities
// - Mirror the tracker JSON shape closely enough to be deserialized directly.
// - Resolve a payload value into an IncomingValue for a given importing user and time.

use crate::modules::tracker::core::data_value::IncomingValue;
use crate::shared::core::primitives::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub event: String,
    #[serde(default)]
    pub data_values: Vec<DataValuePayload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValuePayload {
    pub data_element: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub provided_elsewhere: bool,
    #[serde(default)]
    pub stored_by: Option<String>,
}

/// Tracker JSON bundle: `{ "events": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerObjects {
    #[serde(default)]
    pub events: Vec<EventPayload>,
}

impl DataValuePayload {
    /// The payload's `storedBy` wins when present and non-blank, otherwise the importing user.
    pub fn resolve(&self, event: &str, importing_user: &str, timestamp: Timestamp) -> IncomingValue {
        let stored_by = self
            .stored_by
            .as_deref()
            .map(str::trim)
            .filter(|actor| !actor.is_empty())
            .unwrap_or(importing_user);
        IncomingValue {
            event: event.to_string(),
            data_element: self.data_element.clone(),
            value: self.value.clone(),
            provided_elsewhere: self.provided_elsewhere,
            stored_by: stored_by.to_string(),
            timestamp,
        }
    }
}
