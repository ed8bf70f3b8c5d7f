// Change log records for tracked data values.
//
// Purpose
// - Describe one immutable mutation (create, update or delete) of a data value.
// - Describe the filter used to read the log back.
//
// Boundaries
// - Entries are built here but stored by a ChangeLogStore adapter.

use crate::modules::tracker::core::data_value::DataValue;
use crate::shared::core::primitives::{Clock, IdGenerator, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeLogType {
    Create,
    Update,
    Delete,
}

impl fmt::Display for ChangeLogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeLogType::Create => "CREATE",
            ChangeLogType::Update => "UPDATE",
            ChangeLogType::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeLogEntry {
    pub uid: String,
    pub event: String,
    pub data_element: String,
    pub value: String,
    pub provided_elsewhere: bool,
    pub change_type: ChangeLogType,
    pub created_at: Timestamp,
    pub modified_by: String,
}

impl ChangeLogEntry {
    /// Snapshot `value` as a `change_type` entry. For deletes `value` is the value that was removed.
    pub fn record(
        ids: &dyn IdGenerator,
        clock: &dyn Clock,
        change_type: ChangeLogType,
        value: &DataValue,
        modified_by: &str,
    ) -> Self {
        Self {
            uid: ids.next_id(),
            event: value.event.clone(),
            data_element: value.data_element.clone(),
            value: value.value.clone(),
            provided_elsewhere: value.provided_elsewhere,
            change_type,
            created_at: clock.now(),
            modified_by: modified_by.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub offset: usize,
    pub limit: usize,
}

/// Conjunctive filter over the change log. An empty dimension matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeLogQuery {
    pub data_elements: Vec<String>,
    pub events: Vec<String>,
    pub change_types: Vec<ChangeLogType>,
    pub paging: Option<Paging>,
}

impl ChangeLogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_elements<I, S>(mut self, data_elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_elements = data_elements.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_change_types(mut self, change_types: impl IntoIterator<Item = ChangeLogType>) -> Self {
        self.change_types = change_types.into_iter().collect();
        self
    }

    pub fn with_paging(mut self, offset: usize, limit: usize) -> Self {
        self.paging = Some(Paging { offset, limit });
        self
    }

    pub fn matches(&self, entry: &ChangeLogEntry) -> bool {
        (self.data_elements.is_empty() || self.data_elements.contains(&entry.data_element))
            && (self.events.is_empty() || self.events.contains(&entry.event))
            && (self.change_types.is_empty() || self.change_types.contains(&entry.change_type))
    }

    /// Keep matching entries in their original order, then apply paging.
    pub fn select<'a, I>(&self, entries: I) -> Vec<ChangeLogEntry>
    where
        I: IntoIterator<Item = &'a ChangeLogEntry>,
    {
        let matching = entries.into_iter().filter(|entry| self.matches(entry));
        match self.paging {
            Some(Paging { offset, limit }) => matching.skip(offset).take(limit).cloned().collect(),
            None => matching.cloned().collect(),
        }
    }
}
