// In memory reference resolver.
//
// Purpose
// - Stand in for the metadata preheat so imports can be run without a database.

use crate::modules::tracker::core::references::{ReferenceKind, ReferenceResolver};
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataCatalog {
    #[serde(default)]
    events: HashSet<String>,
    #[serde(default)]
    data_elements: HashSet<String>,
}

impl MetadataCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events.extend(events.into_iter().map(Into::into));
        self
    }

    pub fn with_data_elements<I, S>(mut self, data_elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.data_elements
            .extend(data_elements.into_iter().map(Into::into));
        self
    }
}

impl ReferenceResolver for MetadataCatalog {
    fn resolves(&self, kind: ReferenceKind, uid: &str) -> bool {
        match kind {
            ReferenceKind::Event => self.events.contains(uid),
            ReferenceKind::DataElement => self.data_elements.contains(uid),
        }
    }
}
