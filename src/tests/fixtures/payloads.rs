// Builders for import payloads. The defaults come from the JSON fixtures under tests/fixtures/tracker.

use crate::modules::tracker::adapters::outbound::metadata_catalog::MetadataCatalog;
use crate::modules::tracker::core::payload::{DataValuePayload, EventPayload, TrackerObjects};
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/tracker")
        .join(name)
}

pub fn from_json(name: &str) -> TrackerObjects {
    let json_str = fs::read_to_string(fixture_path(name)).unwrap();
    serde_json::from_str(&json_str).unwrap()
}

pub fn simple_metadata() -> MetadataCatalog {
    let json_str = fs::read_to_string(fixture_path("simple_metadata.json")).unwrap();
    serde_json::from_str(&json_str).unwrap()
}

pub struct EventPayloadBuilder {
    inner: EventPayload,
}

impl Default for EventPayloadBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl EventPayloadBuilder {
    pub fn new() -> Self {
        let json_str = fs::read_to_string(fixture_path("event_with_data_value.json")).unwrap();
        Self {
            inner: serde_json::from_str(&json_str).unwrap(),
        }
    }

    pub fn event(mut self, v: impl Into<String>) -> Self {
        self.inner.event = v.into();
        self
    }

    pub fn without_data_values(mut self) -> Self {
        self.inner.data_values.clear();
        self
    }

    /// Sets the value for `data_element`, adding the data value if the payload does not carry it yet.
    pub fn value(mut self, data_element: &str, value: Option<&str>) -> Self {
        match self
            .inner
            .data_values
            .iter_mut()
            .find(|dv| dv.data_element == data_element)
        {
            Some(dv) => dv.value = value.map(String::from),
            None => self.inner.data_values.push(DataValuePayload {
                data_element: data_element.to_string(),
                value: value.map(String::from),
                provided_elsewhere: false,
                stored_by: None,
            }),
        }
        self
    }

    pub fn push(mut self, data_value: DataValuePayload) -> Self {
        self.inner.data_values.push(data_value);
        self
    }

    pub fn build(self) -> EventPayload {
        self.inner
    }
}
