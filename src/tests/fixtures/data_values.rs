use crate::modules::tracker::core::data_value::{DataValue, IncomingValue};
use crate::tests::fixtures::USER;

pub const CREATED_AT: i64 = 1_700_000_000_000;
pub const IMPORTED_AT: i64 = 1_700_000_360_000;

/// Canonical stored value for tests.
pub fn make_data_value(event: &str, data_element: &str, value: &str) -> DataValue {
    DataValue {
        event: event.into(),
        data_element: data_element.into(),
        value: value.into(),
        provided_elsewhere: false,
        created_at: CREATED_AT,
        last_updated: CREATED_AT,
        stored_by: USER.into(),
    }
}

pub fn make_incoming_value(event: &str, data_element: &str, value: Option<&str>) -> IncomingValue {
    IncomingValue {
        event: event.into(),
        data_element: data_element.into(),
        value: value.map(String::from),
        provided_elsewhere: false,
        stored_by: USER.into(),
        timestamp: IMPORTED_AT,
    }
}
