// Pure reconciliation of one incoming data value against the stored one.
//
// Responsibilities
// - Decide whether the value is created, updated, deleted or left alone.
// - Refuse changes the import strategy does not permit.
// - Never perform input or output.

use crate::modules::tracker::core::change_log::ChangeLogType;
use crate::modules::tracker::core::data_value::{DataValue, IncomingValue};
use crate::modules::tracker::core::import_strategy::ImportStrategy;
use crate::modules::tracker::use_cases::import_bundle::decision::{
    ReconciliationOutcome, StrategyViolation,
};

pub fn classify(
    existing: Option<&DataValue>,
    incoming: &IncomingValue,
    strategy: ImportStrategy,
) -> Result<ReconciliationOutcome, StrategyViolation> {
    let removes = incoming.is_blank() || strategy.removes_values();
    let permit = |attempted: ChangeLogType| {
        if strategy.permits(attempted) {
            Ok(())
        } else {
            Err(StrategyViolation {
                strategy,
                attempted,
            })
        }
    };

    match (existing, incoming.value.as_deref()) {
        (Some(current), _) if removes => {
            permit(ChangeLogType::Delete)?;
            Ok(ReconciliationOutcome::Delete {
                previous: current.clone(),
            })
        }
        // nothing stored and nothing to remove: a blank value, or any value under DELETE
        (None, _) if removes => Ok(ReconciliationOutcome::NoOp),
        (None, Some(value)) => {
            permit(ChangeLogType::Create)?;
            Ok(ReconciliationOutcome::Create {
                value: DataValue {
                    event: incoming.event.clone(),
                    data_element: incoming.data_element.clone(),
                    value: value.to_string(),
                    provided_elsewhere: incoming.provided_elsewhere,
                    created_at: incoming.timestamp,
                    last_updated: incoming.timestamp,
                    stored_by: incoming.stored_by.clone(),
                },
            })
        }
        (None, None) => Ok(ReconciliationOutcome::NoOp),
        (Some(current), Some(value)) if current.value != value => {
            permit(ChangeLogType::Update)?;
            Ok(ReconciliationOutcome::Update {
                previous: current.clone(),
                value: DataValue {
                    value: value.to_string(),
                    provided_elsewhere: incoming.provided_elsewhere,
                    last_updated: incoming.timestamp,
                    stored_by: incoming.stored_by.clone(),
                    ..current.clone()
                },
            })
        }
        (Some(_), _) => Ok(ReconciliationOutcome::NoOp),
    }
}
