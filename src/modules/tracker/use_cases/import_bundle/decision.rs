use crate::modules::tracker::core::change_log::ChangeLogType;
use crate::modules::tracker::core::data_value::DataValue;
use crate::modules::tracker::core::import_strategy::ImportStrategy;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("import strategy {strategy} does not permit {attempted}")]
pub struct StrategyViolation {
    pub strategy: ImportStrategy,
    pub attempted: ChangeLogType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationOutcome {
    NoOp,
    Create { value: DataValue },
    Update { previous: DataValue, value: DataValue },
    Delete { previous: DataValue },
}

impl ReconciliationOutcome {
    pub fn change_type(&self) -> Option<ChangeLogType> {
        match self {
            ReconciliationOutcome::NoOp => None,
            ReconciliationOutcome::Create { .. } => Some(ChangeLogType::Create),
            ReconciliationOutcome::Update { .. } => Some(ChangeLogType::Update),
            ReconciliationOutcome::Delete { .. } => Some(ChangeLogType::Delete),
        }
    }

    /// The value the change log records: the new value, or for deletes the one removed.
    pub fn logged_value(&self) -> Option<&DataValue> {
        match self {
            ReconciliationOutcome::NoOp => None,
            ReconciliationOutcome::Create { value } | ReconciliationOutcome::Update { value, .. } => {
                Some(value)
            }
            ReconciliationOutcome::Delete { previous } => Some(previous),
        }
    }
}
