use crate::modules::tracker::adapters::outbound::change_log_store::ChangeLogStoreError;
use crate::modules::tracker::adapters::outbound::value_store::ValueStoreError;
use crate::modules::tracker::core::references::ReferenceKind;
use crate::modules::tracker::use_cases::import_bundle::decision::StrategyViolation;
use thiserror::Error;

/// Rejects one imported object. The rest of the bundle is still imported.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error(transparent)]
    StrategyViolation(#[from] StrategyViolation),

    #[error("unknown {kind}: {uid}")]
    UnknownReference { kind: ReferenceKind, uid: String },

    #[error("data element {data_element} appears more than once in event {event}")]
    DuplicateDataValue { event: String, data_element: String },
}

/// A collaborator could not be reached. Ends the bundle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreUnavailable {
    #[error(transparent)]
    ValueStore(#[from] ValueStoreError),

    #[error(transparent)]
    ChangeLog(#[from] ChangeLogStoreError),
}
