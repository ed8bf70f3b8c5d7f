// Import report returned for every bundle.
//
// Responsibilities
// - One outcome per imported object, in input order.
// - Data value statistics for applied and rejected objects.
// - A single fatal failure, kept apart from object errors.

use crate::modules::tracker::core::data_value::DataValueKey;
use crate::modules::tracker::use_cases::import_bundle::errors::ImportError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    StrategyViolation,
    UnknownReference,
    DuplicateDataValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_element: Option<String>,
    pub message: String,
}

impl ErrorReport {
    pub fn new(error: &ImportError, data_element: Option<&str>) -> Self {
        let code = match error {
            ImportError::StrategyViolation(_) => ErrorCode::StrategyViolation,
            ImportError::UnknownReference { .. } => ErrorCode::UnknownReference,
            ImportError::DuplicateDataValue { .. } => ErrorCode::DuplicateDataValue,
        };
        Self {
            code,
            data_element: data_element.map(String::from),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectOutcome {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReport {
    pub index: usize,
    pub event: String,
    pub outcome: ObjectOutcome,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorReport>,
}

/// Counts of data values, not objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    pub created: usize,
    pub updated: usize,
    pub deleted: usize,
    pub unchanged: usize,
    pub rejected: usize,
}

impl ImportStats {
    pub fn absorb(&mut self, other: ImportStats) {
        self.created += other.created;
        self.updated += other.updated;
        self.deleted += other.deleted;
        self.unchanged += other.unchanged;
        self.rejected += other.rejected;
    }

    pub fn mutations(&self) -> usize {
        self.created + self.updated + self.deleted
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FatalFailure {
    /// Object that was being imported when the failure happened. It may be partially applied.
    pub event: String,
    pub message: String,
    pub not_attempted: usize,
    /// Mutations of `event` that reached the value store before the failure. They are counted in
    /// `ImportReport::stats`.
    pub applied: usize,
    /// Value written to the value store whose change log entry could not be appended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlogged: Option<DataValueKey>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportStatus {
    #[default]
    Ok,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub status: ImportStatus,
    pub stats: ImportStats,
    pub objects: Vec<ObjectReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fatal: Option<FatalFailure>,
}

impl ImportReport {
    pub fn push_success(&mut self, index: usize, event: &str, stats: ImportStats) {
        self.stats.absorb(stats);
        self.objects.push(ObjectReport {
            index,
            event: event.to_string(),
            outcome: ObjectOutcome::Success,
            errors: Vec::new(),
        });
    }

    pub fn push_error(&mut self, index: usize, event: &str, errors: Vec<ErrorReport>, rejected: usize) {
        self.stats.rejected += rejected;
        self.status = ImportStatus::Error;
        self.objects.push(ObjectReport {
            index,
            event: event.to_string(),
            outcome: ObjectOutcome::Error,
            errors,
        });
    }

    pub fn abort(
        &mut self,
        event: &str,
        message: String,
        not_attempted: usize,
        partial: ImportStats,
        unlogged: Option<DataValueKey>,
    ) {
        self.stats.absorb(partial);
        self.status = ImportStatus::Error;
        self.fatal = Some(FatalFailure {
            event: event.to_string(),
            message,
            not_attempted,
            applied: partial.mutations(),
            unlogged,
        });
    }

    pub fn has_errors(&self) -> bool {
        self.status == ImportStatus::Error
    }

    pub fn errors(&self) -> impl Iterator<Item = &ErrorReport> {
        self.objects.iter().flat_map(|object| object.errors.iter())
    }

    pub fn object(&self, event: &str) -> Option<&ObjectReport> {
        self.objects.iter().find(|object| object.event == event)
    }
}
