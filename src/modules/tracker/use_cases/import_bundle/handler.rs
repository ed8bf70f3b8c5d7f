use crate::modules::tracker::adapters::outbound::change_log_store::ChangeLogStore;
use crate::modules::tracker::adapters::outbound::value_store::ValueStore;
use crate::modules::tracker::core::change_log::{ChangeLogEntry, ChangeLogType};
use crate::modules::tracker::core::data_value::DataValueKey;
use crate::modules::tracker::core::payload::EventPayload;
use crate::modules::tracker::core::references::{ReferenceKind, ReferenceResolver};
use crate::modules::tracker::use_cases::import_bundle::classify::classify;
use crate::modules::tracker::use_cases::import_bundle::command::ImportParams;
use crate::modules::tracker::use_cases::import_bundle::decision::ReconciliationOutcome;
use crate::modules::tracker::use_cases::import_bundle::errors::{ImportError, StoreUnavailable};
use crate::modules::tracker::use_cases::import_bundle::report::{
    ErrorReport, ImportReport, ImportStats,
};
use crate::shared::core::keyed_locks::KeyedLocks;
use crate::shared::core::primitives::{Clock, IdGenerator, SystemClock, UuidV7Generator};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

enum EventImport {
    Applied(ImportStats),
    Rejected(Vec<ErrorReport>),
}

// What an event had already done to the stores when one of them became unreachable.
struct EventAborted {
    stats: ImportStats,
    unlogged: Option<DataValueKey>,
    error: StoreUnavailable,
}

impl From<StoreUnavailable> for EventAborted {
    fn from(error: StoreUnavailable) -> Self {
        Self {
            stats: ImportStats::default(),
            unlogged: None,
            error,
        }
    }
}

enum ApplyError {
    // the value store refused the mutation
    Unwritten(StoreUnavailable),
    // the value store took the mutation, the change log did not
    Unlogged(DataValueKey, StoreUnavailable),
}

pub struct BundleImporter<TValueStore, TChangeLog, TReferences>
where
    TValueStore: ValueStore + 'static,
    TChangeLog: ChangeLogStore + 'static,
    TReferences: ReferenceResolver + 'static,
{
    value_store: Arc<TValueStore>,
    change_log: Arc<TChangeLog>,
    references: Arc<TReferences>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    locks: KeyedLocks<String>,
}

impl<TValueStore, TChangeLog, TReferences> BundleImporter<TValueStore, TChangeLog, TReferences>
where
    TValueStore: ValueStore + 'static,
    TChangeLog: ChangeLogStore + 'static,
    TReferences: ReferenceResolver + 'static,
{
    pub fn new(
        value_store: Arc<TValueStore>,
        change_log: Arc<TChangeLog>,
        references: Arc<TReferences>,
    ) -> Self {
        Self {
            value_store,
            change_log,
            references,
            clock: Arc::new(SystemClock),
            ids: Arc::new(UuidV7Generator),
            locks: KeyedLocks::new(),
        }
    }

    pub fn with_sources(mut self, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        self.clock = clock;
        self.ids = ids;
        self
    }

    /// Import `objects` in order. Object errors are reported per object and do not stop the bundle;
    /// an unreachable store stops it and is reported once in `ImportReport::fatal`.
    pub async fn import_bundle(&self, params: &ImportParams, objects: Vec<EventPayload>) -> ImportReport {
        let total = objects.len();
        info!(strategy = %params.strategy, user = %params.user, objects = total, "importing bundle");

        let mut report = ImportReport::default();
        for (index, payload) in objects.into_iter().enumerate() {
            match self.import_event(params, &payload).await {
                Ok(EventImport::Applied(stats)) => {
                    report.push_success(index, &payload.event, stats);
                }
                Ok(EventImport::Rejected(errors)) => {
                    warn!(event = %payload.event, errors = errors.len(), "event rejected");
                    report.push_error(index, &payload.event, errors, payload.data_values.len());
                }
                Err(aborted) => {
                    let not_attempted = total - index - 1;
                    error!(
                        event = %payload.event,
                        applied = aborted.stats.mutations(),
                        unlogged = ?aborted.unlogged,
                        not_attempted,
                        error = %aborted.error,
                        "bundle import aborted"
                    );
                    report.abort(
                        &payload.event,
                        aborted.error.to_string(),
                        not_attempted,
                        aborted.stats,
                        aborted.unlogged,
                    );
                    break;
                }
            }
        }

        info!(
            status = ?report.status,
            created = report.stats.created,
            updated = report.stats.updated,
            deleted = report.stats.deleted,
            "bundle imported"
        );
        report
    }

    // Read, classify, write and append for one event run under the event's lock.
    // Every value is classified before anything is written, so a rejected event leaves no trace.
    async fn import_event(
        &self,
        params: &ImportParams,
        payload: &EventPayload,
    ) -> Result<EventImport, EventAborted> {
        let _guard = self.locks.lock(payload.event.clone()).await;

        if !self.references.resolves(ReferenceKind::Event, &payload.event) {
            let error = ImportError::UnknownReference {
                kind: ReferenceKind::Event,
                uid: payload.event.clone(),
            };
            return Ok(EventImport::Rejected(vec![ErrorReport::new(&error, None)]));
        }

        let now = self.clock.now();
        let mut errors = Vec::new();
        let mut planned = Vec::with_capacity(payload.data_values.len());
        let mut seen = HashSet::new();

        for data_value in &payload.data_values {
            let data_element = data_value.data_element.as_str();
            if !self.references.resolves(ReferenceKind::DataElement, data_element) {
                let error = ImportError::UnknownReference {
                    kind: ReferenceKind::DataElement,
                    uid: data_element.to_string(),
                };
                errors.push(ErrorReport::new(&error, Some(data_element)));
                continue;
            }
            if !seen.insert(data_element) {
                let error = ImportError::DuplicateDataValue {
                    event: payload.event.clone(),
                    data_element: data_element.to_string(),
                };
                errors.push(ErrorReport::new(&error, Some(data_element)));
                continue;
            }

            let incoming = data_value.resolve(&payload.event, &params.user, now);
            let existing = self
                .value_store
                .get(&incoming.key())
                .await
                .map_err(StoreUnavailable::from)?;
            match classify(existing.as_ref(), &incoming, params.strategy) {
                Ok(outcome) => planned.push(outcome),
                Err(violation) => {
                    errors.push(ErrorReport::new(&violation.into(), Some(data_element)));
                }
            }
        }

        if !errors.is_empty() {
            return Ok(EventImport::Rejected(errors));
        }

        let mut stats = ImportStats::default();
        for outcome in planned {
            if let Err(failure) = self.apply(params, outcome, &mut stats).await {
                let (unlogged, error) = match failure {
                    ApplyError::Unwritten(error) => (None, error),
                    ApplyError::Unlogged(key, error) => (Some(key), error),
                };
                return Err(EventAborted {
                    stats,
                    unlogged,
                    error,
                });
            }
        }
        Ok(EventImport::Applied(stats))
    }

    async fn apply(
        &self,
        params: &ImportParams,
        outcome: ReconciliationOutcome,
        stats: &mut ImportStats,
    ) -> Result<(), ApplyError> {
        let unwritten = |e| ApplyError::Unwritten(StoreUnavailable::ValueStore(e));
        let (change_type, logged) = match outcome {
            ReconciliationOutcome::NoOp => {
                stats.unchanged += 1;
                return Ok(());
            }
            ReconciliationOutcome::Create { value } => {
                self.value_store.put(value.clone()).await.map_err(unwritten)?;
                stats.created += 1;
                (ChangeLogType::Create, value)
            }
            ReconciliationOutcome::Update { value, .. } => {
                self.value_store.put(value.clone()).await.map_err(unwritten)?;
                stats.updated += 1;
                (ChangeLogType::Update, value)
            }
            ReconciliationOutcome::Delete { previous } => {
                self.value_store
                    .delete(&previous.key())
                    .await
                    .map_err(unwritten)?;
                stats.deleted += 1;
                (ChangeLogType::Delete, previous)
            }
        };

        let entry = ChangeLogEntry::record(
            self.ids.as_ref(),
            self.clock.as_ref(),
            change_type,
            &logged,
            &params.user,
        );
        let sequence = self
            .change_log
            .append(entry)
            .await
            .map_err(|e| ApplyError::Unlogged(logged.key(), e.into()))?;
        debug!(
            event = %logged.event,
            data_element = %logged.data_element,
            change = %change_type,
            sequence,
            "data value change logged"
        );
        Ok(())
    }
}
