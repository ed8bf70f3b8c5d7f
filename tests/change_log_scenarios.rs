use rstest::{fixture, rstest};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracker_imports::modules::tracker::adapters::outbound::change_log_store_in_memory::InMemoryChangeLogStore;
use tracker_imports::modules::tracker::adapters::outbound::metadata_catalog::MetadataCatalog;
use tracker_imports::modules::tracker::adapters::outbound::value_store::ValueStore;
use tracker_imports::modules::tracker::adapters::outbound::value_store_in_memory::InMemoryValueStore;
use tracker_imports::modules::tracker::core::change_log::{ChangeLogEntry, ChangeLogQuery, ChangeLogType};
use tracker_imports::modules::tracker::core::data_value::DataValueKey;
use tracker_imports::modules::tracker::core::import_strategy::ImportStrategy;
use tracker_imports::modules::tracker::core::payload::{EventPayload, TrackerObjects};
use tracker_imports::modules::tracker::use_cases::import_bundle::command::ImportParams;
use tracker_imports::modules::tracker::use_cases::import_bundle::handler::BundleImporter;
use tracker_imports::modules::tracker::use_cases::import_bundle::report::{ErrorCode, ObjectOutcome};
use tracker_imports::modules::tracker::use_cases::query_change_logs::handler::ChangeLogQueryHandler;

const ORIGINAL_VALUE: &str = "value1";
const UPDATED_VALUE: &str = "value1-updated";
const PSI: &str = "D9PbzJY8bJO";
const DE: &str = "DATAEL00001";

fn read_fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/tracker")
        .join(name);
    fs::read_to_string(path).expect("fixture missing")
}

fn from_json(name: &str) -> Vec<EventPayload> {
    serde_json::from_str::<TrackerObjects>(&read_fixture(name))
        .expect("fixture is not a tracker bundle")
        .events
}

struct Tracker {
    values: Arc<InMemoryValueStore>,
    importer: BundleImporter<InMemoryValueStore, InMemoryChangeLogStore, MetadataCatalog>,
    change_logs: ChangeLogQueryHandler<InMemoryChangeLogStore>,
}

#[fixture]
fn tracker() -> Tracker {
    let catalog: MetadataCatalog = serde_json::from_str(&read_fixture("simple_metadata.json")).unwrap();
    let values = Arc::new(InMemoryValueStore::new());
    let change_log = Arc::new(InMemoryChangeLogStore::new());
    Tracker {
        values: values.clone(),
        importer: BundleImporter::new(values, change_log.clone(), Arc::new(catalog)),
        change_logs: ChangeLogQueryHandler::new(change_log),
    }
}

async fn change_logs_of(tracker: &Tracker, change_type: ChangeLogType) -> Vec<ChangeLogEntry> {
    tracker
        .change_logs
        .handle(
            &ChangeLogQuery::new()
                .with_data_elements([DE])
                .with_events([PSI])
                .with_change_types([change_type]),
        )
        .await
        .unwrap()
}

fn assert_change_logs(entries: &[ChangeLogEntry], change_type: ChangeLogType, expected_value: &str) {
    assert!(!entries.is_empty(), "expected {change_type} entries");
    assert_eq!(entries[0].change_type, change_type);
    assert_eq!(entries[0].data_element, DE);
    assert_eq!(entries[0].value, expected_value);
}

#[rstest]
#[tokio::test]
async fn data_value_change_logs_are_written_for_create_update_and_delete(tracker: Tracker) {
    let params = ImportParams::new(ImportStrategy::CreateAndUpdate, "admin");
    for bundle in [
        "event_and_enrollment_with_data_values.json",
        "event_with_data_values_for_update_audit.json",
        "event_with_data_values_for_delete_audit.json",
    ] {
        let report = tracker.importer.import_bundle(&params, from_json(bundle)).await;
        assert!(!report.has_errors(), "{bundle}: {report:?}");
    }

    assert_change_logs(&change_logs_of(&tracker, ChangeLogType::Create).await, ChangeLogType::Create, ORIGINAL_VALUE);
    assert_change_logs(&change_logs_of(&tracker, ChangeLogType::Update).await, ChangeLogType::Update, UPDATED_VALUE);
    assert_change_logs(&change_logs_of(&tracker, ChangeLogType::Delete).await, ChangeLogType::Delete, UPDATED_VALUE);
    assert_eq!(tracker.values.get(&DataValueKey::new(PSI, DE)).await.unwrap(), None);
}

#[rstest]
#[tokio::test]
async fn reimporting_events_under_create_and_update_changes_nothing(tracker: Tracker) {
    let params = ImportParams::new(ImportStrategy::CreateAndUpdate, "admin");
    let bundle = from_json("event_and_enrollment_with_data_values.json");

    let first = tracker.importer.import_bundle(&params, bundle.clone()).await;
    let second = tracker.importer.import_bundle(&params, bundle).await;

    assert!(!first.has_errors());
    assert!(!second.has_errors());
    assert_eq!(second.stats.mutations(), 0);
    assert_eq!(tracker.change_logs.handle(&ChangeLogQuery::new()).await.unwrap().len(), 4);
}

#[rstest]
#[tokio::test]
async fn unknown_events_are_rejected_without_blocking_the_rest_of_the_bundle(tracker: Tracker) {
    let params = ImportParams::new(ImportStrategy::Create, "admin");
    let mut bundle = from_json("event_and_enrollment_with_data_values.json");
    bundle.insert(
        0,
        serde_json::from_value(serde_json::json!({
            "event": "UNKNOWN0001",
            "dataValues": [{ "dataElement": DE, "value": "x" }]
        }))
        .unwrap(),
    );

    let report = tracker.importer.import_bundle(&params, bundle).await;

    let outcomes: Vec<_> = report.objects.iter().map(|o| (o.event.as_str(), o.outcome)).collect();
    assert_eq!(
        outcomes,
        vec![
            ("UNKNOWN0001", ObjectOutcome::Error),
            (PSI, ObjectOutcome::Success),
            ("pTzf9KYMk72", ObjectOutcome::Success),
        ]
    );
    assert_eq!(report.objects[0].errors[0].code, ErrorCode::UnknownReference);
    assert_eq!(tracker.values.get(&DataValueKey::new("UNKNOWN0001", DE)).await.unwrap(), None);
    let unknown = tracker
        .change_logs
        .handle(&ChangeLogQuery::new().with_events(["UNKNOWN0001"]))
        .await
        .unwrap();
    assert!(unknown.is_empty());
}

#[rstest]
#[tokio::test]
async fn a_delete_bundle_removes_values_and_logs_what_was_removed(tracker: Tracker) {
    let bundle = from_json("event_and_enrollment_with_data_values.json");
    tracker
        .importer
        .import_bundle(&ImportParams::new(ImportStrategy::Create, "admin"), bundle.clone())
        .await;

    let report = tracker
        .importer
        .import_bundle(&ImportParams::new(ImportStrategy::Delete, "admin"), bundle)
        .await;

    assert!(!report.has_errors());
    assert_eq!(report.stats.deleted, 4);
    assert_change_logs(&change_logs_of(&tracker, ChangeLogType::Delete).await, ChangeLogType::Delete, ORIGINAL_VALUE);
    assert!(tracker.values.get(&DataValueKey::new(PSI, "DATAEL00003")).await.unwrap().is_none());
}

#[rstest]
#[tokio::test]
async fn reimporting_a_delete_bundle_changes_nothing(tracker: Tracker) {
    let bundle = from_json("event_and_enrollment_with_data_values.json");
    let delete = ImportParams::new(ImportStrategy::Delete, "admin");
    tracker
        .importer
        .import_bundle(&ImportParams::new(ImportStrategy::Create, "admin"), bundle.clone())
        .await;

    let first = tracker.importer.import_bundle(&delete, bundle.clone()).await;
    let entries_after_first = tracker.change_logs.handle(&ChangeLogQuery::new()).await.unwrap().len();
    let second = tracker.importer.import_bundle(&delete, bundle).await;

    assert!(!first.has_errors(), "{first:?}");
    assert_eq!(first.stats.deleted, 4);
    assert!(!second.has_errors(), "{second:?}");
    assert_eq!(second.stats.mutations(), 0);
    assert_eq!(second.stats.unchanged, 4);
    assert_eq!(
        tracker.change_logs.handle(&ChangeLogQuery::new()).await.unwrap().len(),
        entries_after_first
    );
    assert_eq!(change_logs_of(&tracker, ChangeLogType::Delete).await.len(), 1);
}
