use crate::modules::tracker::adapters::outbound::change_log_store_in_memory::InMemoryChangeLogStore;
use crate::modules::tracker::adapters::outbound::metadata_catalog::MetadataCatalog;
use crate::modules::tracker::adapters::outbound::value_store_in_memory::InMemoryValueStore;
use crate::modules::tracker::use_cases::import_bundle::command::ImportParams;
use crate::modules::tracker::use_cases::import_bundle::handler::BundleImporter;
use crate::modules::tracker::use_cases::query_change_logs::handler::ChangeLogQueryHandler;
use crate::shell::config::AppConfig;
use std::sync::Arc;

pub type InMemoryImporter = BundleImporter<InMemoryValueStore, InMemoryChangeLogStore, MetadataCatalog>;

#[derive(Clone)]
pub struct AppState {
    pub params: ImportParams,
    pub importer: Arc<InMemoryImporter>,
    pub change_logs: Arc<ChangeLogQueryHandler<InMemoryChangeLogStore>>,
    pub value_store: Arc<InMemoryValueStore>,
}

impl AppState {
    pub fn in_memory(config: &AppConfig, catalog: MetadataCatalog) -> Self {
        let value_store = Arc::new(InMemoryValueStore::new());
        let change_log = Arc::new(InMemoryChangeLogStore::new());
        let importer = BundleImporter::new(value_store.clone(), change_log.clone(), Arc::new(catalog));
        Self {
            params: ImportParams::new(config.strategy, config.user.clone()),
            importer: Arc::new(importer),
            change_logs: Arc::new(ChangeLogQueryHandler::new(change_log)),
            value_store,
        }
    }
}
