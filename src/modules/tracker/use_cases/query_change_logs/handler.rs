// Read path into the data value change log.
//
// Responsibilities
// - Expose querying without exposing append.

use crate::modules::tracker::adapters::outbound::change_log_store::{
    ChangeLogStore, ChangeLogStoreError,
};
use crate::modules::tracker::core::change_log::{ChangeLogEntry, ChangeLogQuery};
use std::sync::Arc;
use tracing::debug;

pub struct ChangeLogQueryHandler<TChangeLog>
where
    TChangeLog: ChangeLogStore + 'static,
{
    change_log: Arc<TChangeLog>,
}

impl<TChangeLog> ChangeLogQueryHandler<TChangeLog>
where
    TChangeLog: ChangeLogStore + 'static,
{
    pub fn new(change_log: Arc<TChangeLog>) -> Self {
        Self { change_log }
    }

    pub async fn handle(&self, query: &ChangeLogQuery) -> Result<Vec<ChangeLogEntry>, ChangeLogStoreError> {
        let entries = self.change_log.query(query).await?;
        debug!(
            events = query.events.len(),
            data_elements = query.data_elements.len(),
            change_types = query.change_types.len(),
            found = entries.len(),
            "change log queried"
        );
        Ok(entries)
    }
}
