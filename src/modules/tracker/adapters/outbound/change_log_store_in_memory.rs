// In memory implementation of the ChangeLogStore port.
//
// Responsibilities
// - Keep entries in insertion order and number them.
// - Simulate an unreachable backend, immediately or after a number of appends.

use crate::modules::tracker::adapters::outbound::change_log_store::{
    ChangeLogStore, ChangeLogStoreError,
};
use crate::modules::tracker::core::change_log::{ChangeLogEntry, ChangeLogQuery};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use tokio::sync::RwLock;

pub struct InMemoryChangeLogStore {
    entries: RwLock<Vec<(u64, ChangeLogEntry)>>,
    is_offline: AtomicBool,
    appends_until_offline: AtomicI64,
}

impl Default for InMemoryChangeLogStore {
    fn default() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            is_offline: AtomicBool::new(false),
            appends_until_offline: AtomicI64::new(-1),
        }
    }
}

impl InMemoryChangeLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Accept `appends` more entries, then behave as offline.
    pub fn go_offline_after(&self, appends: i64) {
        self.appends_until_offline.store(appends, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn last_sequence(&self) -> u64 {
        self.entries.read().await.last().map_or(0, |(seq, _)| *seq)
    }

    fn ensure_online(&self) -> Result<(), ChangeLogStoreError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(ChangeLogStoreError::Unavailable(
                "Change log store offline".into(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ChangeLogStore for InMemoryChangeLogStore {
    async fn append(&self, entry: ChangeLogEntry) -> Result<u64, ChangeLogStoreError> {
        self.ensure_online()?;
        // negative means unlimited and is left untouched
        let claimed = self.appends_until_offline.fetch_update(
            Ordering::SeqCst,
            Ordering::SeqCst,
            |remaining| (remaining > 0).then(|| remaining - 1),
        );
        if claimed == Err(0) {
            self.is_offline.store(true, Ordering::SeqCst);
            return Err(ChangeLogStoreError::Unavailable(
                "Change log store offline".into(),
            ));
        }

        let mut guard = self.entries.write().await;
        let sequence = guard.last().map_or(0, |(seq, _)| *seq) + 1;
        guard.push((sequence, entry));
        Ok(sequence)
    }

    async fn query(
        &self,
        query: &ChangeLogQuery,
    ) -> Result<Vec<ChangeLogEntry>, ChangeLogStoreError> {
        self.ensure_online()?;
        let guard = self.entries.read().await;
        Ok(query.select(guard.iter().map(|(_, entry)| entry)))
    }
}
