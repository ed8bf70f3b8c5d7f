// In memory implementation of the ValueStore port.
//
// Purpose
// - Support importer tests and the local binary without a database.
//
// Responsibilities
// - Keep one data value per (event, data element).
// - Simulate an unreachable backend, immediately or after a number of writes.

use crate::modules::tracker::adapters::outbound::value_store::{ValueStore, ValueStoreError};
use crate::modules::tracker::core::data_value::{DataValue, DataValueKey};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

pub struct InMemoryValueStore {
    values: RwLock<BTreeMap<DataValueKey, DataValue>>,
    is_offline: AtomicBool,
    writes_until_offline: AtomicI64,
    delay_ms: AtomicU64,
}

impl Default for InMemoryValueStore {
    fn default() -> Self {
        Self {
            values: RwLock::new(BTreeMap::new()),
            is_offline: AtomicBool::new(false),
            writes_until_offline: AtomicI64::new(-1),
            delay_ms: AtomicU64::new(0),
        }
    }
}

impl InMemoryValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.is_offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Accept `writes` more puts or deletes, then behave as offline.
    pub fn go_offline_after(&self, writes: i64) {
        self.writes_until_offline.store(writes, Ordering::SeqCst);
    }

    /// Delay every read, widening the window between a read and the write that follows it.
    pub fn set_delay_ms(&self, ms: u64) {
        self.delay_ms.store(ms, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.values.read().await.is_empty()
    }

    pub async fn snapshot(&self) -> Vec<DataValue> {
        self.values.read().await.values().cloned().collect()
    }

    fn ensure_online(&self) -> Result<(), ValueStoreError> {
        if self.is_offline.load(Ordering::SeqCst) {
            return Err(ValueStoreError::Unavailable("Value store offline".into()));
        }
        Ok(())
    }

    fn ensure_writable(&self) -> Result<(), ValueStoreError> {
        self.ensure_online()?;
        // negative means unlimited and is left untouched
        let claimed = self.writes_until_offline.fetch_update(
            Ordering::SeqCst,
            Ordering::SeqCst,
            |remaining| (remaining > 0).then(|| remaining - 1),
        );
        if claimed == Err(0) {
            self.is_offline.store(true, Ordering::SeqCst);
            return Err(ValueStoreError::Unavailable("Value store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ValueStore for InMemoryValueStore {
    async fn get(&self, key: &DataValueKey) -> Result<Option<DataValue>, ValueStoreError> {
        self.ensure_online()?;
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn put(&self, value: DataValue) -> Result<(), ValueStoreError> {
        self.ensure_writable()?;
        self.values.write().await.insert(value.key(), value);
        Ok(())
    }

    async fn delete(&self, key: &DataValueKey) -> Result<(), ValueStoreError> {
        self.ensure_writable()?;
        self.values.write().await.remove(key);
        Ok(())
    }
}
