//! In-process stores used by tests and as a scratch backend.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use lifedash_domain::Table;

use crate::{
    feed::ChangeFeed,
    objects::{public_url, ObjectStore, DEFAULT_BUCKET},
    storage::{decode_rows, insert_row, remove_row, replace_row, Record, RecordStore},
    CoreError,
};

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    tables: Mutex<BTreeMap<Table, Vec<Value>>>,
    feed: Option<Arc<ChangeFeed>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(feed: Arc<ChangeFeed>) -> Self {
        Self {
            tables: Mutex::default(),
            feed: Some(feed),
        }
    }

    fn tables(&self) -> Result<MutexGuard<'_, BTreeMap<Table, Vec<Value>>>, CoreError> {
        self.tables
            .lock()
            .map_err(|_| CoreError::Storage("record store lock poisoned".into()))
    }

    fn publish(&self, table: Table) {
        if let Some(feed) = &self.feed {
            feed.notify(table);
        }
    }
}

impl RecordStore for MemoryRecordStore {
    fn list<R: Record>(&self) -> Result<Vec<R>, CoreError> {
        let tables = self.tables()?;
        match tables.get(&R::TABLE) {
            Some(rows) => decode_rows(rows),
            None => Ok(Vec::new()),
        }
    }

    fn insert<R: Record>(&self, record: R) -> Result<R, CoreError> {
        insert_row(self.tables()?.entry(R::TABLE).or_default(), &record)?;
        debug!(table = %R::TABLE, id = %record.id(), "inserted record");
        self.publish(R::TABLE);
        Ok(record)
    }

    fn update<R: Record>(&self, record: R) -> Result<R, CoreError> {
        replace_row(self.tables()?.entry(R::TABLE).or_default(), &record)?;
        debug!(table = %R::TABLE, id = %record.id(), "updated record");
        self.publish(R::TABLE);
        Ok(record)
    }

    fn delete<R: Record>(&self, id: Uuid) -> Result<(), CoreError> {
        remove_row(R::TABLE, self.tables()?.entry(R::TABLE).or_default(), id)?;
        debug!(table = %R::TABLE, %id, "deleted record");
        self.publish(R::TABLE);
        Ok(())
    }

    fn changes(&self) -> Option<Arc<ChangeFeed>> {
        self.feed.clone()
    }
}

#[derive(Debug)]
pub struct MemoryObjectStore {
    bucket: String,
    base_url: String,
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl Default for MemoryObjectStore {
    fn default() -> Self {
        Self::new(DEFAULT_BUCKET, "memory://objects")
    }
}

impl MemoryObjectStore {
    pub fn new(bucket: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            base_url: base_url.into(),
            objects: Mutex::default(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.objects
            .lock()
            .map(|objects| objects.contains_key(key))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|objects| objects.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn objects(&self) -> Result<MutexGuard<'_, BTreeMap<String, Vec<u8>>>, CoreError> {
        self.objects
            .lock()
            .map_err(|_| CoreError::ObjectStore("object store lock poisoned".into()))
    }
}

impl ObjectStore for MemoryObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<String, CoreError> {
        self.objects()?.insert(key.to_string(), bytes.to_vec());
        Ok(public_url(&self.base_url, &self.bucket, key))
    }

    fn delete(&self, key: &str) -> Result<(), CoreError> {
        match self.objects()?.remove(key) {
            Some(_) => Ok(()),
            None => Err(CoreError::ObjectStore(format!("object `{key}` not found"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use lifedash_domain::{Priority, Todo};

    use super::*;

    #[test]
    fn mutations_publish_on_the_feed() {
        let feed = Arc::new(ChangeFeed::new());
        let subscription = feed.subscribe(Table::Todos);
        let store = MemoryRecordStore::with_feed(feed.clone());

        let todo = store
            .insert(Todo::new("Water plants", Priority::Low, Utc::now()))
            .unwrap();
        assert!(subscription.take_pending());

        store.delete::<Todo>(todo.id).unwrap();
        assert!(subscription.take_pending());
        assert!(store.list::<Todo>().unwrap().is_empty());
    }

    #[test]
    fn object_round_trip_through_public_url() {
        let objects = MemoryObjectStore::default();
        let url = objects.put("1-abc.png", b"png").unwrap();
        assert_eq!(url, "memory://objects/dashboard-images/1-abc.png");
        assert!(objects.contains("1-abc.png"));
        objects.delete("1-abc.png").unwrap();
        assert!(objects.delete("1-abc.png").is_err());
    }
}
