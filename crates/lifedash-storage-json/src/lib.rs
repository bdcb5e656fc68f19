use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use lifedash_core::{
    objects::{public_url, ObjectStore},
    storage::{decode_rows, insert_row, remove_row, replace_row, Record, RecordStore},
    ChangeFeed, CoreError,
};
use lifedash_domain::Table;

const TABLE_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Filesystem-backed record store keeping one JSON array per table.
pub struct JsonRecordStore {
    root: PathBuf,
    feed: Option<Arc<ChangeFeed>>,
    write_lock: Mutex<()>,
}

impl JsonRecordStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            feed: None,
            write_lock: Mutex::new(()),
        })
    }

    pub fn with_feed(root: PathBuf, feed: Arc<ChangeFeed>) -> Result<Self, CoreError> {
        let mut store = Self::new(root)?;
        store.feed = Some(feed);
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn table_path(&self, table: Table) -> PathBuf {
        self.root
            .join(format!("{}.{}", table.as_str(), TABLE_EXTENSION))
    }

    fn read_rows(&self, table: Table) -> Result<Vec<Value>, CoreError> {
        let path = self.table_path(table);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&data).map_err(|err| {
            CoreError::Serde(format!("{}: {}", path.display(), err))
        })
    }

    fn write_rows(&self, table: Table, rows: &[Value]) -> Result<(), CoreError> {
        let path = self.table_path(table);
        let json = serde_json::to_string_pretty(rows)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Runs a read-modify-write cycle on one table file.
    fn mutate<F>(&self, table: Table, apply: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut Vec<Value>) -> Result<(), CoreError>,
    {
        let _guard = self.lock()?;
        let mut rows = self.read_rows(table)?;
        apply(&mut rows)?;
        self.write_rows(table, &rows)?;
        if let Some(feed) = &self.feed {
            feed.notify(table);
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, CoreError> {
        self.write_lock
            .lock()
            .map_err(|_| CoreError::Storage("table write lock poisoned".into()))
    }
}

impl RecordStore for JsonRecordStore {
    fn list<R: Record>(&self) -> Result<Vec<R>, CoreError> {
        decode_rows(&self.read_rows(R::TABLE)?)
    }

    fn insert<R: Record>(&self, record: R) -> Result<R, CoreError> {
        self.mutate(R::TABLE, |rows| insert_row(rows, &record))?;
        debug!(table = %R::TABLE, id = %record.id(), "inserted record");
        Ok(record)
    }

    fn update<R: Record>(&self, record: R) -> Result<R, CoreError> {
        self.mutate(R::TABLE, |rows| replace_row(rows, &record))?;
        debug!(table = %R::TABLE, id = %record.id(), "updated record");
        Ok(record)
    }

    fn delete<R: Record>(&self, id: Uuid) -> Result<(), CoreError> {
        self.mutate(R::TABLE, |rows| remove_row(R::TABLE, rows, id))?;
        debug!(table = %R::TABLE, %id, "deleted record");
        Ok(())
    }

    fn changes(&self) -> Option<Arc<ChangeFeed>> {
        self.feed.clone()
    }
}

/// Object store writing each object to `<root>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
    bucket: String,
    base_url: String,
}

impl FsObjectStore {
    pub fn new(
        root: PathBuf,
        bucket: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let bucket = bucket.into();
        fs::create_dir_all(root.join(&bucket))?;
        Ok(Self {
            root,
            bucket,
            base_url: base_url.into(),
        })
    }

    pub fn object_path(&self, key: &str) -> Result<PathBuf, CoreError> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(CoreError::ObjectStore(format!("invalid object key `{key}`")));
        }
        Ok(self.root.join(&self.bucket).join(key))
    }
}

impl ObjectStore for FsObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn put(&self, key: &str, bytes: &[u8]) -> Result<String, CoreError> {
        let path = self.object_path(key)?;
        let mut file = File::create(&path)?;
        file.write_all(bytes)?;
        file.flush()?;
        debug!(bucket = %self.bucket, key, size = bytes.len(), "stored object");
        Ok(public_url(&self.base_url, &self.bucket, key))
    }

    fn delete(&self, key: &str) -> Result<(), CoreError> {
        let path = self.object_path(key)?;
        if !path.exists() {
            return Err(CoreError::ObjectStore(format!("object `{key}` not found")));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
