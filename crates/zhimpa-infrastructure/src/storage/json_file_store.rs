//! File-backed key-value store.
//!
//! All entries live in one JSON object. Every write runs under an exclusive
//! `fs2` lock on a `.lock` sibling and replaces the file through a uniquely
//! named temporary file in the same directory.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;
use zhimpa_core::error::{Result, ZhimpaError};
use zhimpa_core::session::KeyValueStore;

type Entries = BTreeMap<String, String>;

/// A key-value store persisted as a JSON object on disk.
///
/// Several handles, in one process or many, may share a path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads all entries. A missing or empty file holds no entries.
    fn load(&self) -> Result<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// Replaces the file with `entries`. Callers hold the store lock.
    fn save(&self, entries: &Entries) -> Result<()> {
        let dir = self.dir();
        let json = serde_json::to_string_pretty(entries)?;

        let mut tmp_file = NamedTempFile::new_in(&dir)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.as_file().sync_all()?;
        tmp_file
            .persist(&self.path)
            .map_err(|e| ZhimpaError::from(e.error))?;
        Ok(())
    }

    /// Runs one read-modify-write cycle under the store lock.
    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Entries),
    {
        let _lock = StoreLock::acquire(&self.dir(), &self.lock_path()?)?;

        let mut entries = self.load()?;
        f(&mut entries);
        self.save(&entries)
    }

    fn dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn lock_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| ZhimpaError::io(format!("Path has no file name: {:?}", self.path)))?;

        Ok(self
            .path
            .with_file_name(format!("{}.lock", file_name.to_string_lossy())))
    }
}

/// Exclusive lock on the store's lock file, released on drop.
///
/// The lock file is left in place: removing it would let a waiting process
/// lock an unlinked inode while a newcomer locks a fresh one.
struct StoreLock {
    file: File,
}

impl StoreLock {
    fn acquire(dir: &Path, lock_path: &Path) -> Result<Self> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)?;
        file.lock_exclusive()
            .map_err(|e| ZhimpaError::storage(format!("Failed to lock {:?}: {}", lock_path, e)))?;

        Ok(Self { file })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn set_all(&self, pairs: &[(&str, &str)]) -> Result<()> {
        self.update(|entries| {
            for (key, value) in pairs {
                entries.insert(key.to_string(), value.to_string());
            }
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}
