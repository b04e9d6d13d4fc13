//! File-backed key-value store.
//!
//! All keys live in one JSON object on disk. Every mutation re-reads the file
//! under an exclusive lock, applies the change and writes it back through a
//! temporary file + rename, so concurrent `orbis` processes never see a torn
//! file.

use orbis_core::error::{OrbisError, Result};
use orbis_core::storage::KeyValueStore;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

type Entries = BTreeMap<String, String>;

/// Durable [`KeyValueStore`] kept in a single JSON file.
pub struct JsonFileStore {
    path: PathBuf,
    /// Snapshot of the file as of the last load or write.
    entries: Mutex<Entries>,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file is an empty store; a
    /// corrupted file is logged and treated as empty until the next write
    /// replaces it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = read_entries(&path)?;
        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened storage file");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `f` to the current on-disk contents and saves the result.
    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Entries),
    {
        let mut cache = self.entries();
        let _lock = FileLock::acquire(&self.path)?;

        let mut entries = read_entries(&self.path)?;
        f(&mut entries);
        self.save(&entries)?;

        *cache = entries;
        Ok(())
    }

    fn save(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;

        let tmp_path = temp_path(&self.path)?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn entries(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn delete(&self, key: &str) -> Result<()> {
        self.update(|entries| {
            entries.remove(key);
        })
    }
}

fn read_entries(path: &Path) -> Result<Entries> {
    if !path.exists() {
        return Ok(Entries::new());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Entries::new());
    }

    match serde_json::from_str(&content) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Storage file is corrupted, starting empty");
            Ok(Entries::new())
        }
    }
}

fn temp_path(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| OrbisError::storage(format!("Invalid storage path: {}", path.display())))?;
    let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

/// Exclusive lock on a sibling `.lock` file, released when dropped.
///
/// The lock file itself is left in place: unlinking it while another process
/// waits on the same inode would let a third process lock a fresh file.
struct FileLock {
    _file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| OrbisError::storage(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { _file: file })
    }
}
