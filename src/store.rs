//! Read-modify-write JSON array store.
//!
//! Every append loads the whole file, adds the new records after the existing
//! ones and rewrites the file in full. The write is a plain overwrite: there is
//! no locking and no rename-based atomic replace, so the store assumes a single
//! writing process. A crash between the read and the write can lose edits made
//! to the file by anything else in the meantime.

use crate::error::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Default output file for captured restaurant URLs
pub const DEFAULT_OUTPUT_FILE: &str = "captured_urls.json";

/// A JSON file holding an ordered array of `T` records
#[derive(Debug, Clone)]
pub struct JsonStore<T> {
    path: PathBuf,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _records: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records. A missing or blank file is an empty store.
    pub fn try_load(&self) -> Result<Vec<T>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&contents).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Load all records, treating an unreadable or corrupt file as empty.
    pub fn load(&self) -> Vec<T> {
        match self.try_load() {
            Ok(records) => records,
            Err(e) => {
                ::log::error!("Error reading {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Append records after the existing ones and rewrite the file.
    ///
    /// Returns the total number of records now stored.
    pub fn append(&self, items: &[T]) -> Result<usize, StoreError>
    where
        T: Clone,
    {
        let mut records = self.load();
        records.extend_from_slice(items);
        self.write_all(&records)?;

        ::log::info!(
            "Appended {} new items to {}. Total items: {}",
            items.len(),
            self.path.display(),
            records.len()
        );
        Ok(records.len())
    }

    /// Replace the file contents with exactly `items`
    pub fn write_all(&self, items: &[T]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(items).map_err(StoreError::Encode)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}
