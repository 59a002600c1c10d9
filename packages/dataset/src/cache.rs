//! Process-lifetime cache of loaded source tables.
//!
//! The first request for a path reads the file; later requests hand out the
//! same [`Arc`] snapshot. Snapshots are never mutated after insertion.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{Dataset, DatasetError, Table, load_source_table};

/// Source tables keyed by canonical file path.
#[derive(Debug)]
pub struct DatasetCache {
    delimiter: u8,
    tables: BTreeMap<PathBuf, Arc<Table>>,
}

impl Default for DatasetCache {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetCache {
    /// Creates an empty cache for comma-delimited files.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: b',',
            tables: BTreeMap::new(),
        }
    }

    /// Sets the field delimiter used for files loaded from now on.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Returns the cached snapshot for `path`, reading the file on first use.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file cannot be read or parsed. Failed
    /// loads are not cached.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<Table>, DatasetError> {
        let key = std::fs::canonicalize(path).map_err(|source| DatasetError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(table) = self.tables.get(&key) {
            log::debug!("Using cached table for {}", key.display());
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(load_source_table(&key, self.delimiter)?);
        self.tables.insert(key, Arc::clone(&table));
        Ok(table)
    }

    /// Loads (or reuses) the table at `path` and derives a [`Dataset`] from
    /// it.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if loading fails or required columns are
    /// missing.
    pub fn dataset(&mut self, path: &Path) -> Result<Dataset, DatasetError> {
        Dataset::from_source(self.get_or_load(path)?)
    }

    /// Number of cached tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns `true` if nothing has been loaded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
