#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dog registry loading.
//!
//! Reads the registry CSV into a [`Table`] with its source (German) headers,
//! then derives a [`Dataset`]: the same table with normalized headers plus
//! an `Age_Group` column, and the typed [`DogRecord`] rows the analytics
//! pipeline works on.
//!
//! Source tables are shared as read-only [`Arc`] snapshots through
//! [`DatasetCache`]. Deriving a [`Dataset`] always works on a private clone,
//! so the cached snapshot can never be modified by a consumer.

pub mod cache;
pub mod paths;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use dog_map_dog_models::{AgeGroup, DogRecord, columns};
use thiserror::Error;

pub use cache::DatasetCache;

/// Errors that can occur while loading the registry.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be opened or read.
    #[error("Failed to access {}: {source}", path.display())]
    FileAccess {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid delimited text.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent.
    #[error("Missing column {source_name} ({column})")]
    MissingColumn {
        /// Normalized column name.
        column: String,
        /// Header expected in the source file.
        source_name: String,
    },
}

/// A delimited table: headers plus string cells.
///
/// Every row has exactly as many cells as there are headers; short rows are
/// padded with empty cells when read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row cells, aligned with [`Self::headers`].
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parses a table from delimited text.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Csv`] if the input is not valid delimited text.
    pub fn from_reader<R: Read>(reader: R, delimiter: u8) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_owned())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row = (0..headers.len())
                .map(|i| record.get(i).unwrap_or("").trim().to_owned())
                .collect();
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Returns the index of a column by header.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Number of data rows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no data rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reads the registry file at `path` with its source headers.
///
/// # Errors
///
/// Returns [`DatasetError::FileAccess`] if the file cannot be opened and
/// [`DatasetError::Csv`] if it cannot be parsed. No partial table is
/// returned.
pub fn load_source_table(path: &Path, delimiter: u8) -> Result<Table, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let table = Table::from_reader(file, delimiter)?;
    log::info!(
        "Read {} rows ({} columns) from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// The registry in both header languages plus typed records.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: Arc<Table>,
    renamed: Table,
    records: Vec<DogRecord>,
}

impl Dataset {
    /// Derives the normalized view of a source table.
    ///
    /// Works on a clone of `source`; the shared snapshot is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::MissingColumn`] if any of the 13 registry
    /// columns is absent.
    pub fn from_source(source: Arc<Table>) -> Result<Self, DatasetError> {
        let mut renamed = Table::clone(&source);
        rename_columns(&mut renamed);

        let records = parse_records(&renamed)?;
        set_age_group_column(&mut renamed, &records);

        let missing = records.iter().filter(|r| r.age_group.is_none()).count();
        if missing > 0 {
            log::debug!("{missing} records have an unrecognized age range");
        }

        Ok(Self {
            source,
            renamed,
            records,
        })
    }

    /// The table with its original source headers.
    #[must_use]
    pub fn source(&self) -> &Table {
        &self.source
    }

    /// The table with normalized headers and the derived `Age_Group` column.
    #[must_use]
    pub const fn renamed(&self) -> &Table {
        &self.renamed
    }

    /// Typed registry rows.
    #[must_use]
    pub fn records(&self) -> &[DogRecord] {
        &self.records
    }
}

/// Renames mapped headers in place; unmapped headers are kept.
pub fn rename_columns(table: &mut Table) {
    for header in &mut table.headers {
        let normalized = columns::normalized_name(header);
        if normalized != header {
            *header = normalized.to_string();
        }
    }
}

/// Interprets a mix flag cell. Empty and explicit negatives are `false`;
/// any other marker (e.g. `Mischling`) is `true`.
#[must_use]
pub fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_lowercase().as_str(),
        "" | "false" | "0" | "nein" | "no" | "n"
    )
}

struct ColumnIndexes {
    owner_id: usize,
    age: usize,
    gender: usize,
    city_district: usize,
    city_quarter: usize,
    breed1: usize,
    breed1_mix: usize,
    breed2: usize,
    breed2_mix: usize,
    breed_type: usize,
    dog_birth_year: usize,
    dog_gender: usize,
    dog_color: usize,
}

impl ColumnIndexes {
    fn resolve(table: &Table) -> Result<Self, DatasetError> {
        let find = |column: &str| {
            table
                .column_index(column)
                .ok_or_else(|| DatasetError::MissingColumn {
                    column: column.to_string(),
                    source_name: columns::RENAMES
                        .iter()
                        .find(|(_, to)| *to == column)
                        .map_or(column, |(from, _)| from)
                        .to_string(),
                })
        };

        Ok(Self {
            owner_id: find(columns::OWNER_ID)?,
            age: find(columns::AGE)?,
            gender: find(columns::GENDER)?,
            city_district: find(columns::CITY_DISTRICT)?,
            city_quarter: find(columns::CITY_QUARTER)?,
            breed1: find(columns::BREED1)?,
            breed1_mix: find(columns::BREED1_MIX)?,
            breed2: find(columns::BREED2)?,
            breed2_mix: find(columns::BREED2_MIX)?,
            breed_type: find(columns::BREED_TYPE)?,
            dog_birth_year: find(columns::DOG_BIRTH_YEAR)?,
            dog_gender: find(columns::DOG_GENDER)?,
            dog_color: find(columns::DOG_COLOR)?,
        })
    }
}

fn parse_records(table: &Table) -> Result<Vec<DogRecord>, DatasetError> {
    let idx = ColumnIndexes::resolve(table)?;

    Ok(table
        .rows
        .iter()
        .map(|row| {
            let age = row[idx.age].clone();
            let age_group = AgeGroup::from_age_range(&age);
            DogRecord {
                owner_id: row[idx.owner_id].clone(),
                age,
                gender: row[idx.gender].clone(),
                city_district: row[idx.city_district].clone(),
                city_quarter: row[idx.city_quarter].clone(),
                breed1: row[idx.breed1].clone(),
                breed1_mix: parse_flag(&row[idx.breed1_mix]),
                breed2: row[idx.breed2].clone(),
                breed2_mix: parse_flag(&row[idx.breed2_mix]),
                breed_type: row[idx.breed_type].clone(),
                dog_birth_year: row[idx.dog_birth_year].parse().ok(),
                dog_gender: row[idx.dog_gender].clone(),
                dog_color: row[idx.dog_color].clone(),
                age_group,
            }
        })
        .collect())
}

fn set_age_group_column(table: &mut Table, records: &[DogRecord]) {
    let labels = records
        .iter()
        .map(|r| r.age_group.map(|g| g.to_string()).unwrap_or_default());

    if let Some(i) = table.column_index(columns::AGE_GROUP) {
        for (row, label) in table.rows.iter_mut().zip(labels) {
            row[i] = label;
        }
    } else {
        table.headers.push(columns::AGE_GROUP.to_string());
        for (row, label) in table.rows.iter_mut().zip(labels) {
            row.push(label);
        }
    }
}
