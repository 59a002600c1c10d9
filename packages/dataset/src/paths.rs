#![allow(clippy::module_name_repetitions)]
//! Default input and output locations.
//!
//! Paths are relative to the project root's `data/` directory unless
//! overridden by environment variables.

use std::path::{Path, PathBuf};

/// Overrides [`dogs_csv_path`].
pub const DOGS_CSV_ENV: &str = "DOG_MAP_DOGS_CSV";
/// Overrides [`districts_geojson_path`].
pub const DISTRICTS_GEOJSON_ENV: &str = "DOG_MAP_DISTRICTS_GEOJSON";
/// Overrides [`output_dir`].
pub const OUTPUT_DIR_ENV: &str = "DOG_MAP_OUTPUT_DIR";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
///
/// # Panics
///
/// Panics if the project root cannot be resolved.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .to_path_buf()
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Returns the registry CSV path (`data/dog.csv` by default).
#[must_use]
pub fn dogs_csv_path() -> PathBuf {
    env_path(DOGS_CSV_ENV).unwrap_or_else(|| data_dir().join("dog.csv"))
}

/// Returns the district boundaries path
/// (`data/stzh.adm_stadtkreise_a.json` by default).
#[must_use]
pub fn districts_geojson_path() -> PathBuf {
    env_path(DISTRICTS_GEOJSON_ENV)
        .unwrap_or_else(|| data_dir().join("stzh.adm_stadtkreise_a.json"))
}

/// Returns the directory rendered artifacts are written to
/// (`data/generated/` by default).
#[must_use]
pub fn output_dir() -> PathBuf {
    env_path(OUTPUT_DIR_ENV).unwrap_or_else(|| data_dir().join("generated"))
}

/// Ensures a directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_live_under_data_dir() {
        let data = data_dir();
        assert!(data.ends_with("data"));
        assert!(project_root().join("Cargo.toml").exists());
        if std::env::var(DOGS_CSV_ENV).is_err() {
            assert_eq!(dogs_csv_path(), data.join("dog.csv"));
        }
        if std::env::var(OUTPUT_DIR_ENV).is_err() {
            assert_eq!(output_dir(), data.join("generated"));
        }
    }
}
