#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Output rendering for the dog registry dashboard.
//!
//! Produces a choropleth `GeoJSON` document (dog count per district, with
//! breed markers at district centroids) styled by a [`MapStyle`], and plain
//! text or CSV renderings of the registry tables. Nothing here feeds back
//! into filtering or aggregation.

pub mod choropleth;
pub mod style;
pub mod table;

use std::path::PathBuf;

use thiserror::Error;

pub use choropleth::{render_choropleth, write_geojson};
pub use style::MapStyle;

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Writing an output file failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The map style is invalid.
    #[error("Invalid map style: {message}")]
    Style {
        /// Description of what went wrong.
        message: String,
    },
}
