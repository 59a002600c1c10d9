#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! City district boundaries and marker placement.
//!
//! Parses a `GeoJSON` `FeatureCollection` of district polygons into a
//! [`DistrictMap`], computes the area-weighted centroid of each district,
//! and joins those centroids with the per-district top breed so the
//! renderer can place one labelled marker per district.

pub mod districts;
pub mod join;

use std::path::PathBuf;

use thiserror::Error;

pub use districts::{District, DistrictMap};
pub use join::{DistrictMarker, join_markers};

/// Errors that can occur while loading district boundaries.
#[derive(Debug, Error)]
pub enum GeographyError {
    /// The boundary file could not be opened or read.
    #[error("Failed to access {}: {source}", path.display())]
    FileAccess {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The input is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] Box<geojson::Error>),

    /// The input is valid `GeoJSON` but not a `FeatureCollection`.
    #[error("Expected a GeoJSON FeatureCollection")]
    NotFeatureCollection,
}
