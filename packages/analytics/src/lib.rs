#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filtering and per-district aggregation over the dog registry.
//!
//! [`options`] derives the selectable filter values from the loaded records
//! and validates user choices into a [`dog_map_dog_models::FilterCriteria`].
//! [`pipeline`] applies the criteria and aggregates the matching records by
//! district. Both are pure functions of their inputs; callers re-run them on
//! every input change.

pub mod options;
pub mod pipeline;

use thiserror::Error;

/// Errors that can occur while building filter criteria.
#[derive(Debug, Error)]
pub enum FilterError {
    /// A chosen value is not one of the selectable options.
    #[error("{field} '{value}' is not an available option")]
    NotInDomain {
        /// Which filter the value was chosen for.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// The dataset has no owner genders to choose from.
    #[error("No owner genders available; the dataset is empty")]
    NoGenders,
}
