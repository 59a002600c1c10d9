//! Record filtering and per-district aggregation.
//!
//! Districts without a matching record never appear in the aggregates.
//! Consumers treat that absence as "no data", which is different from an
//! explicit zero.

use std::collections::BTreeMap;

use dog_map_dog_models::{DistrictCount, DistrictKey, DistrictTopBreed, DogRecord, FilterCriteria};
use serde::Serialize;

/// Everything derived from one filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineOutput<'a> {
    /// Matching records, in input order.
    pub filtered: Vec<&'a DogRecord>,
    /// Matching dogs per district, ordered by district.
    pub district_counts: Vec<DistrictCount>,
    /// Most common primary breed per district, ordered by district.
    pub top_breeds: Vec<DistrictTopBreed>,
}

impl PipelineOutput<'_> {
    /// Number of matching records.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.filtered.len()
    }
}

/// Filters `records` by `criteria` and aggregates the result by district.
#[must_use]
pub fn run<'a>(records: &'a [DogRecord], criteria: &FilterCriteria) -> PipelineOutput<'a> {
    let filtered = filter_records(records, criteria);
    let district_counts = count_by_district(&filtered);
    let top_breeds = top_breed_by_district(&filtered);

    log::debug!(
        "Pipeline: {} of {} records match ({} = {}), {} districts",
        filtered.len(),
        records.len(),
        criteria.breed,
        criteria.gender,
        district_counts.len()
    );

    PipelineOutput {
        filtered,
        district_counts,
        top_breeds,
    }
}

/// Keeps the records that satisfy every predicate of `criteria`.
#[must_use]
pub fn filter_records<'a>(
    records: &'a [DogRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a DogRecord> {
    records.iter().filter(|r| criteria.matches(r)).collect()
}

/// Counts records per district.
#[must_use]
pub fn count_by_district(records: &[&DogRecord]) -> Vec<DistrictCount> {
    let mut counts: BTreeMap<DistrictKey, u64> = BTreeMap::new();
    for record in records {
        *counts.entry(record.district_key()).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|(district, count)| DistrictCount { district, count })
        .collect()
}

/// Finds the most frequent primary breed per district.
///
/// Ties go to the lexicographically smallest breed, so the result does not
/// depend on record order.
#[must_use]
pub fn top_breed_by_district(records: &[&DogRecord]) -> Vec<DistrictTopBreed> {
    let mut by_district: BTreeMap<DistrictKey, BTreeMap<&str, u64>> = BTreeMap::new();
    for record in records {
        *by_district
            .entry(record.district_key())
            .or_default()
            .entry(record.breed1.as_str())
            .or_default() += 1;
    }

    by_district
        .into_iter()
        .filter_map(|(district, breeds)| {
            let mut best: Option<(&str, u64)> = None;
            // Ascending breed order: only a strictly higher count replaces.
            for (breed, count) in breeds {
                if best.is_none_or(|(_, top)| count > top) {
                    best = Some((breed, count));
                }
            }
            best.map(|(breed, count)| DistrictTopBreed {
                district,
                breed: breed.to_string(),
                count,
            })
        })
        .collect()
}
