#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dog registry domain types.
//!
//! Defines the normalized [`DogRecord`] row, the derived [`AgeGroup`]
//! bucket, the user-facing [`FilterCriteria`], and the per-district
//! aggregates produced by the analytics pipeline. Every district-keyed join
//! in the workspace goes through [`DistrictKey`] so that geometry names and
//! registry values compare the same way.

pub mod columns;
mod district;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use district::DistrictKey;

/// Owner age bucket derived from the registry's raw age range.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum AgeGroup {
    /// Owners aged 20 or younger.
    #[serde(rename = "Teenager(<=20)")]
    #[strum(to_string = "Teenager(<=20)", serialize = "teenager")]
    Teenager,
    /// Owners aged 21 to 60.
    #[serde(rename = "Adult(21-60)")]
    #[strum(to_string = "Adult(21-60)", serialize = "adult")]
    Adult,
    /// Owners older than 60.
    #[serde(rename = "Elderly(>60)")]
    #[strum(to_string = "Elderly(>60)", serialize = "elderly")]
    Elderly,
}

/// Raw age ranges recognized by [`AgeGroup::from_age_range`].
pub const AGE_GROUP_TABLE: &[(&str, AgeGroup)] = &[
    ("11-20", AgeGroup::Teenager),
    ("21-30", AgeGroup::Adult),
    ("31-40", AgeGroup::Adult),
    ("41-50", AgeGroup::Adult),
    ("51-60", AgeGroup::Adult),
    ("61-70", AgeGroup::Elderly),
    ("71-80", AgeGroup::Elderly),
    ("81-90", AgeGroup::Elderly),
    ("91-100", AgeGroup::Elderly),
];

/// Label used wherever the missing age-group slot has to be named.
pub const MISSING_AGE_GROUP_LABEL: &str = "missing";

impl AgeGroup {
    /// Maps a raw age range (e.g. `"41-50"`) to its bucket.
    ///
    /// Returns `None` for ranges outside [`AGE_GROUP_TABLE`].
    #[must_use]
    pub fn from_age_range(age: &str) -> Option<Self> {
        let age = age.trim();
        AGE_GROUP_TABLE
            .iter()
            .find(|(range, _)| *range == age)
            .map(|(_, group)| *group)
    }

    /// Returns all variants in ascending order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Teenager, Self::Adult, Self::Elderly]
    }
}

/// Display label for an optional age group, using
/// [`MISSING_AGE_GROUP_LABEL`] for `None`.
#[must_use]
pub fn age_group_label(group: Option<AgeGroup>) -> String {
    group.map_or_else(|| MISSING_AGE_GROUP_LABEL.to_string(), |g| g.to_string())
}

/// Parses an age-group selection label. Accepts the display form, the
/// variant name, or [`MISSING_AGE_GROUP_LABEL`] for the missing slot.
///
/// Returns `None` if the label is not recognized.
#[must_use]
pub fn parse_age_group_label(label: &str) -> Option<Option<AgeGroup>> {
    let label = label.trim();
    if label.eq_ignore_ascii_case(MISSING_AGE_GROUP_LABEL) {
        return Some(None);
    }
    label.parse::<AgeGroup>().ok().map(Some)
}

/// One registered dog, with normalized field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogRecord {
    /// Owner identifier.
    #[serde(rename = "Owner_ID")]
    pub owner_id: String,
    /// Owner age range as recorded (e.g. `"51-60"`).
    #[serde(rename = "Age")]
    pub age: String,
    /// Owner gender as recorded (e.g. `"m"`, `"w"`).
    #[serde(rename = "Gender")]
    pub gender: String,
    /// City district (Stadtkreis).
    #[serde(rename = "City_District")]
    pub city_district: String,
    /// City quarter (Stadtquartier).
    #[serde(rename = "City_Quarter")]
    pub city_quarter: String,
    /// Primary breed.
    #[serde(rename = "Breed1")]
    pub breed1: String,
    /// Whether the primary breed is a mix.
    #[serde(rename = "Breed1_Mix")]
    pub breed1_mix: bool,
    /// Secondary breed, empty when not recorded.
    #[serde(rename = "Breed2")]
    pub breed2: String,
    /// Whether the secondary breed is a mix.
    #[serde(rename = "Breed2_Mix")]
    pub breed2_mix: bool,
    /// Breed type classification.
    #[serde(rename = "Breed_Type")]
    pub breed_type: String,
    /// Dog birth year, if recorded and numeric.
    #[serde(rename = "Dog_Birth_Year")]
    pub dog_birth_year: Option<u16>,
    /// Dog gender.
    #[serde(rename = "Dog_Gender")]
    pub dog_gender: String,
    /// Dog coat color.
    #[serde(rename = "Dog_Color")]
    pub dog_color: String,
    /// Bucket derived from [`Self::age`]; `None` for unknown ranges.
    #[serde(rename = "Age_Group")]
    pub age_group: Option<AgeGroup>,
}

impl DogRecord {
    /// Returns the district key this record aggregates under.
    #[must_use]
    pub fn district_key(&self) -> DistrictKey {
        DistrictKey::new(&self.city_district)
    }

    /// Returns the display value of a normalized column, or `None` if the
    /// column is not a [`DogRecord`] field.
    #[must_use]
    pub fn column_value(&self, column: &str) -> Option<String> {
        let value = match column {
            columns::OWNER_ID => self.owner_id.clone(),
            columns::AGE => self.age.clone(),
            columns::GENDER => self.gender.clone(),
            columns::CITY_DISTRICT => self.city_district.clone(),
            columns::CITY_QUARTER => self.city_quarter.clone(),
            columns::BREED1 => self.breed1.clone(),
            columns::BREED1_MIX => self.breed1_mix.to_string(),
            columns::BREED2 => self.breed2.clone(),
            columns::BREED2_MIX => self.breed2_mix.to_string(),
            columns::BREED_TYPE => self.breed_type.clone(),
            columns::DOG_BIRTH_YEAR => self
                .dog_birth_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
            columns::DOG_GENDER => self.dog_gender.clone(),
            columns::DOG_COLOR => self.dog_color.clone(),
            columns::AGE_GROUP => self.age_group.map(|g| g.to_string()).unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }
}

/// Label of the catch-all breed option.
pub const ALL_BREEDS_LABEL: &str = "All";

/// Breed selection: every breed, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreedFilter {
    /// No breed restriction.
    All,
    /// Only records whose primary breed equals this value.
    Breed(String),
}

impl BreedFilter {
    /// Returns `true` if `breed` passes this filter.
    #[must_use]
    pub fn matches(&self, breed: &str) -> bool {
        match self {
            Self::All => true,
            Self::Breed(wanted) => wanted == breed,
        }
    }
}

impl From<&str> for BreedFilter {
    fn from(value: &str) -> Self {
        if value == ALL_BREEDS_LABEL {
            Self::All
        } else {
            Self::Breed(value.to_string())
        }
    }
}

impl std::fmt::Display for BreedFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str(ALL_BREEDS_LABEL),
            Self::Breed(breed) => f.write_str(breed),
        }
    }
}

/// The user's current filter selection.
///
/// `age_groups` holds `Option<AgeGroup>` so that records with a missing
/// age group can be included by choosing the `None` slot explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Breed restriction.
    pub breed: BreedFilter,
    /// Exact owner gender to keep.
    pub gender: String,
    /// Age groups to keep. Empty keeps nothing.
    pub age_groups: BTreeSet<Option<AgeGroup>>,
}

impl FilterCriteria {
    /// Returns `true` if `record` satisfies the breed, gender, and age-group
    /// predicates.
    #[must_use]
    pub fn matches(&self, record: &DogRecord) -> bool {
        self.breed.matches(&record.breed1)
            && record.gender == self.gender
            && self.age_groups.contains(&record.age_group)
    }
}

/// Number of matching dogs in one district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictCount {
    /// District identifier.
    pub district: DistrictKey,
    /// Matching dogs. Always at least 1.
    pub count: u64,
}

/// Most common primary breed among the matching dogs of one district.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictTopBreed {
    /// District identifier.
    pub district: DistrictKey,
    /// Most frequent `breed1` value.
    pub breed: String,
    /// How many matching dogs have that breed.
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(breed: &str, gender: &str, age: &str) -> DogRecord {
        DogRecord {
            owner_id: "1".to_string(),
            age: age.to_string(),
            gender: gender.to_string(),
            city_district: "1".to_string(),
            city_quarter: "Rathaus".to_string(),
            breed1: breed.to_string(),
            breed1_mix: false,
            breed2: String::new(),
            breed2_mix: false,
            breed_type: "K".to_string(),
            dog_birth_year: Some(2010),
            dog_gender: "w".to_string(),
            dog_color: "schwarz".to_string(),
            age_group: AgeGroup::from_age_range(age),
        }
    }

    #[test]
    fn age_table_covers_every_bucket() {
        assert_eq!(AGE_GROUP_TABLE.len(), 9);
        assert_eq!(AgeGroup::from_age_range("11-20"), Some(AgeGroup::Teenager));
        assert_eq!(AgeGroup::from_age_range("51-60"), Some(AgeGroup::Adult));
        assert_eq!(AgeGroup::from_age_range("61-70"), Some(AgeGroup::Elderly));
        assert_eq!(AgeGroup::from_age_range("91-100"), Some(AgeGroup::Elderly));
    }

    #[test]
    fn unknown_age_range_has_no_group() {
        assert_eq!(AgeGroup::from_age_range("999-1000"), None);
        assert_eq!(AgeGroup::from_age_range(""), None);
        assert_eq!(AgeGroup::from_age_range("10"), None);
    }

    #[test]
    fn age_groups_are_ordered() {
        assert!(AgeGroup::Teenager < AgeGroup::Adult);
        assert!(AgeGroup::Adult < AgeGroup::Elderly);
    }

    #[test]
    fn age_group_labels_parse_both_forms() {
        assert_eq!(AgeGroup::Adult.to_string(), "Adult(21-60)");
        assert_eq!(
            parse_age_group_label("Elderly(>60)"),
            Some(Some(AgeGroup::Elderly))
        );
        assert_eq!(
            parse_age_group_label("teenager"),
            Some(Some(AgeGroup::Teenager))
        );
        assert_eq!(parse_age_group_label("ADULT"), Some(Some(AgeGroup::Adult)));
        assert_eq!(parse_age_group_label("Missing"), Some(None));
        assert_eq!(parse_age_group_label("toddler"), None);
    }

    #[test]
    fn age_group_serializes_as_label() {
        let json = serde_json::to_string(&AgeGroup::Teenager).unwrap();
        assert_eq!(json, "\"Teenager(<=20)\"");
    }

    #[test]
    fn breed_filter_from_label() {
        assert_eq!(BreedFilter::from("All"), BreedFilter::All);
        assert_eq!(
            BreedFilter::from("Labrador Retriever"),
            BreedFilter::Breed("Labrador Retriever".to_string())
        );
        assert!(BreedFilter::All.matches("anything"));
        assert!(!BreedFilter::from("Pudel").matches("Mops"));
    }

    #[test]
    fn criteria_requires_every_predicate() {
        let criteria = FilterCriteria {
            breed: BreedFilter::from("Mops"),
            gender: "w".to_string(),
            age_groups: BTreeSet::from([Some(AgeGroup::Adult)]),
        };

        assert!(criteria.matches(&record("Mops", "w", "31-40")));
        assert!(!criteria.matches(&record("Pudel", "w", "31-40")));
        assert!(!criteria.matches(&record("Mops", "m", "31-40")));
        assert!(!criteria.matches(&record("Mops", "w", "71-80")));
        assert!(!criteria.matches(&record("Mops", "w", "999-1000")));
    }

    #[test]
    fn missing_age_group_matches_only_when_selected() {
        let mut criteria = FilterCriteria {
            breed: BreedFilter::All,
            gender: "m".to_string(),
            age_groups: AgeGroup::all().iter().copied().map(Some).collect(),
        };
        let unknown = record("Mops", "m", "999-1000");
        assert!(!criteria.matches(&unknown));

        criteria.age_groups.insert(None);
        assert!(criteria.matches(&unknown));
    }

    #[test]
    fn column_values_cover_normalized_columns() {
        let rec = record("Mops", "w", "31-40");
        for column in columns::NORMALIZED {
            assert!(
                rec.column_value(column).is_some(),
                "column {column} has no value accessor"
            );
        }
        assert_eq!(
            rec.column_value(columns::AGE_GROUP).as_deref(),
            Some("Adult(21-60)")
        );
        assert_eq!(rec.column_value("HUNDEFARBE"), None);
    }
}
