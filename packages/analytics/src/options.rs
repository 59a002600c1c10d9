//! Selectable filter values and criteria validation.

use std::collections::BTreeSet;

use dog_map_dog_models::{
    ALL_BREEDS_LABEL, AgeGroup, BreedFilter, DogRecord, FilterCriteria, age_group_label,
    parse_age_group_label,
};
use serde::Serialize;

use crate::FilterError;

/// The values each filter control can take for a given dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    /// Distinct primary breeds, ascending. `All` is implied and not stored.
    pub breeds: Vec<String>,
    /// Distinct owner genders in first-appearance order. There is no "all"
    /// option; exactly one gender is always selected.
    pub genders: Vec<String>,
    /// Distinct age groups present, ascending, with the missing slot last.
    pub age_groups: Vec<Option<AgeGroup>>,
}

impl FilterOptions {
    /// Collects the filter domains from the loaded records.
    #[must_use]
    pub fn from_records(records: &[DogRecord]) -> Self {
        let breeds: BTreeSet<&str> = records.iter().map(|r| r.breed1.as_str()).collect();

        let mut genders: Vec<String> = Vec::new();
        for record in records {
            if !genders.contains(&record.gender) {
                genders.push(record.gender.clone());
            }
        }

        let present: BTreeSet<Option<AgeGroup>> = records.iter().map(|r| r.age_group).collect();
        let known = present.iter().flatten().copied();
        let mut age_groups: Vec<Option<AgeGroup>> = known.map(Some).collect();
        if present.contains(&None) {
            age_groups.push(None);
        }

        log::debug!(
            "Filter options: {} breeds, {} genders, {} age groups",
            breeds.len(),
            genders.len(),
            age_groups.len()
        );

        Self {
            breeds: breeds.into_iter().map(str::to_string).collect(),
            genders,
            age_groups,
        }
    }

    /// Breed choices as shown to the user: `All` first, then every breed.
    #[must_use]
    pub fn breed_labels(&self) -> Vec<String> {
        std::iter::once(ALL_BREEDS_LABEL.to_string())
            .chain(self.breeds.iter().cloned())
            .collect()
    }

    /// Age-group choices as shown to the user.
    #[must_use]
    pub fn age_group_labels(&self) -> Vec<String> {
        self.age_groups
            .iter()
            .copied()
            .map(age_group_label)
            .collect()
    }

    /// The initial selection: every breed, the first gender, and every age
    /// group present (including the missing slot).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::NoGenders`] if the dataset is empty.
    pub fn default_criteria(&self) -> Result<FilterCriteria, FilterError> {
        let gender = self.genders.first().ok_or(FilterError::NoGenders)?;
        Ok(FilterCriteria {
            breed: BreedFilter::All,
            gender: gender.clone(),
            age_groups: self.age_groups.iter().copied().collect(),
        })
    }

    /// Builds criteria from user choices, checking each against its domain.
    ///
    /// An empty `age_groups` selection is valid and matches nothing.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::NotInDomain`] if the breed, gender, or any age
    /// group is not selectable for this dataset.
    pub fn criteria(
        &self,
        breed: &str,
        gender: &str,
        age_groups: &[Option<AgeGroup>],
    ) -> Result<FilterCriteria, FilterError> {
        let breed = BreedFilter::from(breed);
        if let BreedFilter::Breed(name) = &breed
            && self.breeds.binary_search(name).is_err()
        {
            return Err(FilterError::NotInDomain {
                field: "breed",
                value: name.clone(),
            });
        }

        if !self.genders.iter().any(|g| g == gender) {
            return Err(FilterError::NotInDomain {
                field: "gender",
                value: gender.to_string(),
            });
        }

        for group in age_groups {
            if !self.age_groups.contains(group) {
                return Err(FilterError::NotInDomain {
                    field: "age group",
                    value: age_group_label(*group),
                });
            }
        }

        Ok(FilterCriteria {
            breed,
            gender: gender.to_string(),
            age_groups: age_groups.iter().copied().collect(),
        })
    }

    /// Parses age-group labels (display form, variant name, or `missing`).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::NotInDomain`] for unrecognized labels.
    pub fn parse_age_groups<S: AsRef<str>>(
        labels: &[S],
    ) -> Result<Vec<Option<AgeGroup>>, FilterError> {
        labels
            .iter()
            .map(|label| {
                parse_age_group_label(label.as_ref()).ok_or_else(|| FilterError::NotInDomain {
                    field: "age group",
                    value: label.as_ref().to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use dog_map_dog_models::{AgeGroup, DogRecord};

    pub fn record(breed: &str, gender: &str, age: &str, district: &str) -> DogRecord {
        DogRecord {
            owner_id: "1".to_string(),
            age: age.to_string(),
            gender: gender.to_string(),
            city_district: district.to_string(),
            city_quarter: format!("{district}1"),
            breed1: breed.to_string(),
            breed1_mix: false,
            breed2: String::new(),
            breed2_mix: false,
            breed_type: "K".to_string(),
            dog_birth_year: None,
            dog_gender: "w".to_string(),
            dog_color: "braun".to_string(),
            age_group: AgeGroup::from_age_range(age),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    fn records() -> Vec<DogRecord> {
        vec![
            record("Pudel", "w", "31-40", "1"),
            record("Mops", "m", "11-20", "2"),
            record("Beagle", "w", "999-1000", "2"),
            record("Mops", "m", "71-80", "3"),
        ]
    }

    #[test]
    fn breeds_sorted_with_all_first() {
        let options = FilterOptions::from_records(&records());
        assert_eq!(options.breeds, ["Beagle", "Mops", "Pudel"]);
        assert_eq!(options.breed_labels(), ["All", "Beagle", "Mops", "Pudel"]);
    }

    #[test]
    fn genders_in_first_appearance_order() {
        let options = FilterOptions::from_records(&records());
        assert_eq!(options.genders, ["w", "m"]);
    }

    #[test]
    fn age_groups_ascending_with_missing_last() {
        let options = FilterOptions::from_records(&records());
        assert_eq!(
            options.age_groups,
            [
                Some(AgeGroup::Teenager),
                Some(AgeGroup::Adult),
                Some(AgeGroup::Elderly),
                None,
            ]
        );
        assert_eq!(options.age_group_labels().last().unwrap(), "missing");
    }

    #[test]
    fn default_criteria_includes_everything_present() {
        let options = FilterOptions::from_records(&records());
        let criteria = options.default_criteria().unwrap();
        assert_eq!(criteria.breed, BreedFilter::All);
        assert_eq!(criteria.gender, "w");
        assert_eq!(criteria.age_groups.len(), 4);
        assert!(criteria.age_groups.contains(&None));
    }

    #[test]
    fn default_criteria_needs_a_gender() {
        let options = FilterOptions::from_records(&[]);
        assert!(matches!(
            options.default_criteria(),
            Err(FilterError::NoGenders)
        ));
    }

    #[test]
    fn criteria_validates_domain_membership() {
        let options = FilterOptions::from_records(&records());

        let ok = options
            .criteria("Mops", "m", &[Some(AgeGroup::Teenager)])
            .unwrap();
        assert_eq!(ok.breed, BreedFilter::Breed("Mops".to_string()));

        assert!(matches!(
            options.criteria("Dackel", "m", &[]),
            Err(FilterError::NotInDomain { field: "breed", .. })
        ));
        assert!(matches!(
            options.criteria("All", "x", &[]),
            Err(FilterError::NotInDomain {
                field: "gender",
                ..
            })
        ));
    }

    #[test]
    fn empty_age_group_selection_is_valid() {
        let options = FilterOptions::from_records(&records());
        let criteria = options.criteria("All", "w", &[]).unwrap();
        assert!(criteria.age_groups.is_empty());
    }

    #[test]
    fn age_group_outside_dataset_is_rejected() {
        let options = FilterOptions::from_records(&[record("Mops", "m", "41-50", "1")]);
        assert!(matches!(
            options.criteria("All", "m", &[Some(AgeGroup::Elderly)]),
            Err(FilterError::NotInDomain {
                field: "age group",
                ..
            })
        ));
    }

    #[test]
    fn parses_age_group_labels() {
        let labels = ["Adult(21-60)", "elderly", "missing"];
        let parsed = FilterOptions::parse_age_groups(&labels).unwrap();
        assert_eq!(
            parsed,
            [Some(AgeGroup::Adult), Some(AgeGroup::Elderly), None]
        );
        assert!(FilterOptions::parse_age_groups(&["baby"]).is_err());
    }
}
