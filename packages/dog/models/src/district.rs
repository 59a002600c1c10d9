//! Normalized district identifiers.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// District identifier shared by registry rows and boundary features.
///
/// Surrounding whitespace is dropped and integer-like labels are
/// canonicalized (`"03"`, `"3.0"` and `3` all become `"3"`). Equality is
/// case-insensitive. Integer keys sort numerically before all other keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct DistrictKey {
    label: String,
    folded: String,
    numeric: Option<i64>,
}

impl DistrictKey {
    /// Builds a key from a raw district value.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let (label, numeric) = canonicalize(raw);
        let folded = label.to_lowercase();
        Self {
            label,
            folded,
            numeric,
        }
    }

    /// Returns the canonical label (original case preserved).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.label
    }
}

#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
fn canonicalize(raw: &str) -> (String, Option<i64>) {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return (n.to_string(), Some(n));
    }
    if let Ok(f) = trimmed.parse::<f64>()
        && f.is_finite()
        && f == f.trunc()
        && f.abs() < 1e15
    {
        let n = f as i64;
        return (n.to_string(), Some(n));
    }
    (trimmed.to_string(), None)
}

impl PartialEq for DistrictKey {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for DistrictKey {}

impl Hash for DistrictKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl Ord for DistrictKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.numeric, other.numeric) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.folded.cmp(&other.folded),
        }
    }
}

impl PartialOrd for DistrictKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for DistrictKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

impl From<String> for DistrictKey {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<&str> for DistrictKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<DistrictKey> for String {
    fn from(value: DistrictKey) -> Self {
        value.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_like_labels_collapse() {
        let keys = ["3", "03", " 3 ", "3.0"].map(DistrictKey::new);
        for key in &keys {
            assert_eq!(key, &keys[0]);
            assert_eq!(key.as_str(), "3");
        }
    }

    #[test]
    fn equality_ignores_case_but_keeps_label() {
        let a = DistrictKey::new("Kreis 1");
        let b = DistrictKey::new("KREIS 1");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Kreis 1");
    }

    #[test]
    fn numeric_keys_sort_numerically_and_first() {
        let mut keys: Vec<DistrictKey> = ["10", "Altstetten", "2", "1a", "9"]
            .into_iter()
            .map(DistrictKey::new)
            .collect();
        keys.sort();
        let labels: Vec<&str> = keys.iter().map(DistrictKey::as_str).collect();
        assert_eq!(labels, ["2", "9", "10", "1a", "Altstetten"]);
    }

    #[test]
    fn fractional_and_non_finite_values_stay_text() {
        assert_eq!(DistrictKey::new("3.5").as_str(), "3.5");
        assert_eq!(DistrictKey::new("inf").as_str(), "inf");
        assert_eq!(DistrictKey::new("NaN").as_str(), "NaN");
    }

    #[test]
    fn serde_uses_label() {
        let key: DistrictKey = serde_json::from_str("\"07\"").unwrap();
        assert_eq!(key.as_str(), "7");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"7\"");
    }
}
