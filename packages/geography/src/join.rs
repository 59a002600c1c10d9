//! Inner join of district centroids with per-district top breeds.

use std::collections::{BTreeMap, BTreeSet};

use dog_map_dog_models::{DistrictKey, DistrictTopBreed};
use serde::Serialize;

use crate::DistrictMap;

/// A breed label anchored at a district centroid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictMarker {
    /// District join key.
    pub district: DistrictKey,
    /// District name from the boundary source.
    pub name: String,
    /// Centroid latitude.
    pub lat: f64,
    /// Centroid longitude.
    pub lon: f64,
    /// Most common breed in the district.
    pub breed: String,
}

/// Places one marker per district that has both a boundary and a top breed.
///
/// Markers follow the boundary source order. Districts without a top breed
/// get no marker. Boundary features sharing a district key each get one.
/// Top breeds whose district has no boundary are dropped with a warning.
#[must_use]
pub fn join_markers(map: &DistrictMap, top_breeds: &[DistrictTopBreed]) -> Vec<DistrictMarker> {
    let by_key: BTreeMap<&DistrictKey, &DistrictTopBreed> =
        top_breeds.iter().map(|t| (&t.district, t)).collect();
    let mut matched = BTreeSet::new();

    let markers: Vec<DistrictMarker> = map
        .districts()
        .iter()
        .filter_map(|district| {
            let top = by_key.get(&district.key)?;
            matched.insert(&district.key);
            Some(DistrictMarker {
                district: district.key.clone(),
                name: district.name.clone(),
                lat: district.lat(),
                lon: district.lon(),
                breed: top.breed.clone(),
            })
        })
        .collect();

    for unmatched in by_key.keys().filter(|key| !matched.contains(*key)) {
        log::warn!("District '{unmatched}' has dog records but no boundary; no marker placed");
    }

    markers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::districts::fixtures::DISTRICTS_GEOJSON;

    fn top(district: &str, breed: &str) -> DistrictTopBreed {
        DistrictTopBreed {
            district: DistrictKey::new(district),
            breed: breed.to_string(),
            count: 1,
        }
    }

    #[test]
    fn joins_on_normalized_keys() {
        let map = DistrictMap::from_geojson_str(DISTRICTS_GEOJSON).unwrap();
        let markers = join_markers(&map, &[top("2.0", "Mops"), top("01", "Pudel")]);

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].name, "1");
        assert_eq!(markers[0].breed, "Pudel");
        assert!((markers[0].lat - 47.5).abs() < 1e-9);
        assert!((markers[0].lon - 8.5).abs() < 1e-9);
        assert_eq!(markers[1].name, "2");
        assert_eq!(markers[1].breed, "Mops");
    }

    #[test]
    fn districts_without_top_breed_get_no_marker() {
        let map = DistrictMap::from_geojson_str(DISTRICTS_GEOJSON).unwrap();
        assert!(join_markers(&map, &[]).is_empty());
    }

    #[test]
    fn top_breeds_without_boundary_are_dropped() {
        let map = DistrictMap::from_geojson_str(DISTRICTS_GEOJSON).unwrap();
        let markers = join_markers(&map, &[top("Seefeld", "Beagle"), top("KREIS L", "Mops")]);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].name, "Kreis L");
    }

    #[test]
    fn features_sharing_a_name_each_get_a_marker() {
        let geojson = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "name": "1" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[8.0, 47.0], [9.0, 47.0], [9.0, 48.0], [8.0, 48.0], [8.0, 47.0]]]
      }
    },
    {
      "type": "Feature",
      "properties": { "name": "1" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[10.0, 47.0], [11.0, 47.0], [11.0, 48.0], [10.0, 48.0], [10.0, 47.0]]]
      }
    }
  ]
}"#;
        let map = DistrictMap::from_geojson_str(geojson).unwrap();
        let markers = join_markers(&map, &[top("1", "Pudel")]);

        assert_eq!(markers.len(), 2);
        assert!(markers.iter().all(|m| m.breed == "Pudel"));
        assert!((markers[0].lon - 8.5).abs() < 1e-9);
        assert!((markers[1].lon - 10.5).abs() < 1e-9);
    }
}
