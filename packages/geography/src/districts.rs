//! District polygons and their centroids.

use std::path::Path;

use dog_map_dog_models::DistrictKey;
use geo::{Centroid, MultiPolygon, Point};
use geojson::{Feature, FeatureCollection, GeoJson};

use crate::GeographyError;

/// Feature property holding the district name.
pub const NAME_PROPERTY: &str = "name";

/// One district boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct District {
    /// Join key derived from [`Self::name`].
    pub key: DistrictKey,
    /// Name as given by the boundary source.
    pub name: String,
    /// District outline.
    pub boundary: MultiPolygon<f64>,
    /// Area-weighted centre of mass of [`Self::boundary`] (`x` = longitude,
    /// `y` = latitude).
    pub centroid: Point<f64>,
}

impl District {
    /// Centroid latitude.
    #[must_use]
    pub fn lat(&self) -> f64 {
        self.centroid.y()
    }

    /// Centroid longitude.
    #[must_use]
    pub fn lon(&self) -> f64 {
        self.centroid.x()
    }
}

/// All districts of a city, in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DistrictMap {
    districts: Vec<District>,
}

impl DistrictMap {
    /// Reads and parses a district boundary file.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError::FileAccess`] if the file cannot be read, or
    /// a parse error if it is not a `GeoJSON` `FeatureCollection`.
    pub fn load(path: &Path) -> Result<Self, GeographyError> {
        let text = std::fs::read_to_string(path).map_err(|source| GeographyError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::from_geojson_str(&text)?;
        log::info!("Loaded {} districts from {}", map.len(), path.display());
        Ok(map)
    }

    /// Parses district boundaries from `GeoJSON` text.
    ///
    /// # Errors
    ///
    /// Returns [`GeographyError::GeoJson`] for malformed input and
    /// [`GeographyError::NotFeatureCollection`] for other `GeoJSON` objects.
    pub fn from_geojson_str(text: &str) -> Result<Self, GeographyError> {
        match text.parse::<GeoJson>().map_err(Box::new)? {
            GeoJson::FeatureCollection(collection) => Ok(Self::from_features(collection)),
            GeoJson::Feature(_) | GeoJson::Geometry(_) => Err(GeographyError::NotFeatureCollection),
        }
    }

    /// Builds the map from parsed features, skipping (and logging) features
    /// without a usable name or polygon geometry.
    #[must_use]
    pub fn from_features(collection: FeatureCollection) -> Self {
        let districts = collection
            .features
            .into_iter()
            .enumerate()
            .filter_map(|(i, feature)| district_from_feature(i, feature))
            .collect();
        Self { districts }
    }

    /// Districts in source order.
    #[must_use]
    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// Looks up a district by key.
    #[must_use]
    pub fn get(&self, key: &DistrictKey) -> Option<&District> {
        self.districts.iter().find(|d| &d.key == key)
    }

    /// Number of districts.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.districts.len()
    }

    /// Returns `true` if no district was loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }
}

fn district_from_feature(index: usize, feature: Feature) -> Option<District> {
    let Some(name) = feature.property(NAME_PROPERTY).and_then(property_to_string) else {
        log::warn!("Skipping feature {index}: no '{NAME_PROPERTY}' property");
        return None;
    };

    let Some(geometry) = feature.geometry else {
        log::warn!("Skipping district {name}: no geometry");
        return None;
    };

    let boundary = match geo::Geometry::<f64>::try_from(geometry) {
        Ok(geo::Geometry::MultiPolygon(mp)) => mp,
        Ok(geo::Geometry::Polygon(p)) => MultiPolygon(vec![p]),
        Ok(_) => {
            log::warn!("Skipping district {name}: geometry is not a polygon");
            return None;
        }
        Err(e) => {
            log::warn!("Skipping district {name}: {e}");
            return None;
        }
    };

    let Some(centroid) = boundary.centroid() else {
        log::warn!("Skipping district {name}: empty boundary");
        return None;
    };

    Some(District {
        key: DistrictKey::new(&name),
        name,
        boundary,
        centroid,
    })
}

/// Coerces a name property to a string. Numeric names are common in
/// district datasets and must join with string registry values.
fn property_to_string(value: &serde_json::Value) -> Option<String> {
    let name = match value {
        serde_json::Value::String(s) => s.trim().to_string(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!name.is_empty()).then_some(name)
}


#[cfg(test)]
mod tests {
    use super::fixtures::DISTRICTS_GEOJSON;
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn loads_polygon_and_multipolygon_features() {
        let map = DistrictMap::from_geojson_str(DISTRICTS_GEOJSON).unwrap();
        let names: Vec<&str> = map.districts().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["1", "2", "Kreis L"]);
    }

    #[test]
    fn square_centroid_is_its_centre() {
        let map = DistrictMap::from_geojson_str(DISTRICTS_GEOJSON).unwrap();
        let first = &map.districts()[0];
        assert_close(first.lon(), 8.5);
        assert_close(first.lat(), 47.5);
    }

    #[test]
    fn centroid_is_centre_of_mass_not_bounding_box() {
        let map = DistrictMap::from_geojson_str(DISTRICTS_GEOJSON).unwrap();
        let l_shape = map.get(&DistrictKey::new("kreis l")).unwrap();
        assert_close(l_shape.lon(), 2.5 / 3.0);
        assert_close(l_shape.lat(), 2.5 / 3.0);
        assert!((l_shape.lon() - 1.0).abs() > 0.1);
    }

    #[test]
    fn numeric_names_become_string_keys() {
        let map = DistrictMap::from_geojson_str(DISTRICTS_GEOJSON).unwrap();
        assert!(map.get(&DistrictKey::new("2")).is_some());
        assert!(map.get(&DistrictKey::new("02")).is_some());
        assert!(map.get(&DistrictKey::new("4")).is_none());
    }

    #[test]
    fn rejects_non_collections() {
        let point = r#"{"type": "Point", "coordinates": [8.5, 47.4]}"#;
        assert!(matches!(
            DistrictMap::from_geojson_str(point),
            Err(GeographyError::NotFeatureCollection)
        ));
        assert!(matches!(
            DistrictMap::from_geojson_str("{not json"),
            Err(GeographyError::GeoJson(_))
        ));
    }

    #[test]
    fn missing_file_is_file_access_error() {
        assert!(matches!(
            DistrictMap::load(Path::new("/definitely/not/here.json")),
            Err(GeographyError::FileAccess { .. })
        ));
    }
}
