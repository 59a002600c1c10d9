//! Choropleth `GeoJSON` output.
//!
//! Every district polygon becomes a feature whose `count` property is the
//! number of matching dogs, or `null` when the district has none. Markers
//! become `Point` features. Property names follow the simplestyle
//! convention (`fill`, `fill-opacity`, `marker-color`, ...) so the output
//! displays styled in common `GeoJSON` viewers.

use std::collections::BTreeMap;
use std::path::Path;

use dog_map_dog_models::{DistrictCount, DistrictKey};
use dog_map_geography::{DistrictMap, DistrictMarker};
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, feature::Id};

use crate::{MapStyle, RenderError};

/// Builds the choropleth document for one pipeline run.
#[must_use]
pub fn render_choropleth(
    map: &DistrictMap,
    counts: &[DistrictCount],
    markers: &[DistrictMarker],
    style: &MapStyle,
) -> FeatureCollection {
    let by_key: BTreeMap<&DistrictKey, u64> =
        counts.iter().map(|c| (&c.district, c.count)).collect();
    let min = by_key.values().copied().min().unwrap_or(0);
    let max = by_key.values().copied().max().unwrap_or(0);

    let mut features: Vec<Feature> = map
        .districts()
        .iter()
        .map(|district| {
            let count = by_key.get(&district.key).copied();

            let mut props = JsonObject::new();
            props.insert("kind".to_string(), "district".into());
            props.insert("name".to_string(), district.name.clone().into());
            props.insert(
                "count".to_string(),
                count.map_or(JsonValue::Null, JsonValue::from),
            );
            let (fill, opacity) = count.map_or_else(
                || (style.no_data_fill.clone(), style.no_data_opacity),
                |c| (style.fill_for(c, min, max), style.opacity),
            );
            props.insert("fill".to_string(), fill.into());
            props.insert("fill-opacity".to_string(), opacity.into());
            props.insert("stroke".to_string(), style.stroke.clone().into());
            props.insert("stroke-width".to_string(), 1.into());

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(geojson::Value::from(&district.boundary))),
                id: Some(Id::String(district.name.clone())),
                properties: Some(props),
                foreign_members: None,
            }
        })
        .collect();

    features.extend(markers.iter().map(|marker| {
        let mut props = JsonObject::new();
        props.insert("kind".to_string(), "marker".into());
        props.insert("name".to_string(), marker.name.clone().into());
        props.insert("breed".to_string(), marker.breed.clone().into());
        props.insert("title".to_string(), marker.breed.clone().into());
        props.insert(
            "marker-color".to_string(),
            style.marker.color.clone().into(),
        );
        props.insert("marker-size".to_string(), style.marker.size.into());

        let point = geojson::Value::Point(vec![marker.lon, marker.lat]);
        Feature {
            bbox: None,
            geometry: Some(Geometry::new(point)),
            id: None,
            properties: Some(props),
            foreign_members: None,
        }
    }));

    let mut meta = JsonObject::new();
    meta.insert("title".to_string(), style.title.clone().into());
    meta.insert(
        "center".to_string(),
        serde_json::json!({ "lat": style.center.lat, "lon": style.center.lon }),
    );
    meta.insert("zoom".to_string(), style.zoom.into());

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: Some(meta),
    }
}

/// Writes `collection` as pretty-printed `GeoJSON`.
///
/// # Errors
///
/// Returns [`RenderError`] if serialization or the write fails.
pub fn write_geojson(collection: &FeatureCollection, path: &Path) -> Result<(), RenderError> {
    let text = serde_json::to_string_pretty(collection)?;
    std::fs::write(path, text).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Wrote {} features to {}",
        collection.features.len(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISTRICTS: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "properties": { "name": "1" },
      "geometry": { "type": "Polygon", "coordinates": [[[8.0, 47.0], [9.0, 47.0], [9.0, 48.0], [8.0, 48.0], [8.0, 47.0]]] } },
    { "type": "Feature", "properties": { "name": "2" },
      "geometry": { "type": "Polygon", "coordinates": [[[9.0, 47.0], [10.0, 47.0], [10.0, 48.0], [9.0, 48.0], [9.0, 47.0]]] } },
    { "type": "Feature", "properties": { "name": "3" },
      "geometry": { "type": "Polygon", "coordinates": [[[10.0, 47.0], [11.0, 47.0], [11.0, 48.0], [10.0, 48.0], [10.0, 47.0]]] } }
  ]
}"#;

    fn count(district: &str, count: u64) -> DistrictCount {
        DistrictCount {
            district: DistrictKey::new(district),
            count,
        }
    }

    fn prop<'a>(feature: &'a Feature, key: &str) -> &'a JsonValue {
        feature.property(key).unwrap()
    }

    #[test]
    fn absent_districts_have_null_count() {
        let map = DistrictMap::from_geojson_str(DISTRICTS).unwrap();
        let style = MapStyle::default_style();
        let fc = render_choropleth(&map, &[count("1", 4), count("3", 10)], &[], &style);

        assert_eq!(fc.features.len(), 3);
        assert_eq!(prop(&fc.features[0], "count"), &JsonValue::from(4));
        assert_eq!(prop(&fc.features[1], "count"), &JsonValue::Null);
        assert_eq!(prop(&fc.features[1], "fill-opacity"), &JsonValue::from(0.0));
        assert_eq!(prop(&fc.features[2], "count"), &JsonValue::from(10));
    }

    #[test]
    fn fill_follows_the_colour_scale() {
        let map = DistrictMap::from_geojson_str(DISTRICTS).unwrap();
        let style = MapStyle::default_style();
        let fc = render_choropleth(&map, &[count("1", 4), count("3", 10)], &[], &style);

        assert_eq!(prop(&fc.features[0], "fill"), "#f7fbff");
        assert_eq!(prop(&fc.features[2], "fill"), "#08306b");
    }

    #[test]
    fn markers_become_points() {
        let map = DistrictMap::from_geojson_str(DISTRICTS).unwrap();
        let style = MapStyle::default_style();
        let marker = DistrictMarker {
            district: DistrictKey::new("2"),
            name: "2".to_string(),
            lat: 47.5,
            lon: 9.5,
            breed: "Mops".to_string(),
        };
        let fc = render_choropleth(&map, &[count("2", 1)], &[marker], &style);

        let point = &fc.features[3];
        assert_eq!(prop(point, "breed"), "Mops");
        assert_eq!(prop(point, "marker-color"), "#000000");
        match &point.geometry.as_ref().unwrap().value {
            geojson::Value::Point(pos) => assert_eq!(pos, &vec![9.5, 47.5]),
            other => panic!("expected point, got {other:?}"),
        }
    }

    #[test]
    fn no_data_renders_every_district_empty() {
        let map = DistrictMap::from_geojson_str(DISTRICTS).unwrap();
        let fc = render_choropleth(&map, &[], &[], &MapStyle::default_style());
        assert_eq!(fc.features.len(), 3);
        assert!(fc.features.iter().all(|f| prop(f, "count").is_null()));
    }

    #[test]
    fn carries_map_metadata() {
        let map = DistrictMap::from_geojson_str(DISTRICTS).unwrap();
        let fc = render_choropleth(&map, &[], &[], &MapStyle::default_style());
        let meta = fc.foreign_members.unwrap();
        assert_eq!(meta["title"], "Number of Dogs per District");
        assert_eq!(meta["zoom"], 10.8);
    }

    #[test]
    fn written_output_round_trips_as_geojson() {
        let map = DistrictMap::from_geojson_str(DISTRICTS).unwrap();
        let fc = render_choropleth(&map, &[count("1", 2)], &[], &MapStyle::default_style());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.geojson");
        write_geojson(&fc, &path).unwrap();

        let reloaded = DistrictMap::load(&path).unwrap();
        assert_eq!(reloaded.len(), 3);
    }
}
