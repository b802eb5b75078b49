//! GeoJSON import and export of campus locations
//!
//! Import expects a FeatureCollection of Point features whose properties
//! carry `name`, `crowdLevel`, `category` (or the legacy `type` /
//! `locationType`) and an optional `description`. The feature id, or an `id`
//! property, becomes the location id. Export adds `label` and `color`
//! properties so the collection can be dropped straight onto a web map.

use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value};
use serde_json::json;
use std::fs;
use std::path::Path;

use crate::error::{HotspotError, Result};
use crate::models::{Coordinate, CrowdLevel, Location, LocationId};

/// Read locations from a GeoJSON file
pub fn read_locations(path: &Path) -> Result<Vec<Location>> {
    let content = fs::read_to_string(path)?;
    locations_from_geojson(&content)
}

/// Parse locations from GeoJSON text
pub fn locations_from_geojson(content: &str) -> Result<Vec<Location>> {
    let geojson: GeoJson = content
        .parse()
        .map_err(|e| HotspotError::Serialization(format!("Failed to parse GeoJSON: {}", e)))?;

    match geojson {
        GeoJson::FeatureCollection(fc) => fc
            .features
            .iter()
            .enumerate()
            .map(|(idx, feature)| convert_feature(feature, idx))
            .collect(),
        GeoJson::Feature(feature) => Ok(vec![convert_feature(&feature, 0)?]),
        GeoJson::Geometry(_) => Err(HotspotError::Serialization(
            "Expected a Feature or FeatureCollection, found a bare geometry".to_string(),
        )),
    }
}

fn convert_feature(feature: &Feature, idx: usize) -> Result<Location> {
    let empty = JsonObject::new();
    let properties = feature.properties.as_ref().unwrap_or(&empty);

    let id = feature
        .id
        .as_ref()
        .map(|id| match id {
            geojson::feature::Id::String(s) => s.clone(),
            geojson::feature::Id::Number(n) => n.to_string(),
        })
        .or_else(|| properties.get("id").and_then(|v| v.as_str()).map(String::from))
        .unwrap_or_else(|| idx.to_string());

    let name = properties
        .get("name")
        .and_then(|v| v.as_str())
        .map(String::from)
        .ok_or_else(|| HotspotError::Serialization(format!("Feature {} has no name", id)))?;

    let coordinates = feature.geometry.as_ref().and_then(|geometry| match &geometry.value {
        Value::Point(position) if position.len() >= 2 => {
            Some(Coordinate::new(position[1], position[0]))
        }
        _ => None,
    });
    if coordinates.is_none() {
        tracing::debug!("Feature {} has no point geometry; it will not be used for nearest lookups", id);
    }

    let crowd_level = match properties.get("crowdLevel") {
        Some(value) => serde_json::from_value::<CrowdLevel>(value.clone())?,
        None => CrowdLevel::Unknown(-1),
    };

    let category = ["category", "type", "locationType"]
        .iter()
        .find_map(|key| properties.get(*key).and_then(|v| v.as_str()))
        .unwrap_or_default()
        .to_string();

    let description = properties.get("description").and_then(|v| v.as_str()).map(String::from);

    Ok(Location {
        id: LocationId(id),
        name,
        coordinates,
        crowd_level,
        category,
        description,
    })
}

/// Build a FeatureCollection for map rendering
pub fn locations_to_geojson(locations: &[Location]) -> GeoJson {
    let features = locations
        .iter()
        .map(|location| {
            let mut properties = JsonObject::new();
            properties.insert("name".to_string(), json!(location.name));
            properties.insert("crowdLevel".to_string(), json!(location.crowd_level.level()));
            properties.insert("label".to_string(), json!(location.crowd_level.label()));
            properties.insert("color".to_string(), json!(location.crowd_level.pin_color()));
            properties.insert("category".to_string(), json!(location.category));
            if let Some(ref description) = location.description {
                properties.insert("description".to_string(), json!(description));
            }

            Feature {
                bbox: None,
                geometry: location
                    .coordinates
                    .map(|c| Geometry::new(Value::Point(vec![c.longitude, c.latitude]))),
                id: Some(geojson::feature::Id::String(location.id.0.clone())),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}
