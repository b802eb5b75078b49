use geo::{coord, Rect};
use hotspot_core::config::AppSettings;
use hotspot_core::models::{Coordinate, Location};
use serde::{Deserialize, Serialize};

use crate::distance::to_point;

/// Visible map area: a center and the span in degrees on each axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    pub fn new(center: Coordinate, delta: f64) -> Self {
        Self { center, latitude_delta: delta, longitude_delta: delta }
    }

    /// Region shown before the device position is known, or when location
    /// permission is denied
    pub fn default_for(settings: &AppSettings) -> Self {
        Self::new(settings.default_center, settings.region_delta)
    }

    /// Same span, moved to `center`
    pub fn recentered(&self, center: Coordinate) -> Self {
        Self { center, ..*self }
    }

    pub fn bounds(&self) -> Rect {
        let half_lat = self.latitude_delta / 2.0;
        let half_lon = self.longitude_delta / 2.0;
        Rect::new(
            coord! { x: self.center.longitude - half_lon, y: self.center.latitude - half_lat },
            coord! { x: self.center.longitude + half_lon, y: self.center.latitude + half_lat },
        )
    }

    /// Whether `coordinate` falls inside the region, edges included
    pub fn contains(&self, coordinate: Coordinate) -> bool {
        let bounds = self.bounds();
        let point = to_point(coordinate);
        point.x() >= bounds.min().x
            && point.x() <= bounds.max().x
            && point.y() >= bounds.min().y
            && point.y() <= bounds.max().y
    }

    /// Locations with coordinates inside the region, in input order
    pub fn visible<'a>(&self, locations: &'a [Location]) -> Vec<&'a Location> {
        locations
            .iter()
            .filter(|l| l.coordinates.is_some_and(|c| self.contains(c)))
            .collect()
    }
}
