use geo::Point;
use hotspot_core::models::Coordinate;

/// Mean Earth radius used for report distances
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Convert to a `geo` point (x = longitude, y = latitude)
pub fn to_point(coordinate: Coordinate) -> Point {
    Point::new(coordinate.longitude, coordinate.latitude)
}

/// Great-circle distance in meters between two coordinates.
///
/// Symmetric in its arguments. Inputs are not range-checked.
pub fn haversine_distance(a: Coordinate, b: Coordinate) -> f64 {
    let (p1, p2) = (to_point(a), to_point(b));
    let lat1 = p1.y().to_radians();
    let lat2 = p2.y().to_radians();
    let d_lat = (p2.y() - p1.y()).to_radians();
    let d_lon = (p2.x() - p1.x()).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Clamp guards against h drifting past 1.0 for antipodal points
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_METERS * c
}
