//! Interchange formats for location data

pub mod geojson;

pub use self::geojson::{locations_from_geojson, locations_to_geojson, read_locations};
