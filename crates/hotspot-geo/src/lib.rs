//! Hotspot Geo - Distances, nearest-location lookup, and map regions
//!
//! Everything here is pure: no I/O, no clocks, no shared state.

pub mod distance;
pub mod nearest;
pub mod region;

pub use distance::{haversine_distance, EARTH_RADIUS_METERS};
pub use nearest::{find_nearest, Nearest};
pub use region::MapRegion;
