use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{HotspotError, Result};

/// A WGS 84 position in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check that latitude is within [-90, 90] and longitude within [-180, 180]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(HotspotError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

/// Stored coordinates where either component may be absent
#[derive(Deserialize)]
struct PartialCoordinate {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

/// Deserialize optional coordinates, collapsing a half-populated value to `None`
pub(crate) fn deserialize_optional<'de, D>(deserializer: D) -> std::result::Result<Option<Coordinate>, D::Error>
where
    D: Deserializer<'de>,
{
    let partial = Option::<PartialCoordinate>::deserialize(deserializer)?;
    Ok(partial.and_then(|p| match (p.latitude, p.longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinate { latitude, longitude }),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ranges() {
        assert!(Coordinate::new(40.7982, -77.8599).validate().is_ok());
        assert!(Coordinate::new(90.0, 180.0).validate().is_ok());
        assert!(Coordinate::new(90.1, 0.0).validate().is_err());
        assert!(Coordinate::new(0.0, -180.5).validate().is_err());
        assert!(Coordinate::new(f64::NAN, 0.0).validate().is_err());
    }
}
