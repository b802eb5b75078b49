use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Coordinate, CrowdLevel};

/// Backend-assigned location identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A campus location shown on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: LocationId,

    pub name: String,

    /// `None` when the stored record lacks either component
    #[serde(default, deserialize_with = "super::coordinate::deserialize_optional")]
    pub coordinates: Option<Coordinate>,

    #[serde(default = "unknown_crowd_level")]
    pub crowd_level: CrowdLevel,

    /// Kind of place, e.g. "gym", "study", "dining".
    /// Older records used `type` or `locationType` for the same field.
    #[serde(default, alias = "type", alias = "locationType")]
    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn unknown_crowd_level() -> CrowdLevel {
    CrowdLevel::Unknown(-1)
}

impl Location {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        coordinates: Coordinate,
        crowd_level: CrowdLevel,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: LocationId::new(id),
            name: name.into(),
            coordinates: Some(coordinates),
            crowd_level,
            category: category.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Copy of the identifying fields, embedded in reports at submission time
    pub fn snapshot(&self) -> LocationSnapshot {
        LocationSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            coordinates: self.coordinates,
        }
    }
}

/// Denormalized location captured inside a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    pub id: LocationId,
    pub name: String,
    #[serde(default, deserialize_with = "super::coordinate::deserialize_optional")]
    pub coordinates: Option<Coordinate>,
}
