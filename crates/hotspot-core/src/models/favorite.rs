use serde::{Deserialize, Serialize};

use super::{Location, LocationId};

/// Entry in a user's favorites list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub location_id: LocationId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<&Location> for Favorite {
    fn from(location: &Location) -> Self {
        Self {
            location_id: location.id.clone(),
            name: location.name.clone(),
            description: location.description.clone(),
        }
    }
}
