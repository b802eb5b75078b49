use serde::{Deserialize, Serialize};

use super::{CrowdLevel, Location};

/// User-selected map filters. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub crowd_level: Option<CrowdLevel>,
    #[serde(default, alias = "type", alias = "locationType")]
    pub category: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_crowd_level(mut self, level: CrowdLevel) -> Self {
        self.crowd_level = Some(level);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.crowd_level.is_none() && self.category.is_none()
    }

    /// Both predicates must hold when both are set
    pub fn matches(&self, location: &Location) -> bool {
        if let Some(level) = self.crowd_level {
            if location.crowd_level != level {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if &location.category != category {
                return false;
            }
        }
        true
    }
}
