//! Crowd level and its label mappings.
//!
//! Reads never fail: anything the backend stores that is not a known level is
//! kept as [`CrowdLevel::Unknown`] and displayed as "Unknown". Writes go
//! through [`CrowdLevel::decode`] or [`CrowdLevel::try_from_level`], which
//! reject unknown input with `InvalidCrowdLevel`.

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HotspotError, Result};

/// How busy a location is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "StoredCrowdLevel", into = "i64")]
pub enum CrowdLevel {
    NotCrowded,
    SomewhatCrowded,
    VeryCrowded,
    /// A stored value outside 0..=2. Unparseable labels are kept as -1.
    Unknown(i64),
}

impl CrowdLevel {
    pub const ALL: [CrowdLevel; 3] =
        [CrowdLevel::NotCrowded, CrowdLevel::SomewhatCrowded, CrowdLevel::VeryCrowded];

    /// Read-side conversion from the stored integer
    pub fn from_level(level: i64) -> Self {
        match level {
            0 => CrowdLevel::NotCrowded,
            1 => CrowdLevel::SomewhatCrowded,
            2 => CrowdLevel::VeryCrowded,
            other => CrowdLevel::Unknown(other),
        }
    }

    /// Write-side conversion from an integer
    pub fn try_from_level(level: i64) -> Result<Self> {
        match Self::from_level(level) {
            CrowdLevel::Unknown(_) => Err(HotspotError::InvalidCrowdLevel {
                value: level.to_string(),
            }),
            known => Ok(known),
        }
    }

    pub fn level(&self) -> i64 {
        match self {
            CrowdLevel::NotCrowded => 0,
            CrowdLevel::SomewhatCrowded => 1,
            CrowdLevel::VeryCrowded => 2,
            CrowdLevel::Unknown(level) => *level,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, CrowdLevel::Unknown(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            CrowdLevel::NotCrowded => "Not Crowded",
            CrowdLevel::SomewhatCrowded => "Somewhat Crowded",
            CrowdLevel::VeryCrowded => "Very Crowded",
            CrowdLevel::Unknown(_) => "Unknown",
        }
    }

    /// Decode a label for a write operation. Case and surrounding whitespace
    /// are ignored.
    pub fn decode(label: &str) -> Result<Self> {
        let normalized = label.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.label().to_lowercase() == normalized)
            .ok_or_else(|| HotspotError::InvalidCrowdLevel {
                value: label.to_string(),
            })
    }

    /// Headline text on the detail view
    pub fn busy_text(&self) -> &'static str {
        match self {
            CrowdLevel::NotCrowded => "Not busy",
            CrowdLevel::SomewhatCrowded => "Somewhat busy",
            CrowdLevel::VeryCrowded => "Very busy",
            CrowdLevel::Unknown(_) => "Unknown",
        }
    }

    /// Map pin color
    pub fn pin_color(&self) -> &'static str {
        match self {
            CrowdLevel::NotCrowded => "green",
            CrowdLevel::SomewhatCrowded => "yellow",
            CrowdLevel::VeryCrowded => "red",
            CrowdLevel::Unknown(_) => "gray",
        }
    }
}

impl fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CrowdLevel {
    type Err = HotspotError;

    fn from_str(s: &str) -> Result<Self> {
        if let Ok(level) = s.trim().parse::<i64>() {
            return Self::try_from_level(level);
        }
        Self::decode(s)
    }
}

impl From<CrowdLevel> for i64 {
    fn from(level: CrowdLevel) -> Self {
        level.level()
    }
}

/// Older reports stored the lowercase label instead of the integer, and some
/// imports wrote the level as a float or left it null
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCrowdLevel {
    Level(i64),
    Float(f64),
    Label(String),
    Other(IgnoredAny),
}

impl From<StoredCrowdLevel> for CrowdLevel {
    fn from(stored: StoredCrowdLevel) -> Self {
        match stored {
            StoredCrowdLevel::Level(level) => CrowdLevel::from_level(level),
            StoredCrowdLevel::Float(value) => {
                if value.is_finite() && value.fract() == 0.0 && value.abs() <= i64::MAX as f64 {
                    CrowdLevel::from_level(value as i64)
                } else {
                    CrowdLevel::Unknown(-1)
                }
            }
            StoredCrowdLevel::Label(label) => {
                CrowdLevel::decode(&label).unwrap_or(CrowdLevel::Unknown(-1))
            }
            StoredCrowdLevel::Other(_) => CrowdLevel::Unknown(-1),
        }
    }
}
