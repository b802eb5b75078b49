use crate::error::{HotspotError, Result};
use crate::models::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has at least the current precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() >= self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Resolved settings handed to the view-models
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Required sign-up email suffix, without the `@`
    pub email_domain: String,
    pub recent_window_minutes: u32,
    pub recent_limit: usize,
    pub notification_hold_ms: u64,
    pub notification_fade_ms: u64,
    /// Map center used until (or instead of) the device position
    pub default_center: Coordinate,
    pub region_delta: f64,
}

impl Default for AppSettings {
    fn default() -> Self {
        LayeredConfig::with_defaults().settings()
    }
}

/// Layered configuration for Hotspot
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub email_domain: ConfigValue<String>,
    pub recent_window_minutes: ConfigValue<u32>,
    pub recent_limit: ConfigValue<usize>,
    pub notification_hold_ms: ConfigValue<u64>,
    pub notification_fade_ms: ConfigValue<u64>,
    pub default_latitude: ConfigValue<f64>,
    pub default_longitude: ConfigValue<f64>,
    pub region_delta: ConfigValue<f64>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            email_domain: ConfigValue::new("psu.edu".to_string(), ConfigSource::Default),
            recent_window_minutes: ConfigValue::new(120, ConfigSource::Default),
            recent_limit: ConfigValue::new(20, ConfigSource::Default),
            notification_hold_ms: ConfigValue::new(2000, ConfigSource::Default),
            notification_fade_ms: ConfigValue::new(500, ConfigSource::Default),
            default_latitude: ConfigValue::new(40.7982, ConfigSource::Default),
            default_longitude: ConfigValue::new(-77.8599, ConfigSource::Default),
            region_delta: ConfigValue::new(0.02, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| HotspotError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| HotspotError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(domain) = file_config.email_domain {
            self.email_domain.update(normalize_domain(&domain), ConfigSource::File);
        }
        if let Some(minutes) = file_config.recent_window_minutes {
            self.recent_window_minutes.update(minutes, ConfigSource::File);
        }
        if let Some(limit) = file_config.recent_limit {
            self.recent_limit.update(limit, ConfigSource::File);
        }
        if let Some(hold) = file_config.notification_hold_ms {
            self.notification_hold_ms.update(hold, ConfigSource::File);
        }
        if let Some(fade) = file_config.notification_fade_ms {
            self.notification_fade_ms.update(fade, ConfigSource::File);
        }
        if let Some(map) = file_config.map {
            if let Some(latitude) = map.latitude {
                self.default_latitude.update(latitude, ConfigSource::File);
            }
            if let Some(longitude) = map.longitude {
                self.default_longitude.update(longitude, ConfigSource::File);
            }
            if let Some(delta) = map.delta {
                self.region_delta.update(delta, ConfigSource::File);
            }
        }

        self.validate()?;
        Ok(self)
    }

    /// Load configuration from the file if it exists, otherwise keep the current values
    pub fn load_from_file_if_exists<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        if path.as_ref().exists() {
            self.load_from_file(path)
        } else {
            tracing::debug!("No config file at {}", path.as_ref().display());
            Ok(self)
        }
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // HOTSPOT_EMAIL_DOMAIN
        if let Ok(domain) = env::var("HOTSPOT_EMAIL_DOMAIN") {
            self.email_domain.update(normalize_domain(&domain), ConfigSource::Environment);
        }

        // HOTSPOT_RECENT_WINDOW_MINUTES
        if let Some(minutes) = parse_env::<u32>("HOTSPOT_RECENT_WINDOW_MINUTES", "positive integer") {
            self.recent_window_minutes.update(minutes, ConfigSource::Environment);
        }

        // HOTSPOT_RECENT_LIMIT
        if let Some(limit) = parse_env::<usize>("HOTSPOT_RECENT_LIMIT", "positive integer") {
            self.recent_limit.update(limit, ConfigSource::Environment);
        }

        // HOTSPOT_NOTIFICATION_HOLD_MS
        if let Some(hold) = parse_env::<u64>("HOTSPOT_NOTIFICATION_HOLD_MS", "milliseconds") {
            self.notification_hold_ms.update(hold, ConfigSource::Environment);
        }

        // HOTSPOT_NOTIFICATION_FADE_MS
        if let Some(fade) = parse_env::<u64>("HOTSPOT_NOTIFICATION_FADE_MS", "milliseconds") {
            self.notification_fade_ms.update(fade, ConfigSource::Environment);
        }

        // HOTSPOT_DEFAULT_LATITUDE / HOTSPOT_DEFAULT_LONGITUDE
        if let Some(latitude) = parse_env::<f64>("HOTSPOT_DEFAULT_LATITUDE", "degrees") {
            self.default_latitude.update(latitude, ConfigSource::Environment);
        }
        if let Some(longitude) = parse_env::<f64>("HOTSPOT_DEFAULT_LONGITUDE", "degrees") {
            self.default_longitude.update(longitude, ConfigSource::Environment);
        }

        // HOTSPOT_REGION_DELTA
        if let Some(delta) = parse_env::<f64>("HOTSPOT_REGION_DELTA", "degrees") {
            self.region_delta.update(delta, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(domain) = overrides.email_domain {
            self.email_domain.update(normalize_domain(&domain), ConfigSource::Cli);
        }

        if let Some(minutes) = overrides.recent_window_minutes {
            self.recent_window_minutes.update(minutes, ConfigSource::Cli);
        }

        if let Some(limit) = overrides.recent_limit {
            self.recent_limit.update(limit, ConfigSource::Cli);
        }
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<()> {
        let center = Coordinate::new(self.default_latitude.value, self.default_longitude.value);
        if !center.is_valid() {
            return Err(HotspotError::ConfigInvalid {
                key: "map".to_string(),
                reason: format!(
                    "default center ({}, {}) is out of range",
                    center.latitude, center.longitude
                ),
            });
        }
        let delta = self.region_delta.value;
        if !(delta > 0.0 && delta.is_finite()) {
            return Err(HotspotError::ConfigInvalid {
                key: "map.delta".to_string(),
                reason: format!("region span must be a positive number of degrees, got {}", delta),
            });
        }
        if self.recent_limit.value == 0 {
            return Err(HotspotError::ConfigInvalid {
                key: "recent_limit".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.email_domain.value.is_empty() {
            return Err(HotspotError::ConfigMissing { key: "email_domain".to_string() });
        }
        Ok(())
    }

    pub fn settings(&self) -> AppSettings {
        AppSettings {
            email_domain: self.email_domain.value.clone(),
            recent_window_minutes: self.recent_window_minutes.value,
            recent_limit: self.recent_limit.value,
            notification_hold_ms: self.notification_hold_ms.value,
            notification_fade_ms: self.notification_fade_ms.value,
            default_center: Coordinate::new(self.default_latitude.value, self.default_longitude.value),
            region_delta: self.region_delta.value,
        }
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "email_domain".to_string(),
            (format!("@{}", self.email_domain.value), self.email_domain.source),
        );
        map.insert(
            "recent_window_minutes".to_string(),
            (self.recent_window_minutes.value.to_string(), self.recent_window_minutes.source),
        );
        map.insert(
            "recent_limit".to_string(),
            (self.recent_limit.value.to_string(), self.recent_limit.source),
        );
        map.insert(
            "notification_hold_ms".to_string(),
            (self.notification_hold_ms.value.to_string(), self.notification_hold_ms.source),
        );
        map.insert(
            "notification_fade_ms".to_string(),
            (self.notification_fade_ms.value.to_string(), self.notification_fade_ms.source),
        );
        map.insert(
            "map.latitude".to_string(),
            (self.default_latitude.value.to_string(), self.default_latitude.source),
        );
        map.insert(
            "map.longitude".to_string(),
            (self.default_longitude.value.to_string(), self.default_longitude.source),
        );
        map.insert(
            "map.delta".to_string(),
            (self.region_delta.value.to_string(), self.region_delta.source),
        );

        map
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, expected: &str) -> Option<T> {
    let raw = env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!("Invalid {} value '{}': expected {}", key, raw, expected);
            None
        }
    }
}

/// Strip a leading `@` so "@psu.edu" and "psu.edu" mean the same thing
pub fn normalize_domain(domain: &str) -> String {
    domain.trim().trim_start_matches('@').to_lowercase()
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    email_domain: Option<String>,
    recent_window_minutes: Option<u32>,
    recent_limit: Option<usize>,
    notification_hold_ms: Option<u64>,
    notification_fade_ms: Option<u64>,
    map: Option<FileMapConfig>,
}

#[derive(Debug, Deserialize, Serialize)]
struct FileMapConfig {
    latitude: Option<f64>,
    longitude: Option<f64>,
    delta: Option<f64>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub email_domain: Option<String>,
    pub recent_window_minutes: Option<u32>,
    pub recent_limit: Option<usize>,
}
