//! Error types for Hotspot

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Device capability the app asks the user for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Permission {
    Camera,
    Location,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Camera => write!(f, "camera"),
            Permission::Location => write!(f, "location"),
        }
    }
}

/// Reason an authentication attempt was rejected by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthFailure {
    UserNotFound,
    WrongPassword,
    InvalidEmail,
    EmailAlreadyInUse,
    WeakPassword,
    Other(String),
}

impl AuthFailure {
    /// Message shown to the user for this failure.
    ///
    /// Unrecognized reasons get `fallback`, which differs between the
    /// sign-in and sign-up flows.
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            AuthFailure::UserNotFound => "No account for that email.",
            AuthFailure::WrongPassword => "Incorrect password.",
            AuthFailure::InvalidEmail => "Invalid email address.",
            AuthFailure::EmailAlreadyInUse => "That email is already registered.",
            AuthFailure::WeakPassword => "Password needs at least 6 characters.",
            AuthFailure::Other(_) => fallback,
        }
    }

    /// Backend reason code, in the `auth/<reason>` form
    pub fn code(&self) -> &str {
        match self {
            AuthFailure::UserNotFound => "auth/user-not-found",
            AuthFailure::WrongPassword => "auth/wrong-password",
            AuthFailure::InvalidEmail => "auth/invalid-email",
            AuthFailure::EmailAlreadyInUse => "auth/email-already-in-use",
            AuthFailure::WeakPassword => "auth/weak-password",
            AuthFailure::Other(code) => code,
        }
    }
}

impl fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Error)]
pub enum HotspotError {
    // Permission errors
    #[error("Permission to access {permission} was denied")]
    PermissionDenied { permission: Permission },

    // Backend errors
    #[error("Backend operation '{operation}' failed: {reason}")]
    Backend { operation: String, reason: String },

    #[error("Photo upload failed: {reason}")]
    UploadFailed { reason: String },

    // Authentication errors
    #[error("Authentication failed: {0}")]
    Auth(AuthFailure),

    #[error("Not signed in")]
    NotSignedIn,

    // Domain errors
    #[error("Invalid crowd level: {value}")]
    InvalidCrowdLevel { value: String },

    #[error("Invalid coordinate ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error("Location not found: {id}")]
    LocationNotFound { id: String },

    #[error("{field}: {reason}")]
    Validation { field: String, reason: String },

    // Configuration errors
    #[error("Missing required configuration: {key}")]
    ConfigMissing { key: String },

    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl HotspotError {
    pub fn backend(operation: impl Into<String>, reason: impl fmt::Display) -> Self {
        HotspotError::Backend {
            operation: operation.into(),
            reason: reason.to_string(),
        }
    }

    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        HotspotError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether the user can retry the same action without changing input
    pub fn is_retryable(&self) -> bool {
        matches!(self, HotspotError::Backend { .. } | HotspotError::UploadFailed { .. })
    }
}

impl From<serde_json::Error> for HotspotError {
    fn from(err: serde_json::Error) -> Self {
        HotspotError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, HotspotError>;
