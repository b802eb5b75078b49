//! Device capability ports: position and camera
//!
//! Screens ask for permission before using either capability. A denied
//! permission degrades the feature instead of failing the screen.

use async_trait::async_trait;
use hotspot_core::error::{HotspotError, Permission, Result};
use hotspot_core::models::Coordinate;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// A captured photo ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl Photo {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self { file_name, bytes, content_type }
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name.rsplit('.').next().unwrap_or_default().to_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "heic" => "image/heic",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Port for the device position
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;

    async fn current_position(&self) -> Result<Coordinate>;
}

/// Port for the device camera
#[async_trait]
pub trait Camera: Send + Sync {
    async fn request_permission(&self) -> PermissionStatus;

    /// Take a picture; `None` when the user cancels
    async fn capture(&self) -> Result<Option<Photo>>;
}

/// Position source with a fixed answer; `None` behaves as a denied permission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(pub Option<Coordinate>);

#[async_trait]
impl LocationProvider for FixedPosition {
    async fn request_permission(&self) -> PermissionStatus {
        if self.0.is_some() {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        }
    }

    async fn current_position(&self) -> Result<Coordinate> {
        self.0.ok_or(HotspotError::PermissionDenied { permission: Permission::Location })
    }
}

/// Camera that "captures" an image file from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCamera {
    pub path: Option<PathBuf>,
}

impl FileCamera {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }
}

#[async_trait]
impl Camera for FileCamera {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Granted
    }

    async fn capture(&self) -> Result<Option<Photo>> {
        let Some(ref path) = self.path else {
            return Ok(None);
        };
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("photo.jpg")
            .to_string();
        Ok(Some(Photo::new(file_name, bytes)))
    }
}

/// Camera whose permission is always refused
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedCamera;

#[async_trait]
impl Camera for DeniedCamera {
    async fn request_permission(&self) -> PermissionStatus {
        PermissionStatus::Denied
    }

    async fn capture(&self) -> Result<Option<Photo>> {
        Err(HotspotError::PermissionDenied { permission: Permission::Camera })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_from_extension() {
        assert_eq!(Photo::new("IMG_001.JPG", vec![]).content_type, "image/jpeg");
        assert_eq!(Photo::new("shot.png", vec![]).content_type, "image/png");
        assert_eq!(Photo::new("blob", vec![]).content_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn test_fixed_position_without_fix_is_denied() {
        let provider = FixedPosition(None);
        assert_eq!(provider.request_permission().await, PermissionStatus::Denied);
        assert!(provider.current_position().await.is_err());
    }
}
