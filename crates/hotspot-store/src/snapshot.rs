//! JSON snapshots of the in-memory backend
//!
//! The CLI keeps its backend state in a workspace file between invocations.
//! Blob contents are hex-encoded.

use hotspot_core::error::{HotspotError, Result};
use hotspot_core::models::{Favorite, Location, Report, UserId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::memory::{AccountRecord, Blob, MemoryBackend};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlobRecord {
    pub content_type: String,
    pub hex: String,
}

/// Serializable state of a [`MemoryBackend`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSnapshot {
    pub version: u32,
    #[serde(default)]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(default)]
    pub favorites: BTreeMap<UserId, Vec<Favorite>>,
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
    #[serde(default)]
    pub session: Option<UserId>,
    #[serde(default)]
    pub blobs: BTreeMap<String, BlobRecord>,
}

impl Default for BackendSnapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            locations: Vec::new(),
            reports: Vec::new(),
            favorites: BTreeMap::new(),
            accounts: Vec::new(),
            session: None,
            blobs: BTreeMap::new(),
        }
    }
}

impl MemoryBackend {
    /// Capture the full backend state
    pub fn snapshot(&self) -> BackendSnapshot {
        use crate::ports::AuthProvider;

        BackendSnapshot {
            version: SNAPSHOT_VERSION,
            locations: self.documents.locations_now(),
            reports: self.documents.all_reports(),
            favorites: self.documents.all_favorites().into_iter().collect(),
            accounts: self.auth.accounts(),
            session: self.auth.current_user().map(|u| u.id),
            blobs: self
                .blobs
                .all_blobs()
                .into_iter()
                .map(|(path, blob)| {
                    (path, BlobRecord { content_type: blob.content_type, hex: hex::encode(blob.bytes) })
                })
                .collect(),
        }
    }

    /// Replace the backend state with `snapshot`
    pub fn restore(&self, snapshot: BackendSnapshot) -> Result<()> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(HotspotError::Serialization(format!(
                "Unsupported snapshot version {} (expected {})",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }

        let blobs = snapshot
            .blobs
            .into_iter()
            .map(|(path, record)| {
                let bytes = hex::decode(&record.hex).map_err(|e| {
                    HotspotError::Serialization(format!("Invalid blob data at {}: {}", path, e))
                })?;
                Ok((path, Blob { bytes, content_type: record.content_type }))
            })
            .collect::<Result<HashMap<_, _>>>()?;

        self.documents.restore(
            snapshot.locations,
            snapshot.reports,
            snapshot.favorites.into_iter().collect(),
        );
        self.auth.restore(snapshot.accounts, snapshot.session);
        self.blobs.restore(blobs);
        Ok(())
    }

    /// Load a backend from a snapshot file; a missing file gives an empty backend
    pub fn load(path: &Path) -> Result<Self> {
        let backend = Self::new();
        if !path.exists() {
            tracing::debug!("No snapshot at {}, starting empty", path.display());
            return Ok(backend);
        }

        let content = fs::read_to_string(path)?;
        let snapshot: BackendSnapshot = serde_json::from_str(&content)?;
        backend.restore(snapshot)?;
        Ok(backend)
    }

    /// Write the backend state to `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        fs::write(path, json)?;
        tracing::debug!("Snapshot written to {}", path.display());
        Ok(())
    }
}
