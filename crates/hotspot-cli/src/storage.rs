use crate::config_loader::WORKSPACE_DIR;
use anyhow::{Context, Result};
use hotspot_app::AppContext;
use hotspot_core::config::AppSettings;
use hotspot_store::memory::MemoryBackend;
use std::path::{Path, PathBuf};

pub const STATE_FILE: &str = "state.json";

/// The workspace's backend, loaded from and saved back to `.hotspot/state.json`
pub struct Storage {
    pub backend: MemoryBackend,
    state_path: PathBuf,
}

impl Storage {
    pub fn open(workspace_root: &Path) -> Result<Self> {
        let state_path = workspace_root.join(WORKSPACE_DIR).join(STATE_FILE);
        let backend = MemoryBackend::load(&state_path)
            .with_context(|| format!("Failed to load backend state from {}", state_path.display()))?;
        tracing::debug!("Backend state loaded from {}", state_path.display());
        Ok(Self { backend, state_path })
    }

    /// Screen context over this backend
    pub fn context(&self, settings: AppSettings) -> AppContext {
        AppContext::from_memory(&self.backend, settings)
    }

    pub fn save(&self) -> Result<()> {
        self.backend
            .save(&self.state_path)
            .with_context(|| format!("Failed to save backend state to {}", self.state_path.display()))
    }
}
