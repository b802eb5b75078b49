//! Configuration loading utilities for CLI commands

use crate::cli::Cli;
use crate::errors;
use anyhow::{Context, Result};
use hotspot_core::config::{CliConfigOverrides, LayeredConfig};
use std::path::{Path, PathBuf};

pub const WORKSPACE_DIR: &str = ".hotspot";

/// Load layered configuration for a workspace
pub fn load_workspace_config(workspace_root: &Path) -> Result<LayeredConfig> {
    let config_path = workspace_root.join(WORKSPACE_DIR).join("config.toml");

    let config = LayeredConfig::with_defaults()
        .load_from_file_if_exists(&config_path)
        .context("Failed to load configuration file")?
        .load_from_env();

    Ok(config)
}

/// Load layered configuration with CLI overrides
pub fn load_workspace_config_with_overrides(
    workspace_root: &Path,
    overrides: CliConfigOverrides,
) -> Result<LayeredConfig> {
    let mut config = load_workspace_config(workspace_root)?;
    config.update_from_cli(overrides);
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Overrides given as global CLI flags
pub fn overrides_from(cli: &Cli) -> CliConfigOverrides {
    CliConfigOverrides {
        email_domain: cli.email_domain.clone(),
        recent_window_minutes: cli.recent_window,
        recent_limit: cli.recent_limit,
    }
}

/// Find the workspace root: the explicit directory if given, otherwise the
/// nearest ancestor of the current directory holding a .hotspot directory
pub fn find_workspace_root(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(root) = explicit {
        if root.join(WORKSPACE_DIR).is_dir() {
            return Ok(root.to_path_buf());
        }
        return Err(errors::workspace_not_found().into());
    }

    let mut current = std::env::current_dir()?;
    loop {
        if current.join(WORKSPACE_DIR).is_dir() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(errors::workspace_not_found().into());
        }
    }
}
