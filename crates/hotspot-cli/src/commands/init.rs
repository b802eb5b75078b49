//! Init command implementation

use crate::cli::InitArgs;
use crate::config_loader::WORKSPACE_DIR;
use crate::output::OutputWriter;
use crate::output_types::InitOutput;
use crate::storage::STATE_FILE;
use anyhow::{bail, Context, Result};
use hotspot_store::memory::MemoryBackend;
use std::fs;

const CONFIG_TEMPLATE: &str = r#"# Hotspot Workspace Configuration
#
# Every key can also be set with a HOTSPOT_* environment variable
# (e.g. HOTSPOT_EMAIL_DOMAIN) or a command-line flag, which take precedence.

# Sign-up emails must end with @<email_domain>
email_domain = "psu.edu"

# Recent reports window on the detail view
recent_window_minutes = 120
recent_limit = 20

# Submission notification timing
notification_hold_ms = 2000
notification_fade_ms = 500

# Map region used when the device position is unknown
[map]
latitude = 40.7982
longitude = -77.8599
delta = 0.02
"#;

pub fn execute(args: &InitArgs, output: &OutputWriter) -> Result<()> {
    let hotspot_dir = args.path.join(WORKSPACE_DIR);
    if hotspot_dir.exists() && !args.force {
        bail!(
            "Workspace already exists at {}. Use --force to overwrite",
            args.path.display()
        );
    }

    fs::create_dir_all(&hotspot_dir).context("Failed to create .hotspot directory")?;

    let config_path = hotspot_dir.join("config.toml");
    fs::write(&config_path, CONFIG_TEMPLATE).context("Failed to write config.toml")?;

    let state_path = hotspot_dir.join(STATE_FILE);
    MemoryBackend::new()
        .save(&state_path)
        .context("Failed to write initial backend state")?;

    tracing::info!("Initialized workspace at {}", args.path.display());

    if output.is_json() {
        output.result(InitOutput {
            workspace_path: args.path.display().to_string(),
            config_path: config_path.display().to_string(),
            state_path: state_path.display().to_string(),
        })?;
    } else {
        output.success(format!("Initialized Hotspot workspace at {}", args.path.display()));
        output.kv("Config", config_path.display());
        output.kv("State", state_path.display());
        output.info("Next: import locations with 'hotspot seed <FILE>'");
    }

    Ok(())
}
