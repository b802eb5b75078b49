//! Command implementations

mod account;
mod config;
mod favorites;
mod init;
mod locations;
mod report;
mod seed;

use crate::cli::{Cli, Commands, FilterArgs};
use crate::config_loader::{find_workspace_root, load_workspace_config_with_overrides, overrides_from};
use crate::errors;
use crate::output::OutputWriter;
use crate::storage::Storage;
use anyhow::Result;
use hotspot_app::{AppContext, Session};
use hotspot_core::config::{AppSettings, LayeredConfig};
use hotspot_core::models::{CrowdLevel, FilterCriteria};
use std::path::PathBuf;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    if let Commands::Init(ref args) = cli.command {
        return init::execute(args, &output);
    }

    let workspace = Workspace::open(&cli)?;
    match cli.command {
        Commands::Init(_) => Ok(()),
        Commands::Seed(args) => seed::execute(args, &workspace, &output).await,
        Commands::Signup(args) => account::signup(args, &workspace, &output).await,
        Commands::Login(args) => account::login(args, &workspace, &output).await,
        Commands::Logout => account::logout(&workspace, &output).await,
        Commands::Whoami => account::whoami(&workspace, &output),
        Commands::Locations(args) => locations::list(args, &workspace, &output).await,
        Commands::Nearest(args) => locations::nearest(args, &workspace, &output).await,
        Commands::Map(args) => locations::map(args, &workspace, &output).await,
        Commands::Report(args) => report::submit(args, &workspace, &output).await,
        Commands::Reports(args) => report::recent(args, &workspace, &output).await,
        Commands::Favorites(args) => favorites::execute(args, &workspace, &output).await,
        Commands::Config => config::execute(&workspace, &output),
    }
}

/// An opened workspace: resolved configuration plus the persisted backend
pub struct Workspace {
    pub root: PathBuf,
    pub config: LayeredConfig,
    pub storage: Storage,
}

impl Workspace {
    fn open(cli: &Cli) -> Result<Self> {
        let root = find_workspace_root(cli.workspace.as_deref())?;
        let config = load_workspace_config_with_overrides(&root, overrides_from(cli))?;
        let storage = Storage::open(&root)?;
        tracing::debug!("Opened workspace at {}", root.display());
        Ok(Self { root, config, storage })
    }

    pub fn settings(&self) -> AppSettings {
        self.config.settings()
    }

    pub fn context(&self) -> AppContext {
        self.storage.context(self.settings())
    }

    pub fn session(&self) -> Session {
        let context = self.context();
        Session::new(context.auth, context.settings)
    }
}

/// Parse a crowd level given as a label or a level number
pub fn parse_crowd_level(value: &str) -> Result<CrowdLevel> {
    value
        .parse::<CrowdLevel>()
        .map_err(|_| errors::invalid_crowd_level(value).into())
}

impl FilterArgs {
    pub fn criteria(&self) -> Result<FilterCriteria> {
        let mut criteria = FilterCriteria::new();
        if let Some(ref level) = self.crowd_level {
            criteria = criteria.with_crowd_level(parse_crowd_level(level)?);
        }
        if let Some(ref category) = self.category {
            criteria = criteria.with_category(category.clone());
        }
        Ok(criteria)
    }
}
