use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Hotspot - Campus crowd reporting
#[derive(Parser, Debug)]
#[command(name = "hotspot")]
#[command(about = "Campus crowd reporting from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Workspace directory (defaults to the nearest parent with a .hotspot directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Required sign-up email domain, e.g. psu.edu
    #[arg(long, global = true, value_name = "DOMAIN")]
    pub email_domain: Option<String>,

    /// How far back the recent reports list looks, in minutes
    #[arg(long, global = true, value_name = "MINUTES")]
    pub recent_window: Option<u32>,

    /// Maximum number of recent reports to show
    #[arg(long, global = true, value_name = "N")]
    pub recent_limit: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new Hotspot workspace
    Init(InitArgs),

    /// Import campus locations from a GeoJSON file
    Seed(SeedArgs),

    /// Create an account and sign in
    Signup(SignupArgs),

    /// Sign in to an existing account
    Login(LoginArgs),

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List locations with their crowd levels
    Locations(LocationsArgs),

    /// Find the location closest to a position
    Nearest(PositionArgs),

    /// Show the map region and export pins as GeoJSON
    Map(MapArgs),

    /// Submit a crowd report for the nearest location
    Report(ReportArgs),

    /// Show recent reports for a location
    Reports(ReportsArgs),

    /// Manage favorites
    Favorites(FavoritesArgs),

    /// Show resolved configuration and where each value came from
    Config,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Workspace directory path (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Force overwrite if workspace already exists
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// GeoJSON FeatureCollection of locations
    pub path: PathBuf,

    /// Replace all existing locations instead of merging by id
    #[arg(long)]
    pub replace: bool,
}

#[derive(Args, Debug)]
pub struct SignupArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Name shown on reports
    #[arg(long)]
    pub name: String,

    /// Password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args, Debug, Clone, Copy)]
pub struct PositionArgs {
    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only show locations at this crowd level ("not crowded", "1", ...)
    #[arg(long)]
    pub crowd_level: Option<String>,

    /// Only show locations in this category
    #[arg(long)]
    pub category: Option<String>,
}

#[derive(Args, Debug)]
pub struct LocationsArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Args, Debug)]
pub struct MapArgs {
    /// Device latitude; the default campus region is used when omitted
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Device longitude
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Write the pins as GeoJSON to this file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    /// Crowd level ("not crowded", "somewhat crowded", "very crowded" or 0-2)
    #[arg(long)]
    pub level: String,

    /// Additional comment
    #[arg(long)]
    pub info: Option<String>,

    /// Photo to attach
    #[arg(long)]
    pub photo: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ReportsArgs {
    /// Location id
    pub location_id: String,
}

#[derive(Args, Debug)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: Option<FavoritesCommand>,
}

#[derive(Subcommand, Debug)]
pub enum FavoritesCommand {
    /// List favorites (default)
    List,

    /// Add a location to favorites
    Add {
        /// Location id
        location_id: String,
    },

    /// Remove a location from favorites
    Remove {
        /// Location id
        location_id: String,
    },
}
