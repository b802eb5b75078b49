use hotspot_app::screens::detail::ReportRow;
use hotspot_app::screens::map::MapPin;
use hotspot_core::config::ConfigSource;
use hotspot_core::models::{Favorite, Location, User};
use serde::Serialize;
use tabled::Tabled;

fn or_dash(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

/// Output for init command
#[derive(Debug, Serialize)]
pub struct InitOutput {
    pub workspace_path: String,
    pub config_path: String,
    pub state_path: String,
}

/// Output for seed command
#[derive(Debug, Serialize)]
pub struct SeedOutput {
    pub source: String,
    pub imported: usize,
    pub without_coordinates: usize,
    pub total_locations: usize,
}

/// Output for signup / login / whoami
#[derive(Debug, Serialize)]
pub struct UserOutput {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub author_name: String,
}

impl From<&User> for UserOutput {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            author_name: user.author_name(),
        }
    }
}

/// One row of the locations table
#[derive(Debug, Serialize, Tabled)]
pub struct LocationRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Crowd Level")]
    pub crowd_level: String,
    #[tabled(rename = "Category")]
    pub category: String,
    #[tabled(rename = "Pin")]
    pub color: String,
    #[tabled(rename = "Position")]
    pub position: String,
}

impl From<&Location> for LocationRow {
    fn from(location: &Location) -> Self {
        Self {
            id: location.id.to_string(),
            name: location.name.clone(),
            crowd_level: location.crowd_level.label().to_string(),
            category: location.category.clone(),
            color: location.crowd_level.pin_color().to_string(),
            position: location
                .coordinates
                .map(|c| format!("{:.5}, {:.5}", c.latitude, c.longitude))
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Output for nearest command
#[derive(Debug, Serialize)]
pub struct NearestOutput {
    pub location_id: String,
    pub name: String,
    pub distance_meters: f64,
    pub crowd_level: String,
}

/// Output for map command
#[derive(Debug, Serialize)]
pub struct MapOutput {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
    pub error: Option<String>,
    pub pins: Vec<MapPin>,
    pub geojson_path: Option<String>,
}

/// Output for report command
#[derive(Debug, Serialize)]
pub struct ReportOutput {
    pub report_id: String,
    pub location: Option<String>,
    pub crowd_level: String,
    pub author_name: String,
    pub photo_url: Option<String>,
    pub notification: String,
}

/// One row of the recent reports table
#[derive(Debug, Serialize, Tabled)]
pub struct RecentReportRow {
    #[tabled(rename = "Report")]
    pub heading: String,
    #[tabled(rename = "Level")]
    pub color: String,
    #[tabled(rename = "Info")]
    pub additional_info: String,
    #[tabled(rename = "Photo")]
    pub photo_url: String,
}

impl From<ReportRow> for RecentReportRow {
    fn from(row: ReportRow) -> Self {
        Self {
            heading: row.heading,
            color: row.color.to_string(),
            additional_info: or_dash(&row.additional_info),
            photo_url: or_dash(&row.photo_url),
        }
    }
}

/// Output for reports command
#[derive(Debug, Serialize)]
pub struct ReportsOutput {
    pub location_id: String,
    pub location_name: String,
    pub headline: String,
    pub reports: Vec<RecentReportRow>,
}

/// One row of the favorites table
#[derive(Debug, Serialize, Tabled)]
pub struct FavoriteRow {
    #[tabled(rename = "ID")]
    pub location_id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Description")]
    pub description: String,
}

impl From<&Favorite> for FavoriteRow {
    fn from(favorite: &Favorite) -> Self {
        Self {
            location_id: favorite.location_id.to_string(),
            name: favorite.name.clone(),
            description: or_dash(&favorite.description),
        }
    }
}

/// One row of the config table
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

impl ConfigRow {
    pub fn new(key: String, value: String, source: ConfigSource) -> Self {
        Self {
            key,
            value,
            source: format!("{:?}", source),
        }
    }
}
