//! Location commands: locations, nearest, map

use super::Workspace;
use crate::cli::{LocationsArgs, MapArgs, PositionArgs};
use crate::output::OutputWriter;
use crate::output_types::{LocationRow, MapOutput, NearestOutput};
use anyhow::{bail, Context, Result};
use hotspot_app::device::FixedPosition;
use hotspot_app::screens::MapScreen;
use hotspot_core::formats::geojson::locations_to_geojson;
use hotspot_core::models::{Coordinate, FilterCriteria};
use hotspot_geo::find_nearest;
use hotspot_store::ports::DocumentStore;
use std::fs;

impl PositionArgs {
    pub fn coordinate(&self) -> Result<Coordinate> {
        let coordinate = Coordinate::new(self.lat, self.lon);
        coordinate.validate()?;
        Ok(coordinate)
    }
}

/// Activate a map screen and wait for the first locations snapshot
async fn open_map(
    workspace: &Workspace,
    position: Option<Coordinate>,
    criteria: FilterCriteria,
) -> MapScreen {
    let mut screen = MapScreen::new(workspace.context());
    screen.activate(&FixedPosition(position)).await;
    screen.wait_snapshots(1).await;
    screen.set_crowd_filter(criteria.crowd_level);
    screen.set_category_filter(criteria.category);
    screen
}

pub async fn list(args: LocationsArgs, workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let criteria = args.filter.criteria()?;
    let mut screen = open_map(workspace, None, criteria).await;
    let state = screen.snapshot();
    screen.deactivate();

    let rows: Vec<LocationRow> = state.visible_locations().iter().map(LocationRow::from).collect();
    if !output.is_json() {
        output.section(format!("Locations ({} of {})", rows.len(), state.locations.len()));
    }
    output.table(rows)
}

pub async fn nearest(args: PositionArgs, workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let position = args.coordinate()?;
    let locations = workspace.context().documents.list_locations().await?;

    let Some(found) = find_nearest(position, &locations) else {
        bail!("No locations with coordinates. Import some with 'hotspot seed <FILE>'");
    };

    if output.is_json() {
        output.result(NearestOutput {
            location_id: found.location.id.to_string(),
            name: found.location.name.clone(),
            distance_meters: found.distance_meters,
            crowd_level: found.location.crowd_level.label().to_string(),
        })?;
    } else {
        output.success(format!("Nearest location: {}", found.location.name));
        output.kv("ID", &found.location.id);
        output.kv("Distance", format!("{:.0} m", found.distance_meters));
        output.kv("Crowd level", found.location.crowd_level);
    }
    Ok(())
}

pub async fn map(args: MapArgs, workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let position = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Some(PositionArgs { lat, lon }.coordinate()?),
        _ => None,
    };
    let criteria = args.filter.criteria()?;
    let mut screen = open_map(workspace, position, criteria).await;
    let state = screen.snapshot();
    screen.deactivate();

    if let Some(ref path) = args.output {
        let geojson = locations_to_geojson(&state.visible_locations());
        fs::write(path, geojson.to_string())
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let pins = state.pins();
    if output.is_json() {
        output.result(MapOutput {
            center_latitude: state.region.center.latitude,
            center_longitude: state.region.center.longitude,
            latitude_delta: state.region.latitude_delta,
            longitude_delta: state.region.longitude_delta,
            error: state.error.clone(),
            pins,
            geojson_path: args.output.map(|p| p.display().to_string()),
        })?;
        return Ok(());
    }

    if let Some(ref error) = state.error {
        output.warning(error);
    }
    output.section("Map Region");
    output.kv(
        "Center",
        format!("{:.5}, {:.5}", state.region.center.latitude, state.region.center.longitude),
    );
    output.kv("Span", format!("{:.4}° x {:.4}°", state.region.latitude_delta, state.region.longitude_delta));
    let in_view = state.region.visible(&state.visible_locations()).len();
    output.kv("Pins", format!("{} ({} in view)", pins.len(), in_view));
    if let Some(path) = args.output {
        output.success(format!("GeoJSON written to {}", path.display()));
    }
    Ok(())
}
