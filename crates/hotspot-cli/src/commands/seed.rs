//! Seed command implementation

use super::Workspace;
use crate::cli::SeedArgs;
use crate::output::OutputWriter;
use crate::output_types::SeedOutput;
use anyhow::{Context, Result};
use hotspot_core::formats::geojson::read_locations;
use hotspot_store::ports::DocumentStore;

pub async fn execute(args: SeedArgs, workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let locations = read_locations(&args.path)
        .with_context(|| format!("Failed to read locations from {}", args.path.display()))?;

    let without_coordinates = locations.iter().filter(|l| l.coordinates.is_none()).count();
    if without_coordinates > 0 {
        output.warning(format!(
            "{} location(s) have no point coordinates and will not appear on the map",
            without_coordinates
        ));
    }

    let documents = &workspace.storage.backend.documents;
    let imported = locations.len();
    if args.replace {
        documents.restore_locations(locations);
    } else {
        for location in &locations {
            documents.put_location(location).await?;
        }
    }
    workspace.storage.save()?;

    let total_locations = documents.list_locations().await?.len();
    tracing::info!(imported, total_locations, "Locations imported");

    if output.is_json() {
        output.result(SeedOutput {
            source: args.path.display().to_string(),
            imported,
            without_coordinates,
            total_locations,
        })?;
    } else {
        output.success(format!("Imported {} location(s) from {}", imported, args.path.display()));
        output.kv("Total locations", total_locations);
    }
    Ok(())
}
