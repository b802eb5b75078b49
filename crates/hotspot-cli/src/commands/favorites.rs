//! Favorites command implementation

use super::Workspace;
use crate::cli::{FavoritesArgs, FavoritesCommand};
use crate::errors;
use crate::output::OutputWriter;
use crate::output_types::FavoriteRow;
use anyhow::Result;
use hotspot_app::screens::FavoritesScreen;
use hotspot_core::error::HotspotError;
use hotspot_core::models::LocationId;

pub async fn execute(args: FavoritesArgs, workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let session = workspace.session();
    if session.current_user().is_none() {
        return Err(errors::not_signed_in().into());
    }

    let mut screen = FavoritesScreen::new(workspace.context(), session);
    screen.activate();
    screen.wait_snapshots(1).await;

    match args.command.unwrap_or(FavoritesCommand::List) {
        FavoritesCommand::List => {
            let state = screen.snapshot();
            screen.deactivate();
            if let Some(message) = state.empty_message() {
                if output.is_json() {
                    return output.table(Vec::<FavoriteRow>::new());
                }
                output.info(message.replace('\n', " "));
                return Ok(());
            }
            output.table(state.favorites.iter().map(FavoriteRow::from).collect::<Vec<_>>())
        }
        FavoritesCommand::Add { location_id } => {
            let id = LocationId::new(location_id);
            if let Some(favorite) = screen.snapshot().favorites.iter().find(|f| f.location_id == id) {
                output.info(format!("{} is already a favorite", favorite.name));
                return Ok(());
            }

            let location = match screen.add_by_id(&id).await {
                Ok(location) => location,
                Err(HotspotError::LocationNotFound { id }) => {
                    return Err(errors::location_not_found(&id).into());
                }
                Err(e) => return Err(e.into()),
            };
            workspace.storage.save()?;
            output.success(format!("Added {} to favorites", location.name));
            Ok(())
        }
        FavoritesCommand::Remove { location_id } => {
            let id = LocationId::new(location_id);
            let state = screen.snapshot();
            let Some(favorite) = state.favorites.iter().find(|f| f.location_id == id) else {
                output.info(format!("{} is not a favorite", id));
                return Ok(());
            };

            screen.remove(&id).await?;
            workspace.storage.save()?;
            output.success(format!("Removed {} from favorites", favorite.name));
            Ok(())
        }
    }
}
