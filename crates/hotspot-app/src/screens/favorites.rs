use crate::context::AppContext;
use crate::session::Session;
use crate::subscription::LiveSubscription;
use hotspot_core::error::{HotspotError, Result};
use hotspot_core::models::{Favorite, Location, LocationId};
use hotspot_store::ports::DocumentStore;
use std::sync::{Arc, Mutex};

pub const EMPTY_MESSAGE: &str = "add favorites to see\nthem here!";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesState {
    pub favorites: Vec<Favorite>,
    pub loading: bool,
}

impl FavoritesState {
    /// Placeholder text when the list is empty
    pub fn empty_message(&self) -> Option<&'static str> {
        (!self.loading && self.favorites.is_empty()).then_some(EMPTY_MESSAGE)
    }

    pub fn contains(&self, location_id: &LocationId) -> bool {
        self.favorites.iter().any(|f| &f.location_id == location_id)
    }
}

/// The signed-in user's favorites, kept live while active
pub struct FavoritesScreen {
    context: AppContext,
    session: Session,
    state: Arc<Mutex<FavoritesState>>,
    subscription: Option<LiveSubscription>,
}

impl FavoritesScreen {
    pub fn new(context: AppContext, session: Session) -> Self {
        Self {
            context,
            session,
            state: Arc::default(),
            subscription: None,
        }
    }

    /// Subscribe to the current user's favorites. Without a user the list
    /// stays empty and nothing is subscribed.
    pub fn activate(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        let Some(user) = self.session.current_user() else {
            *self.state.lock().unwrap() = FavoritesState::default();
            return;
        };

        self.state.lock().unwrap().loading = true;
        self.subscription = Some(LiveSubscription::spawn(
            "favorites",
            self.context.documents.watch_favorites(&user.id),
            self.state.clone(),
            |state: &mut FavoritesState, favorites| {
                state.favorites = favorites;
                state.loading = false;
            },
        ));
    }

    pub async fn wait_snapshots(&mut self, count: u64) {
        if let Some(sub) = self.subscription.as_mut() {
            sub.wait_applied(count).await;
        }
    }

    pub fn deactivate(&mut self) {
        if let Some(mut sub) = self.subscription.take() {
            sub.teardown();
        }
    }

    pub fn is_favorite(&self, location_id: &LocationId) -> bool {
        self.state.lock().unwrap().contains(location_id)
    }

    /// Add `location` to favorites, or remove it if already there.
    /// Returns whether it is a favorite afterwards.
    pub async fn toggle(&self, location: &Location) -> Result<bool> {
        if self.is_favorite(&location.id) {
            self.remove(&location.id).await?;
            Ok(false)
        } else {
            self.add(location).await?;
            Ok(true)
        }
    }

    pub async fn add(&self, location: &Location) -> Result<()> {
        let user = self.session.require_user()?;
        self.context
            .documents
            .add_favorite(&user.id, &Favorite::from(location))
            .await?;
        tracing::info!(location = %location.id, "Favorite added");
        Ok(())
    }

    /// Look up a location by id and add it. Fails with `LocationNotFound`
    /// when the id is not in the locations collection.
    pub async fn add_by_id(&self, location_id: &LocationId) -> Result<Location> {
        let locations = self.context.documents.list_locations().await?;
        let location = locations
            .into_iter()
            .find(|l| &l.id == location_id)
            .ok_or_else(|| HotspotError::LocationNotFound { id: location_id.to_string() })?;
        self.add(&location).await?;
        Ok(location)
    }

    /// Removing something that is not a favorite is a no-op
    pub async fn remove(&self, location_id: &LocationId) -> Result<()> {
        let user = self.session.require_user()?;
        self.context.documents.remove_favorite(&user.id, location_id).await?;
        tracing::info!(location = %location_id, "Favorite removed");
        Ok(())
    }

    pub fn snapshot(&self) -> FavoritesState {
        self.state.lock().unwrap().clone()
    }
}

impl Drop for FavoritesScreen {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SignupForm;
    use hotspot_core::config::AppSettings;
    use hotspot_core::models::{Coordinate, CrowdLevel};
    use hotspot_store::memory::MemoryBackend;

    fn screen(backend: &MemoryBackend) -> FavoritesScreen {
        let context = AppContext::from_memory(backend, AppSettings::default());
        let session = Session::new(context.auth.clone(), context.settings.clone());
        FavoritesScreen::new(context, session)
    }

    fn hub() -> Location {
        Location::new("hub", "HUB", Coordinate::new(40.7982, -77.8599), CrowdLevel::NotCrowded, "dining")
            .with_description("Student union")
    }

    #[tokio::test]
    async fn test_signed_out_shows_empty_message() {
        let backend = MemoryBackend::new();
        let mut screen = screen(&backend);
        screen.activate();

        assert_eq!(screen.snapshot().empty_message(), Some(EMPTY_MESSAGE));
        assert!(matches!(screen.toggle(&hub()).await, Err(HotspotError::NotSignedIn)));
    }

    #[tokio::test]
    async fn test_toggle_updates_live_list() {
        let backend = MemoryBackend::new();
        let mut screen = screen(&backend);
        screen
            .session
            .sign_up(&SignupForm::new("Ann", "ann@psu.edu", "secret1"))
            .await
            .unwrap();

        screen.activate();
        screen.wait_snapshots(1).await;
        assert_eq!(screen.snapshot().empty_message(), Some(EMPTY_MESSAGE));

        assert!(screen.toggle(&hub()).await.unwrap());
        screen.wait_snapshots(2).await;
        let state = screen.snapshot();
        assert_eq!(state.favorites.len(), 1);
        assert_eq!(state.favorites[0].description.as_deref(), Some("Student union"));

        assert!(!screen.toggle(&hub()).await.unwrap());
        screen.wait_snapshots(3).await;
        assert!(screen.snapshot().favorites.is_empty());
    }

    #[tokio::test]
    async fn test_add_by_id_and_remove() {
        let backend = MemoryBackend::new();
        backend.documents.restore_locations(vec![hub()]);
        let mut screen = screen(&backend);
        screen
            .session
            .sign_up(&SignupForm::new("Ann", "ann@psu.edu", "secret1"))
            .await
            .unwrap();
        screen.activate();
        screen.wait_snapshots(1).await;

        let err = screen.add_by_id(&LocationId::new("nowhere")).await.unwrap_err();
        assert!(matches!(err, HotspotError::LocationNotFound { ref id } if id == "nowhere"));

        let added = screen.add_by_id(&LocationId::new("hub")).await.unwrap();
        assert_eq!(added.name, "HUB");
        screen.wait_snapshots(2).await;
        assert!(screen.is_favorite(&LocationId::new("hub")));

        screen.remove(&LocationId::new("hub")).await.unwrap();
        screen.wait_snapshots(3).await;
        assert!(screen.snapshot().favorites.is_empty());

        // removing again does not publish a change and does not fail
        screen.remove(&LocationId::new("hub")).await.unwrap();
        assert!(screen.snapshot().favorites.is_empty());
    }
}
