use crate::context::AppContext;
use crate::device::{LocationProvider, PermissionStatus};
use crate::subscription::LiveSubscription;
use hotspot_core::filter::apply_filters;
use hotspot_core::models::{Coordinate, CrowdLevel, FilterCriteria, Location, LocationId};
use hotspot_geo::MapRegion;
use hotspot_store::ports::DocumentStore;
use serde::Serialize;
use std::sync::{Arc, Mutex};

pub const LOCATION_DENIED_MESSAGE: &str = "Permission to access location was denied";

/// A marker to draw for one location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPin {
    pub location_id: LocationId,
    pub name: String,
    pub coordinate: Coordinate,
    pub color: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapState {
    pub region: MapRegion,
    pub user_position: Option<Coordinate>,
    pub error: Option<String>,
    pub locations: Vec<Location>,
    pub filter: FilterCriteria,
    /// True until the first locations snapshot arrives
    pub loading: bool,
}

impl MapState {
    /// Locations passing the current filter, in backend order
    pub fn visible_locations(&self) -> Vec<Location> {
        apply_filters(&self.locations, &self.filter)
    }

    /// Markers for the filtered locations; locations without coordinates
    /// get no marker
    pub fn pins(&self) -> Vec<MapPin> {
        self.visible_locations()
            .into_iter()
            .filter_map(|location| {
                let coordinate = location.coordinates?;
                Some(MapPin {
                    color: location.crowd_level.pin_color(),
                    label: location.crowd_level.label(),
                    location_id: location.id,
                    name: location.name,
                    coordinate,
                })
            })
            .collect()
    }
}

pub struct MapScreen {
    context: AppContext,
    state: Arc<Mutex<MapState>>,
    subscription: Option<LiveSubscription>,
}

impl MapScreen {
    pub fn new(context: AppContext) -> Self {
        let state = MapState {
            region: MapRegion::default_for(&context.settings),
            user_position: None,
            error: None,
            locations: Vec::new(),
            filter: FilterCriteria::default(),
            loading: true,
        };
        Self {
            context,
            state: Arc::new(Mutex::new(state)),
            subscription: None,
        }
    }

    /// Center on the device position when allowed, then start the live
    /// locations feed
    pub async fn activate(&mut self, locator: &dyn LocationProvider) {
        self.locate(locator).await;

        if self.subscription.is_none() {
            self.subscription = Some(LiveSubscription::spawn(
                "locations",
                self.context.documents.watch_locations(),
                self.state.clone(),
                |state: &mut MapState, locations| {
                    state.locations = locations;
                    state.loading = false;
                },
            ));
        }
    }

    async fn locate(&self, locator: &dyn LocationProvider) {
        if locator.request_permission().await == PermissionStatus::Denied {
            tracing::warn!("Location permission denied, keeping default region");
            self.state().error = Some(LOCATION_DENIED_MESSAGE.to_string());
            return;
        }

        let position = match locator.current_position().await {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read device position");
                return;
            }
        };
        if let Err(e) = position.validate() {
            tracing::warn!(error = %e, "Ignoring out-of-range device position");
            return;
        }

        let mut state = self.state();
        state.user_position = Some(position);
        state.region = state.region.recentered(position);
        state.error = None;
    }

    /// Wait for `count` locations snapshots to be applied
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

    pub fn set_region(&self, region: MapRegion) {
        self.state().region = region;
    }

    pub fn set_crowd_filter(&self, level: Option<CrowdLevel>) {
        self.state().filter.crowd_level = level;
    }

    pub fn set_category_filter(&self, category: Option<String>) {
        self.state().filter.category = category;
    }

    pub fn clear_filter(&self) {
        self.state().filter = FilterCriteria::default();
    }

    pub fn snapshot(&self) -> MapState {
        self.state().clone()
    }

    fn state(&self) -> std::sync::MutexGuard<'_, MapState> {
        self.state.lock().unwrap()
    }
}

impl Drop for MapScreen {
    fn drop(&mut self) {
        self.deactivate();
    }
}
