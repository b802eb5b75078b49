use crate::context::AppContext;
use crate::device::{Camera, LocationProvider, PermissionStatus, Photo};
use crate::notification::{NotificationKind, Notifier};
use crate::screens::map::LOCATION_DENIED_MESSAGE;
use crate::session::Session;
use hotspot_core::error::{HotspotError, Result};
use hotspot_core::models::{Coordinate, CrowdLevel, Location, NewReport, Report};
use hotspot_geo::find_nearest;
use hotspot_store::ports::{BlobStore, DocumentStore};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

pub const CAMERA_DENIED_MESSAGE: &str = "We need camera permissions to take a picture!";
pub const SUCCESS_MESSAGE: &str = "Report submitted";
pub const FAILURE_MESSAGE: &str = "Error submitting report, please try again.";

/// What the user has entered so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportForm {
    pub crowd_level: Option<CrowdLevel>,
    pub additional_info: String,
    pub photo: Option<Photo>,
}

impl ReportForm {
    pub fn is_empty(&self) -> bool {
        self.crowd_level.is_none() && self.additional_info.is_empty() && self.photo.is_none()
    }
}

#[derive(Debug, Clone)]
pub struct ReportState {
    /// "Report: {name}" once the nearest location is known
    pub title: String,
    pub user_position: Option<Coordinate>,
    pub nearest: Option<Location>,
    pub distance_meters: Option<f64>,
    pub form: ReportForm,
    pub submitting: bool,
    /// Blocking alert text, cleared by [`ReportScreen::dismiss_alert`]
    pub alert: Option<String>,
    pub notifier: Notifier,
}

pub struct ReportScreen {
    context: AppContext,
    session: Session,
    state: Arc<Mutex<ReportState>>,
}

impl ReportScreen {
    pub fn new(context: AppContext, session: Session) -> Self {
        let notifier = Notifier::from_millis(
            context.settings.notification_hold_ms,
            context.settings.notification_fade_ms,
        );
        let state = ReportState {
            title: "Report".to_string(),
            user_position: None,
            nearest: None,
            distance_meters: None,
            form: ReportForm::default(),
            submitting: false,
            alert: None,
            notifier,
        };
        Self {
            context,
            session,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Resolve the location the report will be attached to
    pub async fn activate(&self, locator: &dyn LocationProvider) {
        if locator.request_permission().await == PermissionStatus::Denied {
            self.state().alert = Some(LOCATION_DENIED_MESSAGE.to_string());
            return;
        }

        let position = match locator.current_position().await {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read device position");
                return;
            }
        };
        self.state().user_position = Some(position);

        let locations = match self.context.documents.list_locations().await {
            Ok(locations) => locations,
            Err(e) => {
                tracing::error!(error = %e, "Error fetching locations");
                return;
            }
        };

        let mut state = self.state();
        match find_nearest(position, &locations) {
            Some(nearest) => {
                tracing::debug!(
                    location = %nearest.location.id,
                    distance_meters = nearest.distance_meters,
                    "Nearest location resolved"
                );
                state.title = format!("Report: {}", nearest.location.name);
                state.distance_meters = Some(nearest.distance_meters);
                state.nearest = Some(nearest.location.clone());
            }
            None => {
                state.title = "Report".to_string();
                state.distance_meters = None;
                state.nearest = None;
            }
        }
    }

    /// Select a level; pressing the selected level again clears it
    pub fn toggle_crowd_level(&self, level: CrowdLevel) {
        let mut state = self.state();
        state.form.crowd_level = if state.form.crowd_level == Some(level) {
            None
        } else {
            Some(level)
        };
    }

    /// Toggle by display label, e.g. "somewhat crowded"
    pub fn toggle_label(&self, label: &str) -> Result<()> {
        let level = CrowdLevel::decode(label)?;
        self.toggle_crowd_level(level);
        Ok(())
    }

    pub fn set_additional_info(&self, text: impl Into<String>) {
        self.state().form.additional_info = text.into();
    }

    pub async fn take_photo(&self, camera: &dyn Camera) -> Result<()> {
        if camera.request_permission().await == PermissionStatus::Denied {
            self.state().alert = Some(CAMERA_DENIED_MESSAGE.to_string());
            return Ok(());
        }
        if let Some(photo) = camera.capture().await? {
            self.state().form.photo = Some(photo);
        }
        Ok(())
    }

    pub fn remove_photo(&self) {
        self.state().form.photo = None;
    }

    pub fn dismiss_alert(&self) {
        self.state().alert = None;
    }

    /// Upload the photo (if any), then write the report.
    ///
    /// On success the form is cleared and a success notification shown. On
    /// failure the form is kept and a failure notification shown; an upload
    /// failure means no report is written.
    pub async fn submit(&self, now: Instant) -> Result<Report> {
        let (form, location) = {
            let mut state = self.state();
            if state.submitting {
                return Err(HotspotError::validation("report", "A submission is already in progress."));
            }
            if state.form.crowd_level.is_none() {
                return Err(HotspotError::validation("crowd_level", "Please select a crowd level."));
            }
            state.submitting = true;
            (state.form.clone(), state.nearest.clone())
        };

        let result = self.write_report(form, location).await;

        let mut state = self.state();
        state.submitting = false;
        match &result {
            Ok(report) => {
                tracing::info!(report = %report.id, "Report submitted");
                state.form = ReportForm::default();
                state.notifier.show(NotificationKind::Success, SUCCESS_MESSAGE, now);
            }
            Err(e) => {
                tracing::error!(error = %e, "Error submitting report");
                state.notifier.show(NotificationKind::Failure, FAILURE_MESSAGE, now);
            }
        }
        result
    }

    async fn write_report(&self, form: ReportForm, location: Option<Location>) -> Result<Report> {
        let crowd_level = match form.crowd_level {
            Some(level) => CrowdLevel::try_from_level(level.level())?,
            None => return Err(HotspotError::validation("crowd_level", "Please select a crowd level.")),
        };

        let photo_url = match form.photo {
            Some(photo) => {
                let path = format!("reports/{}-{}", uuid::Uuid::new_v4().simple(), photo.file_name);
                self.context
                    .blobs
                    .upload(&path, photo.bytes, &photo.content_type)
                    .await?;
                Some(self.context.blobs.download_url(&path).await?)
            }
            None => None,
        };

        let user = self.session.current_user();
        let additional_info = Some(form.additional_info.trim().to_string()).filter(|s| !s.is_empty());

        self.context
            .documents
            .create_report(NewReport {
                crowd_level,
                additional_info,
                photo_url,
                location_reported: location.as_ref().map(Location::snapshot),
                author_id: user.as_ref().map(|u| u.id.clone()),
                author_name: user
                    .as_ref()
                    .map(|u| u.author_name())
                    .unwrap_or_else(|| "Anonymous".to_string()),
            })
            .await
    }

    pub fn snapshot(&self) -> ReportState {
        self.state().clone()
    }

    fn state(&self) -> MutexGuard<'_, ReportState> {
        self.state.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{DeniedCamera, FixedPosition};
    use hotspot_core::config::AppSettings;
    use hotspot_store::memory::MemoryBackend;

    fn screen(backend: &MemoryBackend) -> ReportScreen {
        let context = AppContext::from_memory(backend, AppSettings::default());
        let session = Session::new(context.auth.clone(), context.settings.clone());
        ReportScreen::new(context, session)
    }

    #[tokio::test]
    async fn test_title_uses_nearest_location() {
        let backend = MemoryBackend::new();
        backend.documents.restore_locations(vec![
            Location::new("far", "Far Hall", Coordinate::new(41.0, -77.0), CrowdLevel::NotCrowded, "study"),
            Location::new("near", "Near Hall", Coordinate::new(40.0001, -77.0001), CrowdLevel::NotCrowded, "study"),
        ]);
        let screen = screen(&backend);

        screen.activate(&FixedPosition(Some(Coordinate::new(40.0, -77.0)))).await;
        let state = screen.snapshot();
        assert_eq!(state.title, "Report: Near Hall");
        assert!(state.distance_meters.unwrap() < 20.0);
    }

    #[tokio::test]
    async fn test_title_without_locations() {
        let backend = MemoryBackend::new();
        let screen = screen(&backend);
        screen.activate(&FixedPosition(Some(Coordinate::new(40.0, -77.0)))).await;
        assert_eq!(screen.snapshot().title, "Report");

        screen.activate(&FixedPosition(None)).await;
        assert_eq!(screen.snapshot().alert.as_deref(), Some(LOCATION_DENIED_MESSAGE));
    }

    #[test]
    fn test_toggle_deselects() {
        let backend = MemoryBackend::new();
        let screen = screen(&backend);

        screen.toggle_label("very crowded").unwrap();
        assert_eq!(screen.snapshot().form.crowd_level, Some(CrowdLevel::VeryCrowded));
        screen.toggle_crowd_level(CrowdLevel::VeryCrowded);
        assert_eq!(screen.snapshot().form.crowd_level, None);
        assert!(screen.toggle_label("packed").is_err());
    }

    #[tokio::test]
    async fn test_camera_denied_shows_alert() {
        let backend = MemoryBackend::new();
        let screen = screen(&backend);
        screen.take_photo(&DeniedCamera).await.unwrap();
        let state = screen.snapshot();
        assert_eq!(state.alert.as_deref(), Some(CAMERA_DENIED_MESSAGE));
        assert!(state.form.photo.is_none());
    }

    #[tokio::test]
    async fn test_submit_requires_crowd_level() {
        let backend = MemoryBackend::new();
        let screen = screen(&backend);
        screen.set_additional_info("line out the door");

        let err = screen.submit(Instant::now()).await.unwrap_err();
        assert!(matches!(err, HotspotError::Validation { .. }));
        assert!(backend.documents.all_reports().is_empty());
        assert_eq!(screen.snapshot().form.additional_info, "line out the door");
    }

    #[tokio::test]
    async fn test_anonymous_submit_without_session() {
        let backend = MemoryBackend::new();
        let screen = screen(&backend);
        screen.toggle_crowd_level(CrowdLevel::NotCrowded);
        screen.set_additional_info("   ");

        let report = screen.submit(Instant::now()).await.unwrap();
        assert_eq!(report.author_name, "Anonymous");
        assert!(report.author_id.is_none());
        assert!(report.additional_info.is_none());
        assert!(report.location_reported.is_none());
    }
}
