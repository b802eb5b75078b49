use crate::context::AppContext;
use chrono::{DateTime, Duration, Utc};
use hotspot_core::models::{CrowdLevel, LocationId, RecentReportsQuery, Report};
use hotspot_core::time::display_minutes;
use hotspot_store::ports::DocumentStore;
use serde::Serialize;

/// One line in the recent reports list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// "{author}, {minutes}m ago"
    pub heading: String,
    pub additional_info: Option<String>,
    pub photo_url: Option<String>,
    pub color: &'static str,
}

impl ReportRow {
    pub fn new(report: &Report, now: DateTime<Utc>) -> Self {
        Self {
            heading: format!("{}, {}m ago", report.author_name, display_minutes(report.timestamp, now)),
            additional_info: report.additional_info.clone(),
            photo_url: report.photo_url.clone(),
            color: report.crowd_level.pin_color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailState {
    pub location_id: LocationId,
    pub location_name: String,
    /// `None` while loading
    pub reports: Option<Vec<Report>>,
    pub error: Option<String>,
}

impl DetailState {
    pub fn is_loading(&self) -> bool {
        self.reports.is_none() && self.error.is_none()
    }

    /// Level of the newest report; "Not Crowded" when there are none
    pub fn latest_level(&self) -> CrowdLevel {
        self.reports
            .as_ref()
            .and_then(|reports| reports.first())
            .map(|r| r.crowd_level)
            .unwrap_or(CrowdLevel::NotCrowded)
    }

    pub fn headline(&self) -> &'static str {
        self.latest_level().busy_text()
    }

    pub fn rows(&self, now: DateTime<Utc>) -> Vec<ReportRow> {
        self.reports
            .iter()
            .flatten()
            .map(|r| ReportRow::new(r, now))
            .collect()
    }
}

/// Recent reports for one location
pub struct DetailScreen {
    context: AppContext,
    state: DetailState,
}

impl DetailScreen {
    pub fn new(context: AppContext, location_id: LocationId, location_name: impl Into<String>) -> Self {
        let state = DetailState {
            location_id,
            location_name: location_name.into(),
            reports: None,
            error: None,
        };
        Self { context, state }
    }

    /// Fetch reports inside the recent window ending at `now`.
    /// A failed fetch is kept in `error` so the caller can retry.
    pub async fn load(&mut self, now: DateTime<Utc>) -> &DetailState {
        self.state.reports = None;
        self.state.error = None;

        let settings = &self.context.settings;
        let query = RecentReportsQuery::within(
            self.state.location_id.clone(),
            Duration::minutes(i64::from(settings.recent_window_minutes)),
            settings.recent_limit,
            now,
        );

        match self.context.documents.recent_reports(&query).await {
            Ok(reports) => {
                tracing::debug!(location = %self.state.location_id, count = reports.len(), "Recent reports loaded");
                self.state.reports = Some(reports);
            }
            Err(e) => {
                tracing::error!(location = %self.state.location_id, error = %e, "Error loading reports");
                self.state.error = Some(e.to_string());
            }
        }
        &self.state
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hotspot_core::config::AppSettings;
    use hotspot_core::models::{LocationSnapshot, NewReport, ReportId};
    use hotspot_store::memory::MemoryBackend;

    fn report(id: &str, location: &str, level: CrowdLevel, at: DateTime<Utc>) -> Report {
        NewReport {
            crowd_level: level,
            additional_info: Some(format!("note {}", id)),
            photo_url: None,
            location_reported: Some(LocationSnapshot {
                id: LocationId::new(location),
                name: location.to_string(),
                coordinates: None,
            }),
            author_id: None,
            author_name: "ann".to_string(),
        }
        .into_report(ReportId(id.to_string()), at)
    }

    #[tokio::test]
    async fn test_loads_recent_window_newest_first() {
        let backend = MemoryBackend::new();
        let now = Utc::now();
        backend.documents.import_report(report("old", "hub", CrowdLevel::VeryCrowded, now - Duration::minutes(121)));
        backend.documents.import_report(report("a", "hub", CrowdLevel::NotCrowded, now - Duration::minutes(30)));
        backend.documents.import_report(report("b", "hub", CrowdLevel::SomewhatCrowded, now - Duration::minutes(5)));
        backend.documents.import_report(report("other", "pattee", CrowdLevel::VeryCrowded, now));

        let context = AppContext::from_memory(&backend, AppSettings::default());
        let mut screen = DetailScreen::new(context, LocationId::new("hub"), "HUB");
        let state = screen.load(now).await;

        let ids: Vec<_> = state.reports.iter().flatten().map(|r| r.id.0.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(state.latest_level(), CrowdLevel::SomewhatCrowded);
        assert_eq!(state.headline(), "Somewhat busy");

        let rows = state.rows(now);
        assert_eq!(rows[0].heading, "ann, 5m ago");
        assert_eq!(rows[0].color, "yellow");
    }

    #[tokio::test]
    async fn test_limit_applies() {
        let backend = MemoryBackend::new();
        let now = Utc::now();
        for i in 0..25 {
            backend.documents.import_report(report(&i.to_string(), "hub", CrowdLevel::NotCrowded, now - Duration::minutes(i)));
        }
        let context = AppContext::from_memory(&backend, AppSettings::default());
        let mut screen = DetailScreen::new(context, LocationId::new("hub"), "HUB");
        let state = screen.load(now).await;
        assert_eq!(state.reports.as_ref().map(Vec::len), Some(20));
    }

    #[test]
    fn test_empty_and_loading_defaults() {
        let backend = MemoryBackend::new();
        let context = AppContext::from_memory(&backend, AppSettings::default());
        let screen = DetailScreen::new(context, LocationId::new("hub"), "HUB");
        assert!(screen.state().is_loading());
        assert_eq!(screen.state().headline(), "Not busy");
        assert!(screen.state().rows(Utc::now()).is_empty());
    }

    #[test]
    fn test_future_timestamp_shows_zero_minutes() {
        let now = Utc::now();
        let row = ReportRow::new(&report("x", "hub", CrowdLevel::NotCrowded, now + Duration::seconds(30)), now);
        assert_eq!(row.heading, "ann, 0m ago");
    }
}
