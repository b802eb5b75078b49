use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CrowdLevel, LocationId, LocationSnapshot, UserId};

/// Backend-assigned report identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub String);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A crowd report as stored. Reports are never updated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub crowd_level: CrowdLevel,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub location_reported: Option<LocationSnapshot>,
    #[serde(default, rename = "userId")]
    pub author_id: Option<UserId>,
    #[serde(default = "anonymous", rename = "userName")]
    pub author_name: String,
}

fn anonymous() -> String {
    "Anonymous".to_string()
}

impl Report {
    pub fn location_id(&self) -> Option<&LocationId> {
        self.location_reported.as_ref().map(|l| &l.id)
    }
}

/// Report fields supplied by the client; id and timestamp are assigned on write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub crowd_level: CrowdLevel,
    pub additional_info: Option<String>,
    pub photo_url: Option<String>,
    pub location_reported: Option<LocationSnapshot>,
    #[serde(rename = "userId")]
    pub author_id: Option<UserId>,
    #[serde(rename = "userName")]
    pub author_name: String,
}

impl NewReport {
    pub fn into_report(self, id: ReportId, timestamp: DateTime<Utc>) -> Report {
        Report {
            id,
            crowd_level: self.crowd_level,
            additional_info: self.additional_info,
            photo_url: self.photo_url,
            timestamp,
            location_reported: self.location_reported,
            author_id: self.author_id,
            author_name: self.author_name,
        }
    }
}

/// Recent reports for one location: newer than `since`, newest first, at most `limit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentReportsQuery {
    pub location_id: LocationId,
    pub since: DateTime<Utc>,
    pub limit: usize,
}

impl RecentReportsQuery {
    /// Query covering `window` back from `now`
    pub fn within(location_id: LocationId, window: Duration, limit: usize, now: DateTime<Utc>) -> Self {
        Self {
            location_id,
            since: now - window,
            limit,
        }
    }

    pub fn matches(&self, report: &Report) -> bool {
        report.location_id() == Some(&self.location_id) && report.timestamp > self.since
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_at(location: &str, timestamp: DateTime<Utc>) -> Report {
        NewReport {
            crowd_level: CrowdLevel::SomewhatCrowded,
            additional_info: None,
            photo_url: None,
            location_reported: Some(LocationSnapshot {
                id: LocationId::new(location),
                name: location.to_string(),
                coordinates: None,
            }),
            author_id: None,
            author_name: "tester".into(),
        }
        .into_report(ReportId("r".into()), timestamp)
    }

    #[test]
    fn test_recent_query_window_is_exclusive() {
        let now = Utc::now();
        let query = RecentReportsQuery::within(LocationId::new("a"), Duration::hours(2), 20, now);

        assert!(query.matches(&report_at("a", now - Duration::minutes(119))));
        assert!(!query.matches(&report_at("a", now - Duration::hours(2))));
        assert!(!query.matches(&report_at("b", now)));
    }

    #[test]
    fn test_stored_field_names() {
        let report = report_at("a", Utc::now());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("userName").is_some());
        assert!(json.get("locationReported").is_some());
        assert_eq!(json["crowdLevel"], 1);
    }
}
