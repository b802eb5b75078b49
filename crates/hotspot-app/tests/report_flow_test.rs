//! End-to-end report submission against the in-memory backend

use chrono::{Duration as ChronoDuration, Utc};
use hotspot_app::device::{FileCamera, FixedPosition};
use hotspot_app::notification::NotificationKind;
use hotspot_app::screens::report::{FAILURE_MESSAGE, SUCCESS_MESSAGE};
use hotspot_app::screens::{DetailScreen, ReportScreen};
use hotspot_app::session::SignupForm;
use hotspot_app::{AppContext, Session};
use hotspot_core::config::AppSettings;
use hotspot_core::models::{Coordinate, CrowdLevel, Location, LocationId};
use hotspot_store::memory::MemoryBackend;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn campus() -> MemoryBackend {
    let backend = MemoryBackend::new();
    backend.documents.restore_locations(vec![
        Location::new("hub", "HUB", Coordinate::new(40.7982, -77.8599), CrowdLevel::NotCrowded, "dining"),
        Location::new("pattee", "Pattee Library", Coordinate::new(40.7986, -77.8652), CrowdLevel::NotCrowded, "study"),
    ]);
    backend
}

async fn signed_in_screen(backend: &MemoryBackend) -> ReportScreen {
    let context = AppContext::from_memory(backend, AppSettings::default());
    let session = Session::new(context.auth.clone(), context.settings.clone());
    session
        .sign_up(&SignupForm::new("Nittany Lion", "lion@psu.edu", "roar123"))
        .await
        .unwrap();

    let screen = ReportScreen::new(context, session);
    screen.activate(&FixedPosition(Some(Coordinate::new(40.7983, -77.8600)))).await;
    screen
}

fn photo_file(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("crowd.jpg");
    std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
    path
}

#[tokio::test]
async fn test_successful_submission_with_photo() {
    let backend = campus();
    let screen = signed_in_screen(&backend).await;
    let dir = TempDir::new().unwrap();

    screen.toggle_crowd_level(CrowdLevel::VeryCrowded);
    screen.set_additional_info("long line at the food court");
    screen.take_photo(&FileCamera::new(Some(photo_file(&dir)))).await.unwrap();

    let t0 = Instant::now();
    let report = screen.submit(t0).await.unwrap();

    assert_eq!(report.author_name, "Nittany Lion");
    assert_eq!(report.location_id(), Some(&LocationId::new("hub")));
    let url = report.photo_url.clone().unwrap();
    assert!(url.starts_with("memory://hotspot/reports/"));
    assert!(url.ends_with("-crowd.jpg"));
    assert_eq!(backend.blobs.all_blobs().len(), 1);

    let state = screen.snapshot();
    assert!(state.form.is_empty());
    assert!(!state.submitting);
    let shown = state.notifier.visible(t0).unwrap();
    assert_eq!(shown.kind, NotificationKind::Success);
    assert_eq!(shown.message, SUCCESS_MESSAGE);
    assert!(state.notifier.visible(t0 + Duration::from_millis(2600)).is_none());

    // the new report is the headline on the detail view
    let context = AppContext::from_memory(&backend, AppSettings::default());
    let mut detail = DetailScreen::new(context, LocationId::new("hub"), "HUB");
    let loaded = detail.load(Utc::now() + ChronoDuration::seconds(1)).await;
    assert_eq!(loaded.headline(), "Very busy");
}

#[tokio::test]
async fn test_failed_upload_skips_report_and_keeps_form() {
    let backend = campus();
    let screen = signed_in_screen(&backend).await;
    let dir = TempDir::new().unwrap();

    screen.toggle_crowd_level(CrowdLevel::SomewhatCrowded);
    screen.set_additional_info("busy");
    screen.take_photo(&FileCamera::new(Some(photo_file(&dir)))).await.unwrap();
    backend.blobs.set_offline(true);

    let t0 = Instant::now();
    assert!(screen.submit(t0).await.is_err());
    assert!(backend.documents.all_reports().is_empty());

    let state = screen.snapshot();
    assert_eq!(state.form.crowd_level, Some(CrowdLevel::SomewhatCrowded));
    assert_eq!(state.form.additional_info, "busy");
    assert!(state.form.photo.is_some());
    assert_eq!(state.notifier.visible(t0).unwrap().message, FAILURE_MESSAGE);

    // retry once the connection is back
    backend.blobs.set_offline(false);
    assert!(screen.submit(Instant::now()).await.is_ok());
    assert_eq!(backend.documents.all_reports().len(), 1);
}

#[tokio::test]
async fn test_failed_write_keeps_form() {
    let backend = campus();
    let screen = signed_in_screen(&backend).await;
    screen.toggle_crowd_level(CrowdLevel::NotCrowded);
    backend.documents.set_offline(true);

    assert!(screen.submit(Instant::now()).await.is_err());
    assert_eq!(screen.snapshot().form.crowd_level, Some(CrowdLevel::NotCrowded));
}

#[tokio::test]
async fn test_cancelled_capture_leaves_no_photo() {
    let backend = campus();
    let screen = signed_in_screen(&backend).await;
    screen.take_photo(&FileCamera::new(None)).await.unwrap();
    assert!(screen.snapshot().form.photo.is_none());
}
