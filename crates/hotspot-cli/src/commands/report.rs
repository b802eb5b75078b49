//! Report commands: submit a report, list recent reports

use super::{parse_crowd_level, Workspace};
use crate::cli::{ReportArgs, ReportsArgs};
use crate::output::OutputWriter;
use crate::output_types::{RecentReportRow, ReportOutput, ReportsOutput};
use crate::progress;
use anyhow::{bail, Result};
use chrono::Utc;
use hotspot_app::device::{FileCamera, FixedPosition};
use hotspot_app::screens::{DetailScreen, ReportScreen};
use hotspot_core::models::LocationId;
use hotspot_store::ports::DocumentStore;
use std::time::Instant;

pub async fn submit(args: ReportArgs, workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let position = args.position.coordinate()?;
    let level = parse_crowd_level(&args.level)?;
    if let Some(ref photo) = args.photo {
        if !photo.is_file() {
            bail!("Photo not found: {}", photo.display());
        }
    }

    let screen = ReportScreen::new(workspace.context(), workspace.session());
    screen.activate(&FixedPosition(Some(position))).await;
    screen.toggle_crowd_level(level);
    if let Some(info) = args.info {
        screen.set_additional_info(info);
    }
    screen.take_photo(&FileCamera::new(args.photo)).await?;

    let state = screen.snapshot();
    if state.nearest.is_none() {
        output.warning("No known location nearby; the report will not be tied to a location");
    }

    let spinner = progress::create_spinner(output, "Submitting report...");
    let submitted = screen.submit(Instant::now()).await;
    progress::finish(&spinner);

    let notification = screen
        .snapshot()
        .notifier
        .visible(Instant::now())
        .map(|n| n.message.clone())
        .unwrap_or_default();
    let report = match submitted {
        Ok(report) => report,
        Err(e) => bail!("{} ({})", notification, e),
    };
    workspace.storage.save()?;

    let location = report.location_reported.as_ref().map(|l| l.name.clone());
    if output.is_json() {
        output.result(ReportOutput {
            report_id: report.id.to_string(),
            location,
            crowd_level: report.crowd_level.label().to_string(),
            author_name: report.author_name.clone(),
            photo_url: report.photo_url.clone(),
            notification,
        })?;
    } else {
        output.success(notification);
        output.kv("Title", &state.title);
        output.kv("Crowd level", report.crowd_level);
        output.kv("Reported by", &report.author_name);
        if let Some(url) = report.photo_url {
            output.kv("Photo", url);
        }
    }
    Ok(())
}

pub async fn recent(args: ReportsArgs, workspace: &Workspace, output: &OutputWriter) -> Result<()> {
    let context = workspace.context();
    let location_id = LocationId::new(args.location_id);

    let locations = context.documents.list_locations().await?;
    let location_name = match locations.iter().find(|l| l.id == location_id) {
        Some(location) => location.name.clone(),
        None => {
            output.warning(format!(
                "Location '{}' is not in the locations list; showing stored reports only",
                location_id
            ));
            location_id.to_string()
        }
    };

    let mut screen = DetailScreen::new(context, location_id.clone(), location_name.clone());
    let spinner = progress::create_spinner(output, "Loading reports...");
    let state = screen.load(Utc::now()).await.clone();
    progress::finish(&spinner);

    if let Some(ref error) = state.error {
        bail!("Error loading reports: {}", error);
    }

    let now = Utc::now();
    let headline = state.headline().to_string();
    let rows: Vec<RecentReportRow> = state.rows(now).into_iter().map(RecentReportRow::from).collect();

    if output.is_json() {
        return output.result(ReportsOutput {
            location_id: location_id.to_string(),
            location_name,
            headline,
            reports: rows,
        });
    }

    output.section(&location_name);
    output.line(&headline);
    output.section("Recent Reports");
    output.table(rows)
}
