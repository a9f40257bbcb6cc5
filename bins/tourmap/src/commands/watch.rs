//! Watch command - replay a track through the dashboard event loop

use super::apply_filters;
use crate::context::{Settings, View};
use crate::output::{print_items, print_notices, Status};
use crate::FilterArgs;
use anyhow::Result;
use serde_json::json;
use std::path::Path;
use std::time::Duration;
use tourmap_dashboard::{LocationWatch, PositionOptions, ReplayPositions, ViewEvent};

pub async fn run(
    settings: &Settings,
    replay: &Path,
    filters: &FilterArgs,
    interval_ms: Option<u64>,
    offline: bool,
) -> Result<()> {
    let positions = ReplayPositions::from_file(replay)?;
    if positions.is_empty() {
        Status::warning("Track has no positions");
        return Ok(());
    }

    let schema = settings.load_config()?;
    let mut view = settings.view(&schema, None)?;
    let stale = view.mount();
    apply_filters(&mut view, filters);

    let mut options = PositionOptions::from(&schema.geolocation);
    if let Some(ms) = interval_ms {
        options.poll_interval = Duration::from_millis(ms);
    }

    let refresh = if offline { Vec::new() } else { stale };
    let watch = LocationWatch::spawn(positions, options);
    let json = settings.is_json();

    view.run_with(watch, &refresh, std::future::pending(), |view, event| report(view, event, json))
        .await;

    print_notices(&view.take_notices());
    Ok(())
}

fn report(view: &View, event: &ViewEvent, json: bool) {
    if json {
        let line = match event {
            ViewEvent::Located(point) => json!({ "event": "located", "position": point, "items": view.display() }),
            ViewEvent::LocationFailed(err) => json!({ "event": "location_failed", "code": err.code() }),
            ViewEvent::Refreshed(resource) => json!({ "event": "refreshed", "resource": resource }),
            ViewEvent::RefreshFailed(resource) => json!({ "event": "refresh_failed", "resource": resource }),
            ViewEvent::RefreshSuperseded(_) => return,
        };
        println!("{line}");
        return;
    }

    match event {
        ViewEvent::Located(point) => {
            Status::header(&format!(
                "At {:.4}, {:.4} (±{:.0} m)",
                point.latitude, point.longitude, point.accuracy
            ));
            print_items(view.display());
        }
        ViewEvent::LocationFailed(err) => Status::warning(err.user_message()),
        ViewEvent::Refreshed(resource) => Status::success(&format!("Refreshed {resource}")),
        ViewEvent::RefreshFailed(_) | ViewEvent::RefreshSuperseded(_) => {}
    }
}
