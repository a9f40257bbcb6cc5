//! List command - the dashboard's destination list
//!
//! Cached destinations are printed before any refetch starts. When the
//! refetch brings new destinations the list is printed again. JSON output is
//! a single document, so it is written once with the final state.

use super::apply_filters;
use crate::context::{Settings, View};
use crate::output::{print_items, print_json, print_notices, Status};
use crate::{FilterArgs, ViewArg};
use anyhow::Result;
use tourmap_dashboard::Resource;
use tourmap_geo::ReferencePoint;

pub async fn run(
    settings: &Settings,
    filters: &FilterArgs,
    near: Option<ReferencePoint>,
    radius_km: Option<f64>,
    offline: bool,
) -> Result<()> {
    let schema = settings.load_config()?;
    let (mut view, stale) = settings.mount(&schema, radius_km)?;

    if let Some(point) = near {
        view.apply_location(Ok(point));
    } else if filters.view == ViewArg::Nearby {
        Status::warning("No position given; pass --near LAT,LON to see nearby destinations");
    }
    apply_filters(&mut view, filters);

    let cached_first = renders_cached_first(settings.is_json(), offline, &stale, view.destinations().len());
    if cached_first {
        print_list(&view, filters, Some("cached"));
    }

    let refreshed = settings.refresh_stale(&mut view, &stale, offline).await;
    let notices = view.take_notices();

    if settings.is_json() {
        print_json(view.display())?;
    } else if !cached_first || refreshed {
        print_list(&view, filters, None);
    }

    print_notices(&notices);
    Ok(())
}

/// Whether the cached list is worth printing ahead of the refetch.
fn renders_cached_first(json: bool, offline: bool, stale: &[Resource], cached: usize) -> bool {
    !json && !offline && cached > 0 && stale.contains(&Resource::Destinations)
}

fn print_list(view: &View, filters: &FilterArgs, note: Option<&str>) {
    let title = match filters.view {
        ViewArg::All => "Destinations".to_string(),
        ViewArg::Nearby => format!("Within {} km", view.settings().radius_km),
        ViewArg::Saved => "Saved destinations".to_string(),
    };

    match note {
        Some(note) => Status::header(&format!("{title} ({note})")),
        None => Status::header(&title),
    }
    print_items(view.display());
}
