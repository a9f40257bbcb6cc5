//! Categories command - list categories with their destination counts

use crate::context::Settings;
use crate::output::{print_json, print_notices, Status};
use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;
use tourmap_dashboard::Resource;
use tourmap_search::{apply, FilterCriteria};

#[derive(Debug, Serialize)]
struct CategoryDetail<'a> {
    id: &'a str,
    name: &'a str,
    icon: &'a str,
    destinations: usize,
}

pub async fn run(settings: &Settings, offline: bool) -> Result<()> {
    let schema = settings.load_config()?;
    let mut view = settings.view(&schema, None)?;
    let stale = view.mount();

    if !offline && stale.contains(&Resource::Categories) {
        view.refresh(Resource::Categories).await;
    }

    let details: Vec<CategoryDetail<'_>> = view
        .categories()
        .iter()
        .map(|category| CategoryDetail {
            id: &category.id,
            name: &category.name,
            icon: &category.icon,
            destinations: apply(view.destinations(), &FilterCriteria::new().with_category(category.id.as_str())).len(),
        })
        .collect();

    if settings.is_json() {
        print_json(&details)?;
    } else if details.is_empty() {
        Status::info("No categories cached");
    } else {
        Status::header("Categories");
        for detail in &details {
            println!(
                "  {} {:<6} {:<24} {}",
                detail.icon,
                detail.id.dimmed(),
                detail.name,
                detail.destinations.to_string().cyan()
            );
        }
    }

    print_notices(view.notices());
    Ok(())
}
