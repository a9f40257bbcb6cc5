//! Refresh command - fetch every collection now

use crate::context::Settings;
use crate::output::{print_json, print_notices, Status};
use anyhow::{bail, Result};
use serde::Serialize;
use tourmap_dashboard::{Resource, ViewEvent};

#[derive(Debug, Serialize)]
struct JsonRefreshOutput {
    destinations: usize,
    categories: usize,
    failed: Vec<Resource>,
}

pub async fn run(settings: &Settings) -> Result<()> {
    let schema = settings.load_config()?;
    let mut view = settings.view(&schema, None)?;
    view.mount();

    let mut failed = Vec::new();
    for resource in Resource::ALL {
        if let ViewEvent::RefreshFailed(resource) = view.refresh(resource).await {
            failed.push(resource);
        }
    }

    if settings.is_json() {
        print_json(&JsonRefreshOutput {
            destinations: view.destinations().len(),
            categories: view.categories().len(),
            failed: failed.clone(),
        })?;
    } else {
        for resource in Resource::ALL.iter().filter(|r| !failed.contains(r)) {
            let count = match resource {
                Resource::Destinations => view.destinations().len(),
                Resource::Categories => view.categories().len(),
            };
            Status::success(&format!("{count} {resource} cached"));
        }
    }

    print_notices(&view.take_notices());

    if !failed.is_empty() {
        let names: Vec<&str> = failed.iter().map(|r| r.as_str()).collect();
        bail!("Could not refresh {}", names.join(", "));
    }
    Ok(())
}
