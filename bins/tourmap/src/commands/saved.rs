//! Save and saved commands - the bookmark list

use crate::context::Settings;
use crate::output::{print_items, print_json, print_notices, Status};
use anyhow::Result;
use serde_json::json;
use tourmap_search::ViewMode;

/// Flip the saved state of one destination.
pub async fn toggle(settings: &Settings, id: &str, offline: bool) -> Result<()> {
    let schema = settings.load_config()?;
    let mut view = settings.mounted_view(&schema, None, offline).await?;
    let result = view.toggle_saved(id);
    print_notices(&view.take_notices());
    let saved = result?;

    if settings.is_json() {
        print_json(&json!({ "id": id, "saved": saved }))?;
    } else if saved {
        Status::success(&format!("Saved destination {id}"));
    } else {
        Status::success(&format!("Removed destination {id} from saved"));
    }
    Ok(())
}

/// Print the saved set. Works without a network connection.
pub fn list(settings: &Settings) -> Result<()> {
    let schema = settings.load_config()?;
    let mut view = settings.view(&schema, None)?;
    view.set_view_mode(ViewMode::Saved);

    if settings.is_json() {
        print_json(view.display())?;
    } else {
        Status::header("Saved destinations");
        print_items(view.display());
    }
    Ok(())
}
