//! CLI command implementations

pub mod categories;
pub mod check;
pub mod distance;
pub mod list;
pub mod locate;
pub mod refresh;
pub mod saved;
pub mod watch;

use crate::context::View;
use crate::FilterArgs;

/// Push `--view`, `--category` and `--search` into the view.
pub fn apply_filters(view: &mut View, filters: &FilterArgs) {
    view.set_view_mode(filters.view.into());
    view.set_category(filters.category.as_deref());
    view.set_search(filters.search.clone().unwrap_or_default());
}
