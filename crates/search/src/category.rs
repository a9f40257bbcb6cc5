//! Category resolution.
//!
//! Backends deliver a destination's category either as an object with an id
//! and a name or as a bare string. [`resolve_category_key`] folds both shapes
//! into one [`CategoryKey`] so filtering and display agree on what the
//! category is.

use serde::{Deserialize, Serialize};

/// Access to the category fields of an entity, whichever shape it arrived in.
pub trait Categorized {
    /// Category identifier, when delivered as an object.
    fn category_id(&self) -> Option<&str>;
    /// Category display name, when delivered as an object.
    fn category_name(&self) -> Option<&str>;
    /// Category delivered as a bare string.
    fn category_raw(&self) -> Option<&str> {
        None
    }
}

/// Resolved category identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKey {
    /// Category id, if known
    pub id: Option<String>,
    /// Category name, if known
    pub name: Option<String>,
}

impl CategoryKey {
    /// True when the selector equals the id or the name, ignoring case and
    /// surrounding whitespace.
    pub fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim().to_lowercase();
        if selector.is_empty() {
            return false;
        }

        [self.id.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .any(|candidate| candidate.trim().to_lowercase() == selector)
    }

    /// Name for display, falling back to the id.
    pub fn label(&self) -> Option<&str> {
        self.name.as_deref().or(self.id.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Resolve the category of `entity` into an id/name pair.
///
/// Object fields win. A bare string fills the id when it is numeric and the
/// name otherwise.
pub fn resolve_category_key<T: Categorized + ?Sized>(entity: &T) -> CategoryKey {
    let raw = non_empty(entity.category_raw());
    let raw_is_id = raw.is_some_and(|r| r.parse::<i64>().is_ok());

    let id = non_empty(entity.category_id())
        .or(if raw_is_id { raw } else { None })
        .map(str::to_string);
    let name = non_empty(entity.category_name())
        .or(if raw_is_id { None } else { raw })
        .map(str::to_string);

    CategoryKey { id, name }
}
