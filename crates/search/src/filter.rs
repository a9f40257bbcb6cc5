//! View-mode, category and search filtering.

use crate::category::{resolve_category_key, Categorized};
use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tourmap_geo::ProximityResult;

/// Which base set a list is drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Every destination in the collection
    #[default]
    All,
    /// Destinations within the proximity radius, closest first
    Nearby,
    /// Destinations bookmarked on this device
    Saved,
}

impl ViewMode {
    /// Lowercase name as used on the command line and in JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::All => "all",
            ViewMode::Nearby => "nearby",
            ViewMode::Saved => "saved",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ViewMode::All),
            "nearby" => Ok(ViewMode::Nearby),
            "saved" => Ok(ViewMode::Saved),
            other => Err(SearchError::InvalidViewMode(other.to_string())),
        }
    }
}

/// Category part of the criteria: everything, or one id/name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategorySelector {
    /// No category restriction
    #[default]
    All,
    /// Category id or name to match
    Key(String),
}

impl From<&str> for CategorySelector {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            CategorySelector::All
        } else {
            CategorySelector::Key(value.to_string())
        }
    }
}

impl From<Option<&str>> for CategorySelector {
    fn from(value: Option<&str>) -> Self {
        value.map_or(CategorySelector::All, |v: &str| Self::from(v))
    }
}

/// Transient list criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Base set selector
    pub view_mode: ViewMode,
    /// Category restriction
    pub category: CategorySelector,
    /// Free-text query, matched case-insensitively
    pub search: String,
}

impl FilterCriteria {
    /// Criteria that keep everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the view mode.
    #[must_use]
    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    /// Set the category selector.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<CategorySelector>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the search text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// Normalized query, or `None` when the search stage is a no-op.
    fn query(&self) -> Option<String> {
        let trimmed = self.search.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
    }
}

/// An entity the pipeline can filter.
pub trait Filterable: Categorized {
    /// Text fields searched by the free-text stage: name, category name,
    /// raw category, description, address, barangay and city. Missing fields
    /// are simply left out.
    fn search_fields(&self) -> Vec<&str>;
}

impl<T: Categorized> Categorized for ProximityResult<T> {
    fn category_id(&self) -> Option<&str> {
        self.item.category_id()
    }

    fn category_name(&self) -> Option<&str> {
        self.item.category_name()
    }

    fn category_raw(&self) -> Option<&str> {
        self.item.category_raw()
    }
}

impl<T: Filterable> Filterable for ProximityResult<T> {
    fn search_fields(&self) -> Vec<&str> {
        self.item.search_fields()
    }
}

/// Pick the base set for a view mode.
pub fn select_base<'a, T>(view_mode: ViewMode, all: &'a [T], nearby: &'a [T], saved: &'a [T]) -> &'a [T] {
    match view_mode {
        ViewMode::All => all,
        ViewMode::Nearby => nearby,
        ViewMode::Saved => saved,
    }
}

/// True when the lowercased `query` occurs in any searchable field.
pub fn matches_search<T: Filterable + ?Sized>(item: &T, query: &str) -> bool {
    item.search_fields()
        .into_iter()
        .any(|field| field.to_lowercase().contains(query))
}

fn matches_category<T: Categorized + ?Sized>(item: &T, selector: &CategorySelector) -> bool {
    match selector {
        CategorySelector::All => true,
        CategorySelector::Key(key) => resolve_category_key(item).matches(key),
    }
}

/// Apply the category stage, then the search stage, to `base`.
///
/// Order of `base` is preserved. An `All` selector or a blank query leaves
/// its stage as the identity.
///
/// # Example
/// ```
/// use tourmap_search::{apply, Categorized, Filterable, FilterCriteria};
///
/// #[derive(Clone)]
/// struct Spot { name: &'static str, category: &'static str }
///
/// impl Categorized for Spot {
///     fn category_id(&self) -> Option<&str> { None }
///     fn category_name(&self) -> Option<&str> { Some(self.category) }
/// }
///
/// impl Filterable for Spot {
///     fn search_fields(&self) -> Vec<&str> { vec![self.name, self.category] }
/// }
///
/// let spots = vec![
///     Spot { name: "Kawasan Falls", category: "Waterfalls" },
///     Spot { name: "Fort San Pedro", category: "Heritage" },
/// ];
///
/// let criteria = FilterCriteria::new().with_category("heritage");
/// let result = apply(&spots, &criteria);
/// assert_eq!(result.len(), 1);
/// assert_eq!(result[0].name, "Fort San Pedro");
/// ```
pub fn apply<T: Filterable + Clone>(base: &[T], criteria: &FilterCriteria) -> Vec<T> {
    let query = criteria.query();

    base.iter()
        .filter(|item| matches_category(*item, &criteria.category))
        .filter(|item| query.as_deref().is_none_or(|q| matches_search(*item, q)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Spot {
        name: String,
        category_id: Option<String>,
        category_name: Option<String>,
        description: Option<String>,
        address: String,
        barangay: Option<String>,
        city: Option<String>,
    }

    impl Categorized for Spot {
        fn category_id(&self) -> Option<&str> {
            self.category_id.as_deref()
        }
        fn category_name(&self) -> Option<&str> {
            self.category_name.as_deref()
        }
    }

    impl Filterable for Spot {
        fn search_fields(&self) -> Vec<&str> {
            let mut fields = vec![self.name.as_str(), self.address.as_str()];
            fields.extend(self.category_name.as_deref());
            fields.extend(self.description.as_deref());
            fields.extend(self.barangay.as_deref());
            fields.extend(self.city.as_deref());
            fields
        }
    }

    fn spot(name: &str, category_id: &str, category_name: &str, city: &str) -> Spot {
        Spot {
            name: name.to_string(),
            category_id: Some(category_id.to_string()),
            category_name: Some(category_name.to_string()),
            city: Some(city.to_string()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Spot> {
        vec![
            spot("Magellan's Cross", "1", "Heritage", "Cebu City"),
            spot("Kawasan Falls", "2", "Waterfalls", "Badian"),
            spot("Basilica del Santo Nino", "1", "Heritage", "Cebu City"),
            spot("Moalboal Reef", "3", "Beach", "Moalboal"),
        ]
    }

    fn names(spots: &[Spot]) -> Vec<&str> {
        spots.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let spots = sample();
        assert_eq!(apply(&spots, &FilterCriteria::new()), spots);
        assert_eq!(apply(&spots, &FilterCriteria::new().with_search("   ")), spots);
    }

    #[test]
    fn test_category_by_name_or_id() {
        let spots = sample();
        let by_name = apply(&spots, &FilterCriteria::new().with_category("HERITAGE"));
        let by_id = apply(&spots, &FilterCriteria::new().with_category("1"));
        assert_eq!(names(&by_name), vec!["Magellan's Cross", "Basilica del Santo Nino"]);
        assert_eq!(by_name, by_id);
    }

    #[test]
    fn test_search_matches_city_only() {
        let spots = sample();
        let result = apply(&spots, &FilterCriteria::new().with_search("badian"));
        assert_eq!(names(&result), vec!["Kawasan Falls"]);
    }

    #[test]
    fn test_search_is_or_across_fields() {
        let mut spots = sample();
        spots[3].description = Some("Sardine run and turtles".to_string());
        let result = apply(&spots, &FilterCriteria::new().with_search(" TURTLES "));
        assert_eq!(names(&result), vec!["Moalboal Reef"]);

        let result = apply(&spots, &FilterCriteria::new().with_search("cebu"));
        assert_eq!(names(&result), vec!["Magellan's Cross", "Basilica del Santo Nino"]);
    }

    #[test]
    fn test_category_then_search_compose() {
        let spots = sample();
        let criteria = FilterCriteria::new().with_category("heritage").with_search("cross");
        assert_eq!(names(&apply(&spots, &criteria)), vec!["Magellan's Cross"]);

        let criteria = FilterCriteria::new().with_category("beach").with_search("cross");
        assert!(apply(&spots, &criteria).is_empty());
    }

    #[test]
    fn test_view_mode_parsing() {
        assert_eq!("Nearby".parse::<ViewMode>().unwrap(), ViewMode::Nearby);
        assert_eq!(" saved ".parse::<ViewMode>().unwrap(), ViewMode::Saved);
        assert_eq!(
            "map".parse::<ViewMode>(),
            Err(SearchError::InvalidViewMode("map".to_string()))
        );
        assert_eq!(ViewMode::Nearby.to_string(), "nearby");
    }

    #[test]
    fn test_category_selector_from_str() {
        assert_eq!(CategorySelector::from("All"), CategorySelector::All);
        assert_eq!(CategorySelector::from(""), CategorySelector::All);
        assert_eq!(CategorySelector::from(None), CategorySelector::All);
        assert_eq!(CategorySelector::from(" Beach "), CategorySelector::Key("Beach".to_string()));
    }

    #[test]
    fn test_select_base() {
        let all = [1, 2, 3];
        let nearby = [2];
        let saved = [3, 1];
        assert_eq!(select_base(ViewMode::All, &all, &nearby, &saved), &all);
        assert_eq!(select_base(ViewMode::Nearby, &all, &nearby, &saved), &nearby);
        assert_eq!(select_base(ViewMode::Saved, &all, &nearby, &saved), &saved);
    }

    #[test]
    fn test_proximity_results_keep_distance_order() {
        let spots = sample();
        let nearby: Vec<ProximityResult<Spot>> = vec![
            ProximityResult { item: spots[2].clone(), distance: 1.0 },
            ProximityResult { item: spots[0].clone(), distance: 2.5 },
            ProximityResult { item: spots[1].clone(), distance: 9.0 },
        ];

        let result = apply(&nearby, &FilterCriteria::new().with_category("heritage"));
        let distances: Vec<f64> = result.iter().map(|r| r.distance).collect();
        assert_eq!(distances, vec![1.0, 2.5]);
    }

    #[test]
    fn test_criteria_serde_shape() {
        let criteria = FilterCriteria::new()
            .with_view_mode(ViewMode::Nearby)
            .with_category("beach");
        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(json["view_mode"], "nearby");
        assert_eq!(json["category"]["key"], "beach");
    }

    proptest! {
        #[test]
        fn prop_apply_is_idempotent(
            query in "[a-z ]{0,6}",
            category in prop_oneof![Just("all"), Just("heritage"), Just("2"), Just("beach")],
        ) {
            let spots = sample();
            let criteria = FilterCriteria::new().with_category(category).with_search(query);

            let once = apply(&spots, &criteria);
            let twice = apply(&once, &criteria);
            prop_assert_eq!(&once, &twice);
            prop_assert_eq!(apply(&spots, &criteria), once);
        }
    }
}
