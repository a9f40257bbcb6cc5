//! The nearby-destination view
//!
//! [`MapView`] is the single owner of dashboard state. Background work
//! (network refreshes, the location stream) only produces values; the view
//! applies them one at a time and recomputes what depends on them:
//!
//! ```text
//! collection / reference point  ->  proximity  ->  lists  ->  filter  ->  display
//! ```
//!
//! Filter changes only rerun the last stage.

use crate::display::{DisplayItem, MarkerIcons};
use crate::fetcher::{FetchOutcome, Fetcher, RequestFuture, Resource};
use crate::geolocation::{GeolocationError, LocationUpdate, LocationWatch};
use crate::notice::Notice;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::task::JoinSet;
use tourmap_api_client::normalize::{normalize_category, normalize_destination, RawCategory, RawDestination};
use tourmap_api_client::TourmapClient;
use tourmap_core::cache::{now_ms, CacheStore};
use tourmap_core::config::ConfigSchema;
use tourmap_core::saved::SavedSet;
use tourmap_core::storage::KeyValueStore;
use tourmap_core::{Category, Destination};
use tourmap_geo::{within_radius, ProximityResult, ReferencePoint};
use tourmap_search::{apply, select_base, CategorySelector, FilterCriteria, ViewMode};
use tracing::{debug, warn};

/// Where remote collections come from
pub trait CollectionSource: Clone + Send + Sync + 'static {
    fn fetch_destinations(&self) -> RequestFuture<RawDestination>;
    fn fetch_categories(&self) -> RequestFuture<RawCategory>;
}

impl CollectionSource for TourmapClient {
    fn fetch_destinations(&self) -> RequestFuture<RawDestination> {
        let api = self.destinations();
        Box::pin(async move { api.list_raw().await })
    }

    fn fetch_categories(&self) -> RequestFuture<RawCategory> {
        let api = self.categories();
        Box::pin(async move { api.list_raw().await })
    }
}

/// Tunables of the view, read once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    pub radius_km: f64,
    pub destinations_ttl_ms: i64,
    pub categories_ttl_ms: i64,
    pub icons: MarkerIcons,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self::from(&ConfigSchema::default())
    }
}

impl From<&ConfigSchema> for ViewSettings {
    fn from(config: &ConfigSchema) -> Self {
        Self {
            radius_km: config.proximity.radius_km,
            destinations_ttl_ms: config.cache.destinations_ttl_ms,
            categories_ttl_ms: config.cache.categories_ttl_ms,
            icons: MarkerIcons::from(&config.map),
        }
    }
}

impl ViewSettings {
    pub fn ttl_ms(&self, resource: Resource) -> i64 {
        match resource {
            Resource::Destinations => self.destinations_ttl_ms,
            Resource::Categories => self.categories_ttl_ms,
        }
    }
}

/// Result of a background refresh, ready to apply
#[derive(Debug)]
pub enum Refreshed {
    Destinations(FetchOutcome<Destination>),
    Categories(FetchOutcome<Category>),
}

impl Refreshed {
    pub fn resource(&self) -> Resource {
        match self {
            Self::Destinations(_) => Resource::Destinations,
            Self::Categories(_) => Resource::Categories,
        }
    }
}

/// What changed after applying an update
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Located(ReferencePoint),
    LocationFailed(GeolocationError),
    Refreshed(Resource),
    RefreshSuperseded(Resource),
    RefreshFailed(Resource),
}

type RefreshFuture = Pin<Box<dyn Future<Output = Refreshed> + Send>>;

/// Dashboard state and its derived lists
pub struct MapView<S, C> {
    source: C,
    cache: Arc<CacheStore<S>>,
    fetcher: Fetcher<S>,
    saved: SavedSet<S>,
    settings: ViewSettings,

    destinations: Vec<Destination>,
    categories: Vec<Category>,
    reference: Option<ReferencePoint>,
    nearby: Vec<ProximityResult<Destination>>,

    criteria: FilterCriteria,
    all_items: Vec<DisplayItem>,
    nearby_items: Vec<DisplayItem>,
    saved_items: Vec<DisplayItem>,
    display: Vec<DisplayItem>,

    notices: Vec<Notice>,
}

impl<S, C> MapView<S, C>
where
    S: KeyValueStore + Clone + 'static,
    C: CollectionSource,
{
    /// Build a view over `store`. Cache and saved set share the store
    /// under disjoint keys.
    pub fn new(store: S, source: C, settings: ViewSettings) -> Self {
        let cache = Arc::new(CacheStore::new(store.clone()));
        let mut view = Self {
            source,
            fetcher: Fetcher::new(Arc::clone(&cache)),
            cache,
            saved: SavedSet::load(store),
            settings,
            destinations: Vec::new(),
            categories: Vec::new(),
            reference: None,
            nearby: Vec::new(),
            criteria: FilterCriteria::default(),
            all_items: Vec::new(),
            nearby_items: Vec::new(),
            saved_items: Vec::new(),
            display: Vec::new(),
            notices: Vec::new(),
        };
        view.rebuild_lists();
        view
    }

    /// Show whatever is cached and report what needs refetching.
    ///
    /// Cached data is shown even when stale; only absent or stale
    /// resources are returned.
    pub fn mount(&mut self) -> Vec<Resource> {
        self.mount_at(now_ms())
    }

    /// [`mount`](Self::mount) against an explicit clock.
    pub fn mount_at(&mut self, now_ms: i64) -> Vec<Resource> {
        let mut stale = Vec::new();

        let (destinations, fresh) = self.load_cached::<Destination>(Resource::Destinations, now_ms);
        if let Some(destinations) = destinations {
            self.destinations = destinations;
        }
        if !fresh {
            stale.push(Resource::Destinations);
        }

        let (categories, fresh) = self.load_cached::<Category>(Resource::Categories, now_ms);
        if let Some(categories) = categories {
            self.categories = categories;
        }
        if !fresh {
            stale.push(Resource::Categories);
        }

        self.recompute_proximity();
        debug!(destinations = self.destinations.len(), ?stale, "mounted from cache");
        stale
    }

    fn load_cached<T: DeserializeOwned>(&self, resource: Resource, now_ms: i64) -> (Option<Vec<T>>, bool) {
        match self.cache.read::<Vec<T>>(resource.cache_key()) {
            Some(entry) => {
                let fresh = CacheStore::<S>::is_fresh_at(&entry, self.settings.ttl_ms(resource), now_ms);
                (Some(entry.data), fresh)
            }
            None => (None, false),
        }
    }

    /// Issue a fetch of `resource` now and return its completion.
    ///
    /// The returned future owns everything it needs, so it can run on
    /// another task while the view keeps handling events.
    pub fn start_refresh(&self, resource: Resource) -> RefreshFuture {
        match resource {
            Resource::Destinations => {
                let fetch = self.fetcher.fetch_collection(
                    resource,
                    self.source.fetch_destinations(),
                    normalize_destination,
                );
                Box::pin(async move { Refreshed::Destinations(fetch.await) })
            }
            Resource::Categories => {
                let fetch =
                    self.fetcher
                        .fetch_collection(resource, self.source.fetch_categories(), normalize_category);
                Box::pin(async move { Refreshed::Categories(fetch.await) })
            }
        }
    }

    /// Fetch `resource` and apply the result.
    pub async fn refresh(&mut self, resource: Resource) -> ViewEvent {
        let refreshed = self.start_refresh(resource).await;
        self.apply_refresh(refreshed)
    }

    /// Apply a finished refresh. Failures keep the current collection.
    pub fn apply_refresh(&mut self, refreshed: Refreshed) -> ViewEvent {
        let resource = refreshed.resource();

        match refreshed {
            Refreshed::Destinations(FetchOutcome::Fresh(destinations)) => {
                self.destinations = destinations;
                self.recompute_proximity();
                ViewEvent::Refreshed(resource)
            }
            Refreshed::Categories(FetchOutcome::Fresh(categories)) => {
                self.categories = categories;
                ViewEvent::Refreshed(resource)
            }
            Refreshed::Destinations(FetchOutcome::Superseded) | Refreshed::Categories(FetchOutcome::Superseded) => {
                ViewEvent::RefreshSuperseded(resource)
            }
            Refreshed::Destinations(FetchOutcome::Failed(err)) | Refreshed::Categories(FetchOutcome::Failed(err)) => {
                self.push_notice(Notice::fetch_failed(resource, err.user_message()));
                ViewEvent::RefreshFailed(resource)
            }
        }
    }

    /// Replace the reference point, or clear it when the reading failed.
    pub fn apply_location(&mut self, update: LocationUpdate) -> ViewEvent {
        let event = match update {
            Ok(point) => {
                self.reference = Some(point);
                ViewEvent::Located(point)
            }
            Err(err) => {
                self.reference = None;
                self.push_notice(Notice::geolocation(err));
                ViewEvent::LocationFailed(err)
            }
        };
        self.recompute_proximity();
        event
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.criteria.view_mode = view_mode;
        self.refilter();
    }

    pub fn set_category(&mut self, category: impl Into<CategorySelector>) {
        self.criteria.category = category.into();
        self.refilter();
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.criteria.search = search.into();
        self.refilter();
    }

    /// Back to all destinations, every category, no search.
    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.refilter();
    }

    /// Save or unsave a destination from the collection or the saved set.
    ///
    /// Returns whether it is saved afterwards. A storage failure leaves the
    /// set unchanged and raises a notice.
    pub fn toggle_saved(&mut self, id: &str) -> tourmap_core::Result<bool> {
        let destination = self
            .destinations
            .iter()
            .chain(self.saved.items())
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| tourmap_core::Error::validation(format!("Unknown destination '{id}'")))?;

        match self.saved.toggle(&destination) {
            Ok(saved) => {
                self.rebuild_lists();
                Ok(saved)
            }
            Err(err) => {
                self.push_notice(Notice::save_failed(id, err.message.clone()));
                Err(err)
            }
        }
    }

    /// Drive the view from the location stream and background refreshes.
    ///
    /// Returns when `shutdown` resolves, or once the location stream has
    /// ended and every refresh has been applied. The location watch is
    /// cancelled on the way out.
    pub async fn run<F>(&mut self, watch: LocationWatch, refresh: &[Resource], shutdown: F)
    where
        F: Future<Output = ()>,
    {
        self.run_with(watch, refresh, shutdown, |_, _| {}).await;
    }

    /// [`run`](Self::run), calling `on_event` after every applied update.
    pub async fn run_with<F, H>(&mut self, mut watch: LocationWatch, refresh: &[Resource], shutdown: F, mut on_event: H)
    where
        F: Future<Output = ()>,
        H: FnMut(&Self, &ViewEvent),
    {
        let mut pending = JoinSet::new();
        for &resource in refresh {
            pending.spawn(self.start_refresh(resource));
        }

        tokio::pin!(shutdown);
        let mut watching = true;

        loop {
            if !watching && pending.is_empty() {
                break;
            }

            tokio::select! {
                () = &mut shutdown => {
                    debug!("shutdown requested");
                    break;
                }
                update = watch.recv(), if watching => match update {
                    Some(update) => {
                        let event = self.apply_location(update);
                        on_event(&*self, &event);
                    }
                    None => {
                        debug!("location stream ended");
                        watching = false;
                    }
                },
                Some(joined) = pending.join_next(), if !pending.is_empty() => match joined {
                    Ok(refreshed) => {
                        let event = self.apply_refresh(refreshed);
                        on_event(&*self, &event);
                    }
                    Err(err) => warn!(error = %err, "refresh task failed"),
                },
            }
        }

        watch.cancel();
    }

    fn push_notice(&mut self, notice: Notice) {
        if self.notices.last() != Some(&notice) {
            self.notices.push(notice);
        }
    }

    fn recompute_proximity(&mut self) {
        self.nearby = within_radius(self.reference.as_ref(), &self.destinations, self.settings.radius_km);
        self.rebuild_lists();
    }

    fn rebuild_lists(&mut self) {
        let reference = self.reference.as_ref();
        let icons = &self.settings.icons;
        let saved = &self.saved;

        self.all_items = self
            .destinations
            .iter()
            .map(|d| DisplayItem::measured(d, reference, icons, saved.is_saved(&d.id)))
            .collect();
        self.nearby_items = self
            .nearby
            .iter()
            .map(|r| DisplayItem::from_proximity(r, icons, saved.is_saved(&r.item.id)))
            .collect();
        self.saved_items = saved
            .items()
            .iter()
            .map(|d| DisplayItem::measured(d, reference, icons, true))
            .collect();

        self.refilter();
    }

    fn refilter(&mut self) {
        let base = select_base(
            self.criteria.view_mode,
            &self.all_items,
            &self.nearby_items,
            &self.saved_items,
        );
        self.display = apply(base, &self.criteria);
    }

    /// Filtered list for the current criteria
    pub fn display(&self) -> &[DisplayItem] {
        &self.display
    }

    pub fn nearby(&self) -> &[ProximityResult<Destination>] {
        &self.nearby
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn reference(&self) -> Option<&ReferencePoint> {
        self.reference.as_ref()
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn saved(&self) -> &SavedSet<S> {
        &self.saved
    }

    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Hand pending notices to the caller.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geolocation::{PositionOptions, ReplayPositions};
    use std::sync::Mutex;
    use std::time::Duration;
    use tourmap_api_client::{ApiError, ApiResult};
    use tourmap_core::cache::{CATEGORIES_KEY, DESTINATIONS_KEY};
    use tourmap_core::storage::MemoryStore;

    const MANILA: (f64, f64) = (14.5995, 120.9842);

    /// Serves canned JSON, or an HTTP status when `status` is set.
    #[derive(Clone, Default)]
    struct FakeSource {
        destinations: Arc<Mutex<Vec<serde_json::Value>>>,
        status: Arc<Mutex<Option<u16>>>,
        calls: Arc<Mutex<usize>>,
    }

    impl FakeSource {
        fn with_destinations(records: Vec<serde_json::Value>) -> Self {
            let source = Self::default();
            *source.destinations.lock().unwrap() = records;
            source
        }

        fn fail_with(&self, status: u16) {
            *self.status.lock().unwrap() = Some(status);
        }

        fn respond<R: DeserializeOwned>(&self, records: Vec<serde_json::Value>) -> ApiResult<Vec<R>> {
            *self.calls.lock().unwrap() += 1;
            if let Some(status) = *self.status.lock().unwrap() {
                return Err(ApiError::api_response(status, "unavailable"));
            }
            Ok(serde_json::from_value(serde_json::Value::Array(records))?)
        }
    }

    impl CollectionSource for FakeSource {
        fn fetch_destinations(&self) -> RequestFuture<RawDestination> {
            let result = self.respond(self.destinations.lock().unwrap().clone());
            Box::pin(async move { result })
        }

        fn fetch_categories(&self) -> RequestFuture<RawCategory> {
            let result = self.respond(vec![
                serde_json::json!({"id": 1, "name": "Beach", "icon": "🏖️"}),
                serde_json::json!({"id": 2, "name": "Heritage"}),
            ]);
            Box::pin(async move { result })
        }
    }

    /// Destination `km` kilometers due north of Manila.
    fn north_of_manila(id: &str, km: f64, category: &str) -> serde_json::Value {
        let latitude = MANILA.0 + km / 111.195;
        serde_json::json!({
            "id": id,
            "name": format!("Spot {id}"),
            "category": {"id": category, "name": category},
            "coordinates": {"latitude": latitude, "longitude": MANILA.1},
            "address": {"city": "Quezon City"},
        })
    }

    fn manila() -> ReferencePoint {
        ReferencePoint::new(MANILA.0, MANILA.1, 10.0)
    }

    fn view(source: FakeSource) -> (MapView<Arc<MemoryStore>, FakeSource>, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (MapView::new(Arc::clone(&store), source, ViewSettings::default()), store)
    }

    fn ids(view: &MapView<Arc<MemoryStore>, FakeSource>) -> Vec<&str> {
        view.display().iter().map(DisplayItem::id).collect()
    }

    fn three_spots() -> FakeSource {
        FakeSource::with_destinations(vec![
            north_of_manila("near", 10.0, "Beach"),
            north_of_manila("mid", 60.0, "Beach"),
            north_of_manila("far", 200.0, "Heritage"),
        ])
    }

    #[tokio::test]
    async fn test_nearby_view_end_to_end() {
        let (mut view, _) = view(three_spots());

        assert_eq!(view.mount(), vec![Resource::Destinations, Resource::Categories]);
        assert_eq!(view.refresh(Resource::Destinations).await, ViewEvent::Refreshed(Resource::Destinations));
        assert_eq!(ids(&view), ["near", "mid", "far"]);

        view.set_view_mode(ViewMode::Nearby);
        assert!(view.display().is_empty());

        view.apply_location(Ok(manila()));
        assert_eq!(ids(&view), ["near"]);
        let distance = view.display()[0].distance_km.unwrap();
        assert!((distance - 10.0).abs() < 0.1, "{distance}");
    }

    #[tokio::test]
    async fn test_fresh_cache_skips_refetch() {
        let source = three_spots();
        let (mut view, store) = view(source.clone());
        view.refresh(Resource::Destinations).await;
        view.refresh(Resource::Categories).await;
        assert_eq!(*source.calls.lock().unwrap(), 2);

        let mut remounted = MapView::new(store, source.clone(), ViewSettings::default());
        assert!(remounted.mount().is_empty());
        assert_eq!(remounted.destinations().len(), 3);
        assert_eq!(remounted.categories().len(), 2);
        assert_eq!(*source.calls.lock().unwrap(), 2);
    }

    #[test]
    fn test_stale_cache_is_shown_and_refetched() {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheStore::new(Arc::clone(&store));
        let written = 1_000_000;
        cache.write_at(DESTINATIONS_KEY, &vec![Destination::new("1", "Old", 10.0, 123.0)], written);
        cache.write_at(CATEGORIES_KEY, &Vec::<Category>::new(), written);

        let mut view = MapView::new(store, FakeSource::default(), ViewSettings::default());
        let stale = view.mount_at(written + 150_000);

        // destinations live 120 s, categories 300 s
        assert_eq!(stale, vec![Resource::Destinations]);
        assert_eq!(view.destinations()[0].name, "Old");
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_data_and_raises_notice() {
        let source = three_spots();
        let (mut view, _) = view(source.clone());
        view.refresh(Resource::Destinations).await;

        source.fail_with(503);
        let event = view.refresh(Resource::Destinations).await;

        assert_eq!(event, ViewEvent::RefreshFailed(Resource::Destinations));
        assert_eq!(view.destinations().len(), 3);
        assert!(matches!(
            view.notices(),
            [Notice::FetchFailed { resource: Resource::Destinations, .. }]
        ));
        assert_eq!(view.take_notices().len(), 1);
        assert!(view.notices().is_empty());
    }

    #[tokio::test]
    async fn test_superseded_refresh_is_ignored() {
        let (mut view, _) = view(three_spots());
        let older = view.start_refresh(Resource::Destinations);
        let newer = view.start_refresh(Resource::Destinations);

        let older = older.await;
        assert_eq!(view.apply_refresh(older), ViewEvent::RefreshSuperseded(Resource::Destinations));
        assert!(view.destinations().is_empty());

        let newer = newer.await;
        assert_eq!(view.apply_refresh(newer), ViewEvent::Refreshed(Resource::Destinations));
        assert_eq!(view.destinations().len(), 3);
    }

    #[tokio::test]
    async fn test_location_failure_empties_nearby() {
        let (mut view, _) = view(three_spots());
        view.refresh(Resource::Destinations).await;
        view.set_view_mode(ViewMode::Nearby);

        view.apply_location(Ok(manila()));
        assert_eq!(view.nearby().len(), 1);

        let event = view.apply_location(Err(GeolocationError::PermissionDenied));
        assert_eq!(event, ViewEvent::LocationFailed(GeolocationError::PermissionDenied));
        assert!(view.nearby().is_empty());
        assert!(view.display().is_empty());
        assert!(view.reference().is_none());

        view.apply_location(Err(GeolocationError::PermissionDenied));
        assert_eq!(view.notices().len(), 1);
    }

    #[tokio::test]
    async fn test_filters_compose_and_reset() {
        let (mut view, _) = view(three_spots());
        view.refresh(Resource::Destinations).await;

        view.set_category("beach");
        assert_eq!(ids(&view), ["near", "mid"]);

        view.set_search("spot m");
        assert_eq!(ids(&view), ["mid"]);

        view.set_search("quezon");
        assert_eq!(ids(&view), ["near", "mid"]);

        view.reset_filters();
        assert_eq!(view.criteria(), &FilterCriteria::default());
        assert_eq!(ids(&view), ["near", "mid", "far"]);
    }

    #[tokio::test]
    async fn test_saved_view_and_persistence() {
        let source = three_spots();
        let (mut view, store) = view(source.clone());
        view.refresh(Resource::Destinations).await;

        assert!(view.toggle_saved("far").unwrap());
        view.set_view_mode(ViewMode::Saved);
        assert_eq!(ids(&view), ["far"]);
        assert!(view.display()[0].saved);

        let mut reloaded = MapView::new(store, source, ViewSettings::default());
        reloaded.set_view_mode(ViewMode::Saved);
        assert_eq!(reloaded.display().len(), 1);
        assert_eq!(reloaded.saved().items()[0], view.saved().items()[0]);

        // saved items stay reachable before the collection loads
        assert!(!reloaded.toggle_saved("far").unwrap());
        assert!(reloaded.display().is_empty());
    }

    #[test]
    fn test_toggle_unknown_id() {
        let (mut view, _) = view(FakeSource::default());
        let err = view.toggle_saved("missing").unwrap_err();
        assert_eq!(err.code, tourmap_core::ErrorCode::ValidationError);
    }

    #[test]
    fn test_save_failure_raises_notice() {
        let store = Arc::new(MemoryStore::with_quota(16));
        let mut view = MapView::new(store, FakeSource::default(), ViewSettings::default());
        view.destinations = vec![Destination::new("1", "Fort San Pedro", 10.2925, 123.9056)];

        assert!(view.toggle_saved("1").is_err());
        assert!(!view.saved().is_saved("1"));
        assert!(matches!(view.notices(), [Notice::SaveFailed { .. }]));
    }

    #[tokio::test]
    async fn test_run_applies_replay_and_refreshes() {
        let (mut view, _) = view(three_spots());
        view.set_view_mode(ViewMode::Nearby);
        let stale = view.mount();

        let replay = ReplayPositions::new([Ok(manila()), Err(GeolocationError::Timeout), Ok(manila())]);
        let options = PositionOptions {
            poll_interval: Duration::from_millis(1),
            ..PositionOptions::default()
        };
        let watch = LocationWatch::spawn(replay, options);

        let mut events = Vec::new();
        view.run_with(watch, &stale, std::future::pending(), |_, event| events.push(event.clone()))
            .await;

        assert!(events.contains(&ViewEvent::Refreshed(Resource::Destinations)));
        assert!(events.contains(&ViewEvent::Refreshed(Resource::Categories)));
        assert!(events.contains(&ViewEvent::LocationFailed(GeolocationError::Timeout)));
        assert_eq!(view.reference(), Some(&manila()));
        assert_eq!(ids(&view), ["near"]);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let (mut view, _) = view(FakeSource::default());
        let watch = LocationWatch::spawn(
            crate::geolocation::FixedPosition(manila()),
            PositionOptions {
                poll_interval: Duration::from_millis(5),
                ..PositionOptions::default()
            },
        );

        view.run(watch, &[], tokio::time::sleep(Duration::from_millis(30))).await;
        assert_eq!(view.reference(), Some(&manila()));
    }
}
