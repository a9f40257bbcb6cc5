//! Network refresh with last-request-wins ordering
//!
//! Every fetch takes a ticket from a per-resource counter before it starts.
//! When the response arrives, it is only applied (and cached) if no newer
//! ticket was issued in the meantime. Responses to superseded requests are
//! dropped whether they succeeded or failed.

use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tourmap_api_client::{ApiError, ApiResult};
use tourmap_core::cache::{CacheStore, CATEGORIES_KEY, DESTINATIONS_KEY};
use tourmap_core::storage::KeyValueStore;
use tracing::{debug, info, warn};

/// Remote collections the dashboard keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Destinations,
    Categories,
}

impl Resource {
    pub const ALL: [Resource; 2] = [Resource::Destinations, Resource::Categories];

    /// Cache key the collection is stored under
    pub fn cache_key(self) -> &'static str {
        match self {
            Self::Destinations => DESTINATIONS_KEY,
            Self::Categories => CATEGORIES_KEY,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Destinations => "destinations",
            Self::Categories => "categories",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Destinations => 0,
            Self::Categories => 1,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proof of when a request was issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    resource: Resource,
    sequence: u64,
}

impl Ticket {
    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

/// Monotonic request counters, one per resource
#[derive(Debug, Default)]
pub struct RequestSequence {
    counters: [AtomicU64; 2],
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket for `resource`.
    pub fn issue(&self, resource: Resource) -> Ticket {
        let sequence = self.counters[resource.index()].fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { resource, sequence }
    }

    /// True if no ticket for the same resource was issued after `ticket`.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.counters[ticket.resource.index()].load(Ordering::SeqCst) == ticket.sequence
    }
}

/// How a fetch ended
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// Latest response; already written to the cache
    Fresh(Vec<T>),
    /// A newer request for the same resource was issued; nothing applied
    Superseded,
    /// Latest request failed; cached data stays as it was
    Failed(ApiError),
}

impl<T> FetchOutcome<T> {
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh(_))
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

/// Boxed, owned request future
pub type RequestFuture<R> = Pin<Box<dyn Future<Output = ApiResult<Vec<R>>> + Send>>;

/// Boxed, owned fetch future
pub type FetchFuture<T> = Pin<Box<dyn Future<Output = FetchOutcome<T>> + Send>>;

/// Runs remote requests and writes accepted results through to the cache
pub struct Fetcher<S> {
    cache: Arc<CacheStore<S>>,
    sequence: Arc<RequestSequence>,
}

impl<S> Clone for Fetcher<S> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            sequence: Arc::clone(&self.sequence),
        }
    }
}

impl<S: KeyValueStore + 'static> Fetcher<S> {
    pub fn new(cache: Arc<CacheStore<S>>) -> Self {
        Self {
            cache,
            sequence: Arc::new(RequestSequence::new()),
        }
    }

    pub fn sequence(&self) -> &RequestSequence {
        &self.sequence
    }

    /// Start a fetch of `resource`.
    ///
    /// The ticket is issued now, not when the returned future is first
    /// polled, so call order decides which request is newest. Records the
    /// normalizer rejects are skipped.
    pub fn fetch_collection<R, T, F>(&self, resource: Resource, request: RequestFuture<R>, mut normalize: F) -> FetchFuture<T>
    where
        R: Send + 'static,
        T: Serialize + Send + 'static,
        F: FnMut(R) -> Option<T> + Send + 'static,
    {
        let ticket = self.sequence.issue(resource);
        let cache = Arc::clone(&self.cache);
        let sequence = Arc::clone(&self.sequence);

        Box::pin(async move {
            let result = request.await;

            if !sequence.is_current(ticket) {
                debug!(%resource, ticket = ticket.sequence, "dropping superseded response");
                return FetchOutcome::Superseded;
            }

            match result {
                Ok(records) => {
                    let received = records.len();
                    let items: Vec<T> = records.into_iter().filter_map(&mut normalize).collect();
                    if items.len() < received {
                        warn!(%resource, skipped = received - items.len(), "dropped records that could not be normalized");
                    }
                    cache.write(resource.cache_key(), &items);
                    info!(%resource, count = items.len(), "refreshed");
                    FetchOutcome::Fresh(items)
                }
                Err(err) => {
                    warn!(%resource, error = %err, "refresh failed, keeping cached data");
                    FetchOutcome::Failed(err)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::oneshot;
    use tourmap_core::cache::CacheEntry;
    use tourmap_core::storage::MemoryStore;

    fn fetcher() -> Fetcher<Arc<MemoryStore>> {
        Fetcher::new(Arc::new(CacheStore::new(Arc::new(MemoryStore::new()))))
    }

    fn pending(rx: oneshot::Receiver<ApiResult<Vec<String>>>) -> RequestFuture<String> {
        Box::pin(async move { rx.await.unwrap() })
    }

    fn cached(fetcher: &Fetcher<Arc<MemoryStore>>, resource: Resource) -> Option<Vec<String>> {
        fetcher
            .cache
            .read::<Vec<String>>(resource.cache_key())
            .map(|entry: CacheEntry<Vec<String>>| entry.data)
    }

    #[test]
    fn test_tickets_are_per_resource() {
        let sequence = RequestSequence::new();
        let a = sequence.issue(Resource::Destinations);
        let b = sequence.issue(Resource::Categories);
        assert!(sequence.is_current(a));
        assert!(sequence.is_current(b));

        let c = sequence.issue(Resource::Destinations);
        assert!(!sequence.is_current(a));
        assert!(sequence.is_current(c));
        assert!(sequence.is_current(b));
    }

    #[tokio::test]
    async fn test_late_response_of_older_request_is_dropped() {
        let fetcher = fetcher();
        let (tx1, rx1) = oneshot::channel();
        let (tx2, rx2) = oneshot::channel();

        let first = tokio::spawn(fetcher.fetch_collection(Resource::Categories, pending(rx1), Some));
        let second = tokio::spawn(fetcher.fetch_collection(Resource::Categories, pending(rx2), Some));

        tx2.send(Ok(vec!["new".to_string()])).unwrap();
        let outcome = second.await.unwrap();
        assert!(matches!(outcome, FetchOutcome::Fresh(ref items) if items == &["new"]));

        tx1.send(Ok(vec!["old".to_string()])).unwrap();
        assert!(first.await.unwrap().is_superseded());

        assert_eq!(cached(&fetcher, Resource::Categories), Some(vec!["new".to_string()]));
    }

    #[tokio::test]
    async fn test_superseded_response_dropped_even_if_first_to_arrive() {
        let fetcher = fetcher();
        let (tx1, rx1) = oneshot::channel();
        let (tx2, rx2) = oneshot::channel();

        let first = tokio::spawn(fetcher.fetch_collection(Resource::Destinations, pending(rx1), Some));
        let second = tokio::spawn(fetcher.fetch_collection(Resource::Destinations, pending(rx2), Some));

        tx1.send(Ok(vec!["old".to_string()])).unwrap();
        assert!(first.await.unwrap().is_superseded());
        assert_eq!(cached(&fetcher, Resource::Destinations), None);

        tx2.send(Ok(vec!["new".to_string()])).unwrap();
        assert!(second.await.unwrap().is_fresh());
        assert_eq!(cached(&fetcher, Resource::Destinations), Some(vec!["new".to_string()]));
    }

    #[tokio::test]
    async fn test_failure_keeps_cache() {
        let fetcher = fetcher();
        fetcher.cache.write(Resource::Categories.cache_key(), &vec!["kept".to_string()]);

        let request: RequestFuture<String> =
            Box::pin(async { Err(ApiError::api_response(503, "maintenance")) });
        let outcome = fetcher.fetch_collection(Resource::Categories, request, Some).await;

        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert_eq!(cached(&fetcher, Resource::Categories), Some(vec!["kept".to_string()]));
    }

    #[tokio::test]
    async fn test_rejected_records_are_skipped() {
        let fetcher = fetcher();
        let request: RequestFuture<String> =
            Box::pin(async { Ok(vec!["a".to_string(), String::new(), "b".to_string()]) });

        let outcome = fetcher
            .fetch_collection(Resource::Categories, request, |s: String| (!s.is_empty()).then_some(s))
            .await;

        match outcome {
            FetchOutcome::Fresh(items) => assert_eq!(items, ["a", "b"]),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
