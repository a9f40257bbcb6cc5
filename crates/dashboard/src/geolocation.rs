//! Continuous location stream
//!
//! A [`PositionSource`] answers one reading at a time. [`LocationWatch`]
//! polls it on a blocking thread at a fixed interval, bounds every reading
//! by the configured timeout, and delivers the results over a channel. The
//! watch is the only long-lived resource of the dashboard: it stops when
//! cancelled or dropped, so no update arrives after the view is gone.

use std::collections::VecDeque;
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tourmap_core::config::GeolocationConfig;
use tourmap_core::ErrorCode;
use tourmap_geo::ReferencePoint;

/// Why a reading failed. Codes match the browser geolocation API.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("position unavailable")]
    PositionUnavailable,
    #[error("timed out waiting for a position")]
    Timeout,
}

impl GeolocationError {
    /// Browser-compatible numeric code
    pub fn code(self) -> u16 {
        match self {
            Self::PermissionDenied => 1,
            Self::PositionUnavailable => 2,
            Self::Timeout => 3,
        }
    }

    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            1 => Some(Self::PermissionDenied),
            2 => Some(Self::PositionUnavailable),
            3 => Some(Self::Timeout),
            _ => None,
        }
    }

    /// Message shown to the user
    pub fn user_message(self) -> &'static str {
        match self {
            Self::PermissionDenied => "Location access was denied, so nearby destinations cannot be shown.",
            Self::PositionUnavailable => "Your location could not be determined right now.",
            Self::Timeout => "Finding your location took too long.",
        }
    }

    /// What the user can do about it
    pub fn suggestion(self) -> &'static str {
        match self {
            Self::PermissionDenied => "Allow location access for this site in your browser or system settings.",
            Self::PositionUnavailable => "Check that location services are on and that you have a connection.",
            Self::Timeout => "Move to an open area or enter the coordinates manually.",
        }
    }
}

impl From<GeolocationError> for tourmap_core::Error {
    fn from(err: GeolocationError) -> Self {
        let code = match err {
            GeolocationError::PermissionDenied => ErrorCode::GeolocationDenied,
            GeolocationError::PositionUnavailable => ErrorCode::GeolocationUnavailable,
            GeolocationError::Timeout => ErrorCode::GeolocationTimeout,
        };
        tourmap_core::Error::new(code, err.user_message())
            .with_suggestion(err.suggestion())
            .with_source(err)
    }
}

/// One reading, successful or not
pub type LocationUpdate = Result<ReferencePoint, GeolocationError>;

/// Options passed to every reading
#[derive(Debug, Clone, PartialEq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    /// Upper bound for one reading
    pub timeout: Duration,
    /// Oldest acceptable cached fix; zero demands a fresh reading
    pub maximum_age: Duration,
    /// Pause between readings
    pub poll_interval: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self::from(&GeolocationConfig::default())
    }
}

impl From<&GeolocationConfig> for PositionOptions {
    fn from(config: &GeolocationConfig) -> Self {
        Self {
            high_accuracy: config.high_accuracy,
            timeout: Duration::from_millis(config.timeout_ms),
            maximum_age: Duration::from_millis(config.maximum_age_ms),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        }
    }
}

/// Something that can produce position readings.
///
/// Implementations may block; they are always called off the async runtime.
pub trait PositionSource: Send + 'static {
    /// Next reading, or `None` when the source has nothing more to say.
    fn next_position(&mut self, options: &PositionOptions) -> Option<LocationUpdate>;
}

/// Always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub ReferencePoint);

impl PositionSource for FixedPosition {
    fn next_position(&mut self, _options: &PositionOptions) -> Option<LocationUpdate> {
        Some(Ok(self.0))
    }
}

/// Plays back a recorded sequence of readings, then ends
#[derive(Debug, Clone, Default)]
pub struct ReplayPositions {
    readings: VecDeque<LocationUpdate>,
}

impl ReplayPositions {
    pub fn new(readings: impl IntoIterator<Item = LocationUpdate>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
        }
    }

    /// Load a recording from disk. See [`FromStr`] for the format.
    pub fn from_file(path: &Path) -> tourmap_core::Result<Self> {
        std::fs::read_to_string(path)?.parse()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl PositionSource for ReplayPositions {
    fn next_position(&mut self, _options: &PositionOptions) -> Option<LocationUpdate> {
        self.readings.pop_front()
    }
}

/// One reading per line: `latitude, longitude[, accuracy]`, or one of
/// `denied`, `unavailable`, `timeout`. Blank lines and `#` comments are
/// skipped.
impl FromStr for ReplayPositions {
    type Err = tourmap_core::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut readings = VecDeque::new();

        for (index, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let reading = match line.to_lowercase().as_str() {
                "denied" => Err(GeolocationError::PermissionDenied),
                "unavailable" => Err(GeolocationError::PositionUnavailable),
                "timeout" => Err(GeolocationError::Timeout),
                _ => Ok(parse_reading(line).map_err(|e| e.with_context(format!("line {}", index + 1)))?),
            };
            readings.push_back(reading);
        }

        Ok(Self { readings })
    }
}

fn parse_reading(line: &str) -> tourmap_core::Result<ReferencePoint> {
    let numbers = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .map_err(|_| tourmap_core::Error::invalid_coordinate(format!("'{part}' is not a number")))
        })
        .collect::<tourmap_core::Result<Vec<f64>>>()?;

    let (latitude, longitude, accuracy) = match numbers.as_slice() {
        [lat, lon] => (*lat, *lon, 0.0),
        [lat, lon, acc] => (*lat, *lon, *acc),
        _ => {
            return Err(tourmap_core::Error::invalid_coordinate(
                "expected 'latitude, longitude[, accuracy]'",
            ))
        }
    };

    tourmap_geo::Coordinate::new(latitude, longitude).validate()?;
    Ok(ReferencePoint::new(latitude, longitude, accuracy))
}

/// Cancels the watch task on [`cancel`](Self::cancel) or drop
#[derive(Debug)]
pub struct WatchHandle {
    task: JoinHandle<()>,
}

impl WatchHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// A running location subscription
#[derive(Debug)]
pub struct LocationWatch {
    updates: mpsc::Receiver<LocationUpdate>,
    handle: WatchHandle,
}

impl LocationWatch {
    /// Start polling `source`. Must be called inside a tokio runtime.
    pub fn spawn<P: PositionSource>(source: P, options: PositionOptions) -> Self {
        let (tx, updates) = mpsc::channel(16);
        let source = Arc::new(Mutex::new(source));
        let task = tokio::spawn(watch_loop(source, options, tx));

        Self {
            updates,
            handle: WatchHandle { task },
        }
    }

    /// Next update; `None` once the source is exhausted or the watch cancelled.
    pub async fn recv(&mut self) -> Option<LocationUpdate> {
        self.updates.recv().await
    }

    /// Stop the subscription. Already queued updates are discarded.
    pub fn cancel(&mut self) {
        self.handle.cancel();
        self.updates.close();
        while self.updates.try_recv().is_ok() {}
    }

    pub fn handle(&self) -> &WatchHandle {
        &self.handle
    }
}

async fn watch_loop<P: PositionSource>(
    source: Arc<Mutex<P>>,
    options: PositionOptions,
    tx: mpsc::Sender<LocationUpdate>,
) {
    let mut first = true;
    // A blocking reading cannot be interrupted. One that outlives its timeout
    // holds the source lock, so it is awaited again on the next poll instead
    // of queueing a second reading behind it. Its fix is delivered when it
    // lands.
    let mut pending: Option<JoinHandle<Option<LocationUpdate>>> = None;

    loop {
        if !first {
            tokio::time::sleep(options.poll_interval).await;
        }
        first = false;

        let mut reading = match pending.take() {
            Some(reading) => reading,
            None => {
                let source = Arc::clone(&source);
                let options = options.clone();
                tokio::task::spawn_blocking(move || match source.lock() {
                    Ok(mut source) => source.next_position(&options),
                    Err(_) => Some(Err(GeolocationError::PositionUnavailable)),
                })
            }
        };

        let update = match tokio::time::timeout(options.timeout, &mut reading).await {
            Err(_) => {
                pending = Some(reading);
                Err(GeolocationError::Timeout)
            }
            Ok(Err(join_error)) => {
                tracing::warn!(error = %join_error, "position reading panicked");
                Err(GeolocationError::PositionUnavailable)
            }
            Ok(Ok(None)) => break,
            Ok(Ok(Some(update))) => update,
        };

        if tx.send(update).await.is_err() {
            break;
        }
    }

    tracing::debug!("location watch finished");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast() -> PositionOptions {
        PositionOptions {
            poll_interval: Duration::from_millis(1),
            ..PositionOptions::default()
        }
    }

    #[test]
    fn test_error_codes_round_trip() {
        for err in [
            GeolocationError::PermissionDenied,
            GeolocationError::PositionUnavailable,
            GeolocationError::Timeout,
        ] {
            assert_eq!(GeolocationError::from_code(err.code()), Some(err));
            assert!(!err.suggestion().is_empty());
        }
        assert_eq!(GeolocationError::from_code(9), None);
    }

    #[test]
    fn test_into_core_error() {
        let err: tourmap_core::Error = GeolocationError::Timeout.into();
        assert_eq!(err.code, ErrorCode::GeolocationTimeout);
        assert!(err.suggestion.is_some());
    }

    #[test]
    fn test_default_options_demand_fresh_fix() {
        let options = PositionOptions::default();
        assert!(options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.maximum_age, Duration::ZERO);
    }

    #[test]
    fn test_parse_replay() {
        let replay: ReplayPositions = "# morning walk\n10.3157, 123.8854, 12\n\n10.32 123.89\ndenied\nTIMEOUT\n"
            .parse()
            .unwrap();
        assert_eq!(replay.len(), 4);

        let mut replay = replay;
        let options = PositionOptions::default();
        let first = replay.next_position(&options).unwrap().unwrap();
        assert_eq!(first.accuracy, 12.0);
        let second = replay.next_position(&options).unwrap().unwrap();
        assert_eq!(second.accuracy, 0.0);
        assert_eq!(replay.next_position(&options), Some(Err(GeolocationError::PermissionDenied)));
        assert_eq!(replay.next_position(&options), Some(Err(GeolocationError::Timeout)));
        assert_eq!(replay.next_position(&options), None);
    }

    #[test]
    fn test_parse_replay_rejects_bad_lines() {
        let err = "10.0, east".parse::<ReplayPositions>().unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidCoordinate);
        assert_eq!(err.context.as_deref(), Some("line 1"));

        assert!("95.0, 10.0".parse::<ReplayPositions>().is_err());
        assert!("10.0".parse::<ReplayPositions>().is_err());
    }

    #[test]
    fn test_replay_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("track.txt");
        std::fs::write(&path, "14.5995,120.9842\nunavailable\n").unwrap();

        let replay = ReplayPositions::from_file(&path).unwrap();
        assert_eq!(replay.len(), 2);
    }

    #[tokio::test]
    async fn test_watch_delivers_replay_then_closes() {
        let point = ReferencePoint::new(10.0, 123.0, 5.0);
        let replay = ReplayPositions::new([Ok(point), Err(GeolocationError::PositionUnavailable)]);

        let mut watch = LocationWatch::spawn(replay, fast());
        assert_eq!(watch.recv().await, Some(Ok(point)));
        assert_eq!(watch.recv().await, Some(Err(GeolocationError::PositionUnavailable)));
        assert_eq!(watch.recv().await, None);
    }

    #[tokio::test]
    async fn test_watch_cancel_stops_updates() {
        let mut watch = LocationWatch::spawn(FixedPosition(ReferencePoint::new(1.0, 2.0, 0.0)), fast());
        assert!(watch.recv().await.is_some());

        watch.cancel();
        assert_eq!(watch.recv().await, None);
    }

    struct Stalled;

    impl PositionSource for Stalled {
        fn next_position(&mut self, _options: &PositionOptions) -> Option<LocationUpdate> {
            std::thread::sleep(Duration::from_millis(200));
            None
        }
    }

    /// First reading is slow but succeeds; the source ends afterwards.
    struct LateFix {
        calls: Arc<std::sync::atomic::AtomicUsize>,
    }

    impl PositionSource for LateFix {
        fn next_position(&mut self, _options: &PositionOptions) -> Option<LocationUpdate> {
            let call = self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if call == 0 {
                std::thread::sleep(Duration::from_millis(120));
                Some(Ok(ReferencePoint::new(10.3157, 123.8854, 5.0)))
            } else {
                None
            }
        }
    }

    #[tokio::test]
    async fn test_late_reading_is_awaited_not_requeued() {
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let options = PositionOptions {
            timeout: Duration::from_millis(30),
            ..fast()
        };
        let mut watch = LocationWatch::spawn(LateFix { calls: Arc::clone(&calls) }, options);

        let mut timeouts = 0;
        let fix = loop {
            match watch.recv().await {
                Some(Err(GeolocationError::Timeout)) => timeouts += 1,
                Some(Ok(point)) => break point,
                other => panic!("unexpected update: {other:?}"),
            }
        };

        assert!(timeouts >= 1);
        assert_eq!(fix.latitude, 10.3157);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);

        assert_eq!(watch.recv().await, None);
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_slow_reading_times_out() {
        let options = PositionOptions {
            timeout: Duration::from_millis(20),
            ..fast()
        };
        let mut watch = LocationWatch::spawn(Stalled, options);
        assert_eq!(watch.recv().await, Some(Err(GeolocationError::Timeout)));
        watch.cancel();
    }
}
