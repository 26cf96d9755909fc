use crate::forecast_data::error::ForecastDataError;
use crate::forecast_data::fetcher::ForecastSource;
use crate::types::location::LatLon;
use crate::types::payload::RawPayload;
use log::{debug, info};
use ordered_float::OrderedFloat;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OnceCell};

pub const DEFAULT_CACHE_CAPACITY: usize = 128;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

type CoordinateKey = (OrderedFloat<f64>, OrderedFloat<f64>);

fn key_for(coordinate: LatLon) -> CoordinateKey {
    (OrderedFloat(coordinate.0), OrderedFloat(coordinate.1))
}

#[derive(Debug)]
struct CachedPayload {
    payload: Arc<RawPayload>,
    fetched_at: Instant,
}

type FetchOutcome = Result<CachedPayload, Arc<ForecastDataError>>;

type EntryCell = Arc<OnceCell<FetchOutcome>>;

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CoordinateKey, EntryCell>,
    // Oldest insertion first; drives eviction.
    insertion_order: VecDeque<CoordinateKey>,
}

impl CacheState {
    fn insert(&mut self, key: CoordinateKey, cell: EntryCell, capacity: usize) {
        self.entries.insert(key, cell);
        self.insertion_order.push_back(key);
        while self.entries.len() > capacity {
            let Some(oldest) = self.insertion_order.pop_front() else {
                break;
            };
            if self.entries.remove(&oldest).is_some() {
                debug!("Evicted cached forecast for {},{}", oldest.0, oldest.1);
            }
        }
    }

    fn remove(&mut self, key: &CoordinateKey) {
        self.entries.remove(key);
        self.insertion_order.retain(|k| k != key);
    }
}

/// Memoizes [`ForecastSource`] results per exact coordinate.
///
/// * At most `capacity` coordinates are kept; inserting beyond that evicts the
///   least recently inserted one.
/// * An entry older than `ttl` counts as a miss and is fetched again.
/// * Concurrent lookups of the same coordinate share a single in-flight fetch,
///   and its failure too: every waiter gets the same error.
/// * Failed fetches are not remembered past that point.
///
/// The internal lock is only held for bookkeeping, never across a fetch.
pub struct ForecastCache<S> {
    source: S,
    capacity: usize,
    ttl: Duration,
    state: Mutex<CacheState>,
}

impl<S: ForecastSource> ForecastCache<S> {
    /// A `capacity` of zero is treated as one.
    pub fn new(source: S, capacity: usize, ttl: Duration) -> Self {
        Self {
            source,
            capacity: capacity.max(1),
            ttl,
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Returns the cached payload for `coordinate`, fetching it on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastDataError::Shared`] wrapping the error of the fetch
    /// this lookup waited on.
    pub async fn get_or_fetch(
        &self,
        coordinate: LatLon,
    ) -> Result<Arc<RawPayload>, ForecastDataError> {
        let key = key_for(coordinate);
        let cell = self.cell_for(key).await;

        if let Some(Ok(cached)) = cell.get() {
            debug!("Cache hit for forecast at {}", coordinate);
            return Ok(Arc::clone(&cached.payload));
        }

        let outcome = cell
            .get_or_init(|| async move {
                info!("Cache miss for forecast at {}. Fetching.", coordinate);
                self.source
                    .fetch(coordinate)
                    .await
                    .map(|payload| CachedPayload {
                        payload: Arc::new(payload),
                        fetched_at: Instant::now(),
                    })
                    .map_err(Arc::new)
            })
            .await;

        match outcome {
            Ok(cached) => Ok(Arc::clone(&cached.payload)),
            Err(e) => {
                self.forget_failed(key, &cell).await;
                Err(ForecastDataError::Shared(Arc::clone(e)))
            }
        }
    }

    /// Looks up (or creates) the cell for `key`, replacing it when expired or failed.
    async fn cell_for(&self, key: CoordinateKey) -> EntryCell {
        let mut state = self.state.lock().await;

        if let Some(cell) = state.entries.get(&key) {
            let stale = cell.get().is_some_and(|outcome| match outcome {
                Ok(cached) => cached.fetched_at.elapsed() >= self.ttl,
                Err(_) => true,
            });
            if !stale {
                return Arc::clone(cell);
            }
            debug!("Cached forecast for {},{} is stale", key.0, key.1);
            state.remove(&key);
        }

        let cell = EntryCell::default();
        state.insert(key, Arc::clone(&cell), self.capacity);
        cell
    }

    async fn forget_failed(&self, key: CoordinateKey, cell: &EntryCell) {
        let mut state = self.state.lock().await;
        let is_same_failed_cell = state.entries.get(&key).is_some_and(|current| {
            Arc::ptr_eq(current, cell) && current.get().is_some_and(|outcome| outcome.is_err())
        });
        if is_same_failed_cell {
            state.remove(&key);
        }
    }

    /// Number of coordinates currently held, including in-flight ones.
    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn contains(&self, coordinate: LatLon) -> bool {
        self.state
            .lock()
            .await
            .entries
            .get(&key_for(coordinate))
            .is_some_and(|cell| cell.get().is_some_and(|outcome| outcome.is_ok()))
    }

    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.insertion_order.clear();
    }
}
