//! Keyed result cache with TTL expiry and request coalescing
//!
//! Each key maps to a slot that is either a pending fetch shared by every
//! concurrent caller or a ready value with an optional expiry. Fetches are
//! spawned onto the runtime, so a fetch that has started always runs to
//! completion even when every caller has gone away.
//!
//! | Slot | Lookup result |
//! |------|---------------|
//! | Missing / expired | Start a new fetch |
//! | Pending | Join the in-flight fetch |
//! | Ready | Return a clone of the value |

use futures_util::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::warn;

type SharedFetch<V> = Shared<BoxFuture<'static, Option<(V, Instant)>>>;

enum Slot<V> {
    Pending {
        generation: u64,
        fetch: SharedFetch<V>,
    },
    Ready {
        value: V,
        expires_at: Option<Instant>,
    },
}

enum Lookup<V> {
    Hit(V),
    Join(u64, SharedFetch<V>),
    Miss,
}

struct State<K, V> {
    slots: HashMap<K, Slot<V>>,
    next_generation: u64,
}

/// Keyed cache of fetched values
pub struct TtlCache<K, V> {
    ttl: Option<Duration>,
    state: Mutex<State<K, V>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Default + Send + Sync + 'static,
{
    /// Create a cache whose values expire `ttl` after their fetch completed
    pub fn new(ttl: Duration) -> Self {
        Self::with_ttl(Some(ttl))
    }

    /// Create a cache whose values never expire
    pub fn unbounded() -> Self {
        Self::with_ttl(None)
    }

    fn with_ttl(ttl: Option<Duration>) -> Self {
        Self {
            ttl,
            state: Mutex::new(State {
                slots: HashMap::new(),
                next_generation: 0,
            }),
        }
    }

    /// The configured time-to-live (`None` = forever)
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    /// Return the cached value for `key`, or run `fetch` to produce it.
    ///
    /// Concurrent callers for the same key share a single fetch. A pending
    /// fetch whose result is already older than the TTL when joined is
    /// replaced by a new one. If the fetch task panics, the default value
    /// is returned and nothing is cached.
    pub async fn get_or_fetch<F, Fut>(&self, key: K, fetch: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V> + Send + 'static,
    {
        let mut fetch = Some(fetch);
        let mut stale = None;

        loop {
            let (generation, shared, started) = {
                let mut state = self.lock();
                let lookup = match state.slots.get(&key) {
                    Some(Slot::Ready { value, expires_at }) if !is_expired(*expires_at) => {
                        Lookup::Hit(value.clone())
                    }
                    Some(Slot::Pending { generation, fetch }) if stale != Some(*generation) => {
                        Lookup::Join(*generation, fetch.clone())
                    }
                    _ => Lookup::Miss,
                };

                match lookup {
                    Lookup::Hit(value) => return value,
                    Lookup::Join(generation, shared) => (generation, shared, false),
                    Lookup::Miss => {
                        let Some(fetch) = fetch.take() else {
                            return V::default();
                        };
                        let generation = state.next_generation;
                        state.next_generation += 1;

                        let shared = spawn_fetch(fetch());
                        state.slots.insert(
                            key.clone(),
                            Slot::Pending {
                                generation,
                                fetch: shared.clone(),
                            },
                        );
                        (generation, shared, true)
                    }
                }
            };

            let outcome = shared.await;

            // A joined fetch may have finished long before anyone awaited it.
            if !started && matches!(&outcome, Some((_, done)) if self.is_stale(*done)) {
                stale = Some(generation);
                continue;
            }

            return self.settle(key, generation, outcome);
        }
    }

    fn settle(&self, key: K, generation: u64, outcome: Option<(V, Instant)>) -> V {
        let mut state = self.lock();
        let still_current = matches!(
            state.slots.get(&key),
            Some(Slot::Pending { generation: g, .. }) if *g == generation
        );

        match outcome {
            Some((value, completed_at)) => {
                if still_current {
                    let expires_at = self.ttl.map(|ttl| completed_at + ttl);
                    state.slots.insert(
                        key,
                        Slot::Ready {
                            value: value.clone(),
                            expires_at,
                        },
                    );
                }
                value
            }
            None => {
                if still_current {
                    state.slots.remove(&key);
                }
                V::default()
            }
        }
    }

    /// Drop the entry for `key`; a pending fetch keeps running but its
    /// result is not stored
    pub fn invalidate(&self, key: &K) {
        self.lock().slots.remove(key);
    }

    /// Drop every entry
    pub fn clear(&self) {
        self.lock().slots.clear();
    }

    /// Number of keys with a pending or ready slot
    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    /// Whether the cache holds no slots
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_stale(&self, completed_at: Instant) -> bool {
        is_expired(self.ttl.map(|ttl| completed_at + ttl))
    }

    fn lock(&self) -> MutexGuard<'_, State<K, V>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn is_expired(expires_at: Option<Instant>) -> bool {
    expires_at.is_some_and(|at| Instant::now() >= at)
}

fn spawn_fetch<V, Fut>(fetch: Fut) -> SharedFetch<V>
where
    V: Clone + Send + Sync + 'static,
    Fut: Future<Output = V> + Send + 'static,
{
    let task = tokio::spawn(async move {
        let value = fetch.await;
        (value, Instant::now())
    });

    async move {
        match task.await {
            Ok(done) => Some(done),
            Err(e) => {
                warn!("Cached fetch did not complete: {}", e);
                None
            }
        }
    }
    .boxed()
    .shared()
}
