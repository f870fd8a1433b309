// Time-bounded, single-flight resource cache.
//
// Keys are spread over a fixed number of shards, each guarded by its own
// mutex, so different keys never wait for each other. A shard only maps keys
// to slots; the slot carries its own state and condition variable. The
// builder runs with no shard lock held, and callers that arrive while a build
// is in flight wait on the slot instead of building again.

use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use hashbrown::{DefaultHashBuilder, HashMap};
use log::debug;
use parking_lot::{Condvar, Mutex};

/// Lifetime of a cache entry, counted from the moment it was written.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

const SHARD_COUNT: usize = 16;

/// Time source for entry expiry.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<Instant>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Instant::now()),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// Key identifying a resource built from files.
///
/// Two keys are equal iff their path lists (in order), encodings and
/// processor identities are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub paths: Vec<PathBuf>,
    pub encoding: String,
    pub processor: &'static str,
}

impl CacheKey {
    pub fn new<I, P>(paths: I, encoding: impl Into<String>, processor: &'static str) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            encoding: encoding.into(),
            processor,
        }
    }
}

enum SlotState<V, E> {
    Building,
    Ready { value: V, created_at: Instant },
    Failed(E),
    /// The builder unwound without producing a result.
    Abandoned,
}

struct Slot<V, E> {
    state: Mutex<SlotState<V, E>>,
    done: Condvar,
}

impl<V, E> Slot<V, E> {
    fn building() -> Self {
        Self {
            state: Mutex::new(SlotState::Building),
            done: Condvar::new(),
        }
    }
}

enum Lookup<V, E> {
    Hit(V),
    Wait(Arc<Slot<V, E>>),
    Build(Arc<Slot<V, E>>),
}

type Shard<K, V, E> = Mutex<HashMap<K, Arc<Slot<V, E>>>>;

/// Cache of expensive, shareable values.
///
/// [`ResourceCache::get_or_build`] returns a live entry without calling the
/// builder. Otherwise exactly one caller per key runs the builder while the
/// others wait for its outcome; all of them see the same value or the same
/// error. Errors are handed out but never stored, so the next call retries.
pub struct ResourceCache<K, V, E> {
    name: &'static str,
    shards: Box<[Shard<K, V, E>]>,
    hasher: DefaultHashBuilder,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    builds: AtomicUsize,
}

impl<K, V, E> ResourceCache<K, V, E>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
    E: Clone,
{
    /// Create a cache with the default lifetime and the system clock.
    /// `name` only shows up in log output.
    pub fn new(name: &'static str) -> Self {
        Self::with_clock(name, DEFAULT_TTL, Arc::new(SystemClock))
    }

    pub fn with_clock(name: &'static str, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let shards = (0..SHARD_COUNT)
            .map(|_| Mutex::new(HashMap::new()))
            .collect();
        Self {
            name,
            shards,
            hasher: DefaultHashBuilder::default(),
            ttl,
            clock,
            builds: AtomicUsize::new(0),
        }
    }

    /// Number of times a builder has been started.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    /// Number of keys currently holding a slot, expired ones included.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the live value for `key`, building it with `build` if there is
    /// none.
    pub fn get_or_build<F>(&self, key: &K, build: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let slot = loop {
            match self.lookup(key) {
                Lookup::Hit(value) => {
                    debug!("{}: cache hit for {key:?}", self.name);
                    return Ok(value);
                }
                Lookup::Wait(slot) => {
                    debug!("{}: waiting for pending build of {key:?}", self.name);
                    if let Some(result) = wait(&slot) {
                        return result;
                    }
                }
                Lookup::Build(slot) => break slot,
            }
        };

        debug!("{}: cache miss for {key:?}, building", self.name);
        self.builds.fetch_add(1, Ordering::Relaxed);
        let mut pending = PendingBuild {
            cache: self,
            key,
            slot: &slot,
            finished: false,
        };
        let result = build();
        pending.finish(&result);
        result
    }

    fn shard(&self, key: &K) -> &Shard<K, V, E> {
        let hash = self.hasher.hash_one(key) as usize;
        &self.shards[hash % SHARD_COUNT]
    }

    fn is_expired(&self, created_at: Instant, now: Instant) -> bool {
        now.saturating_duration_since(created_at) >= self.ttl
    }

    fn lookup(&self, key: &K) -> Lookup<V, E> {
        let mut map = self.shard(key).lock();
        let now = self.clock.now();

        if let Some(slot) = map.get(key) {
            let state = slot.state.lock();
            match &*state {
                SlotState::Ready { value, created_at } if !self.is_expired(*created_at, now) => {
                    return Lookup::Hit(value.clone());
                }
                SlotState::Building => return Lookup::Wait(Arc::clone(slot)),
                _ => {}
            }
        } else {
            self.purge_expired(&mut map, now);
        }

        let slot = Arc::new(Slot::building());
        map.insert(key.clone(), Arc::clone(&slot));
        Lookup::Build(slot)
    }

    fn purge_expired(&self, map: &mut HashMap<K, Arc<Slot<V, E>>>, now: Instant) {
        map.retain(|_, slot| match &*slot.state.lock() {
            SlotState::Ready { created_at, .. } => !self.is_expired(*created_at, now),
            _ => true,
        });
    }

    /// Drop `key` from the map if it still points at `slot`.
    fn remove_slot(&self, key: &K, slot: &Arc<Slot<V, E>>) {
        let mut map = self.shard(key).lock();
        if map.get(key).is_some_and(|current| Arc::ptr_eq(current, slot)) {
            map.remove(key);
        }
    }
}

/// Block until `slot` leaves the building state. `None` means the builder
/// gave up and the caller should look the key up again.
fn wait<V: Clone, E: Clone>(slot: &Slot<V, E>) -> Option<Result<V, E>> {
    let mut state = slot.state.lock();
    loop {
        match &*state {
            SlotState::Building => slot.done.wait(&mut state),
            SlotState::Ready { value, .. } => return Some(Ok(value.clone())),
            SlotState::Failed(err) => return Some(Err(err.clone())),
            SlotState::Abandoned => return None,
        }
    }
}

/// Publishes the outcome of a build; marks the slot abandoned if the builder
/// panics so waiters do not block forever.
struct PendingBuild<'a, K, V, E>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
    E: Clone,
{
    cache: &'a ResourceCache<K, V, E>,
    key: &'a K,
    slot: &'a Arc<Slot<V, E>>,
    finished: bool,
}

impl<K, V, E> PendingBuild<'_, K, V, E>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
    E: Clone,
{
    fn finish(&mut self, result: &Result<V, E>) {
        let failed = result.is_err();
        {
            let mut state = self.slot.state.lock();
            *state = match result {
                Ok(value) => SlotState::Ready {
                    value: value.clone(),
                    created_at: self.cache.clock.now(),
                },
                Err(err) => SlotState::Failed(err.clone()),
            };
        }
        if failed {
            debug!(
                "{}: build of {:?} failed, not caching",
                self.cache.name, self.key
            );
            self.cache.remove_slot(self.key, self.slot);
        }
        self.slot.done.notify_all();
        self.finished = true;
    }
}

impl<K, V, E> Drop for PendingBuild<'_, K, V, E>
where
    K: Hash + Eq + Clone + Debug,
    V: Clone,
    E: Clone,
{
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        *self.slot.state.lock() = SlotState::Abandoned;
        self.cache.remove_slot(self.key, self.slot);
        self.slot.done.notify_all();
    }
}
