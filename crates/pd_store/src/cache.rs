//! Time-based record cache.
//!
//! One entry, one lifetime: a fetched record list stays valid for
//! [`CACHE_LIFETIME`] after it was stored, then the next lookup misses and
//! the caller refetches. The clock is a seam so expiry is testable without
//! sleeping.

use pd_core::Record;
use std::time::{Duration, Instant};
use tracing::debug;

/// How long a fetched record list stays fresh.
pub const CACHE_LIFETIME: Duration = Duration::from_secs(3600);

/// Monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The real clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Single-entry cache of the fetched record list.
#[derive(Debug)]
pub struct DataCache<C: Clock = SystemClock> {
    clock: C,
    lifetime: Duration,
    entry: Option<(Instant, Vec<Record>)>,
}

impl DataCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for DataCache<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> DataCache<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock, lifetime: CACHE_LIFETIME, entry: None }
    }

    /// Override the default lifetime (0 disables caching entirely).
    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// The cached records, if still fresh.
    pub fn get(&self) -> Option<&[Record]> {
        let (stored_at, records) = self.entry.as_ref()?;
        if self.clock.now().duration_since(*stored_at) < self.lifetime {
            Some(records.as_slice())
        } else {
            None
        }
    }

    /// Whether an entry exists and is still inside its lifetime.
    pub fn is_valid(&self) -> bool {
        self.get().is_some()
    }

    /// Store a freshly fetched record list, restarting the lifetime.
    pub fn put(&mut self, records: Vec<Record>) {
        debug!(count = records.len(), "cached record list");
        self.entry = Some((self.clock.now(), records));
    }

    /// Drop the entry; the next lookup misses regardless of age.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Clock that only moves when the test advances it.
    #[derive(Clone)]
    struct ManualClock {
        origin: Instant,
        elapsed: Rc<Cell<Duration>>,
    }

    impl ManualClock {
        fn new() -> (Self, Rc<Cell<Duration>>) {
            let elapsed = Rc::new(Cell::new(Duration::ZERO));
            let clock = Self { origin: Instant::now(), elapsed: Rc::clone(&elapsed) };
            (clock, elapsed)
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.origin + self.elapsed.get()
        }
    }

    fn records() -> Vec<Record> {
        vec![Record::new(2020, "Brucella", 3, 9)]
    }

    #[test]
    fn empty_cache_misses() {
        let (clock, _) = ManualClock::new();
        let cache = DataCache::with_clock(clock);
        assert!(cache.get().is_none());
    }

    #[test]
    fn fresh_entry_hits_until_the_lifetime_elapses() {
        let (clock, elapsed) = ManualClock::new();
        let mut cache = DataCache::with_clock(clock);
        cache.put(records());

        elapsed.set(CACHE_LIFETIME - Duration::from_secs(1));
        assert!(cache.is_valid());
        assert_eq!(cache.get(), Some(records().as_slice()));

        elapsed.set(CACHE_LIFETIME);
        assert!(!cache.is_valid());
        assert!(cache.get().is_none());
    }

    #[test]
    fn put_restarts_the_lifetime() {
        let (clock, elapsed) = ManualClock::new();
        let mut cache = DataCache::with_clock(clock);
        cache.put(records());

        elapsed.set(CACHE_LIFETIME * 2);
        assert!(cache.get().is_none());

        cache.put(records());
        elapsed.set(CACHE_LIFETIME * 2 + Duration::from_secs(1));
        assert!(cache.get().is_some());
    }

    #[test]
    fn invalidate_forces_a_miss() {
        let (clock, _) = ManualClock::new();
        let mut cache = DataCache::with_clock(clock);
        cache.put(records());
        assert!(cache.get().is_some());
        cache.invalidate();
        assert!(cache.get().is_none());
    }

    #[test]
    fn zero_lifetime_disables_caching() {
        let (clock, _) = ManualClock::new();
        let mut cache = DataCache::with_clock(clock).with_lifetime(Duration::ZERO);
        cache.put(records());
        assert!(cache.get().is_none());
    }
}
