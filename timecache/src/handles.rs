use crate::builder::CacheBuilder;
use crate::config::{Config, JanitorConfig, DEFAULT_SWEEP_PERIOD};
use crate::entry::TimedEntry;
use crate::error::{BuildError, CacheError};
use crate::metrics::{Metrics, MetricsSnapshot};
use crate::shared::CacheShared;
use crate::time;

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};
use std::sync::Arc;
use std::time::Duration;

/// A thread-safe cache where every entry expires at its own absolute time.
///
/// Expired entries are invisible to lookups immediately, but stay in memory
/// until a sweep removes them. Sweeps run on the background janitor when one
/// is configured, or whenever [`sweep_expired`](Cache::sweep_expired) is
/// called.
///
/// Share a cache between threads by wrapping it in an `Arc`.
#[derive(Debug)]
pub struct Cache<K, V, H = ahash::RandomState> {
  pub(crate) shared: Arc<CacheShared<K, V, H>>,
}

impl<K, V, H> Cache<K, V, H>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Send + Sync + 'static,
  H: BuildHasher + Default + Send + Sync + 'static,
{
  /// Creates a cache with the default store duration (10 minutes) and a
  /// janitor sweeping once a minute.
  pub fn new() -> Result<Self, BuildError> {
    CacheBuilder::new().sweep_period(DEFAULT_SWEEP_PERIOD).build()
  }

  /// Creates a cache from an explicit configuration. A zero sweep period
  /// means no janitor is started.
  pub fn with_config(config: Config) -> Result<Self, BuildError> {
    CacheBuilder::new().config(config).build()
  }
}

impl<K, V, H> Cache<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher,
{
  /// Inserts or replaces the entry for `key`, expiring `duration` from now.
  ///
  /// A zero `duration` stores an entry that is already expired.
  pub fn store(&self, key: K, value: V, duration: Duration) {
    let now = time::now();
    let entry = TimedEntry::new(value, now, duration);
    self.shared.table.write().insert(key, entry);
    Metrics::record(&self.shared.metrics.stores, 1);
  }

  /// Inserts or replaces the entry for `key` using the default store duration.
  pub fn store_default(&self, key: K, value: V) {
    self.store(key, value, self.shared.store_duration);
  }

  /// Returns a clone of the value for `key`.
  ///
  /// Fails with [`CacheError::NotExists`] when the key is absent or its entry
  /// has expired. Takes only the read lock and never removes anything.
  pub fn get<Q>(&self, key: &Q) -> Result<V, CacheError>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    V: Clone,
  {
    self.with_value(key, V::clone)
  }

  /// Looks up `key` and applies `f` to the value without cloning it.
  ///
  /// `f` runs while the read lock is held. It must be quick and must not call
  /// back into this cache, not even to read: a queued writer makes a nested
  /// read lock wait forever.
  pub fn with_value<Q, F, R>(&self, key: &Q, f: F) -> Result<R, CacheError>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    F: FnOnce(&V) -> R,
  {
    let now = time::now();
    let result = {
      let guard = self.shared.table.read();
      match guard.get(key) {
        Some(entry) if !entry.is_expired(now) => Ok(f(&entry.value)),
        _ => Err(CacheError::NotExists),
      }
    };

    let counter = if result.is_ok() {
      &self.shared.metrics.hits
    } else {
      &self.shared.metrics.misses
    };
    Metrics::record(counter, 1);

    result
  }

  /// Returns `true` if a live entry exists for `key`.
  pub fn contains_key<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let now = time::now();
    self
      .shared
      .table
      .read()
      .get(key)
      .is_some_and(|entry| !entry.is_expired(now))
  }

  /// Time left before the entry for `key` expires.
  pub fn expires_in<Q>(&self, key: &Q) -> Result<Duration, CacheError>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let now = time::now();
    self
      .shared
      .table
      .read()
      .get(key)
      .and_then(|entry| entry.remaining(now))
      .ok_or(CacheError::NotExists)
  }

  /// Removes the entry for `key`, expired or not. Returns whether anything was
  /// removed; deleting an absent key is not an error.
  pub fn delete<Q>(&self, key: &Q) -> bool
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let removed = self.shared.table.write().remove(key).is_some();
    if removed {
      Metrics::record(&self.shared.metrics.deletes, 1);
    }
    removed
  }

  /// Atomically replaces the value for a live `key` with `transform(&current)`
  /// and resets its expiration to `duration` from now.
  ///
  /// Fails with [`CacheError::NotExists`] and changes nothing if the key is
  /// absent or expired.
  ///
  /// `transform` runs while the write lock is held. It must not call back into
  /// this cache: the lock is not reentrant and doing so deadlocks.
  pub fn update<Q, F>(&self, key: &Q, duration: Duration, transform: F) -> Result<(), CacheError>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
    F: FnOnce(&V) -> V,
  {
    let now = time::now();
    {
      let mut guard = self.shared.table.write();
      let entry = match guard.get_mut(key) {
        Some(entry) if !entry.is_expired(now) => entry,
        _ => return Err(CacheError::NotExists),
      };
      let value = transform(&entry.value);
      entry.renew(value, now, duration);
    }

    Metrics::record(&self.shared.metrics.updates, 1);
    Ok(())
  }

  /// Number of stored entries, including expired ones not yet swept.
  pub fn count(&self) -> usize {
    self.shared.table.read().len()
  }

  /// Physically removes every entry that has expired, returning how many
  /// were removed.
  ///
  /// Works whether or not a janitor is running. With a nonzero
  /// `yield_every` the write lock is released and reacquired every
  /// `yield_every` inspected entries so other callers are not starved.
  pub fn sweep_expired(&self) -> usize {
    self.shared.sweep_expired()
  }

  /// Removes all entries.
  pub fn clear(&self) {
    self.shared.table.write().clear();
  }

  /// Returns a snapshot of the cache's counters.
  pub fn metrics(&self) -> MetricsSnapshot {
    self.shared.metrics.snapshot()
  }

  /// Lifetime applied by [`store_default`](Cache::store_default).
  pub fn default_store_duration(&self) -> Duration {
    self.shared.store_duration
  }

  /// The janitor and sweep settings this cache was built with.
  pub fn janitor_config(&self) -> JanitorConfig {
    self.shared.janitor_config
  }

  /// Returns `true` while a background janitor is attached to this cache.
  pub fn janitor_running(&self) -> bool {
    self.shared.janitor.lock().is_some()
  }

  /// Stops the background janitor and waits for its thread to exit.
  ///
  /// Returns `false` if no janitor was running. Manual sweeping keeps working
  /// afterwards.
  pub fn stop_janitor(&self) -> bool {
    let janitor = self.shared.janitor.lock().take();
    match janitor {
      Some(janitor) => {
        janitor.stop();
        true
      }
      None => false,
    }
  }
}
