use crate::config::{Config, JanitorConfig};
use crate::error::BuildError;
use crate::handles::Cache;
use crate::shared::CacheShared;
use crate::task::janitor::Janitor;

use core::fmt;
use std::hash::{BuildHasher, Hash};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

/// A builder for creating `Cache` instances.
///
/// By default no janitor is started and entries stored with
/// `store_default` live for [`DEFAULT_STORE_DURATION`](crate::config::DEFAULT_STORE_DURATION).
pub struct CacheBuilder<K, V, H = ahash::RandomState> {
  pub(crate) store_duration: Duration,
  pub(crate) janitor: JanitorConfig,
  pub(crate) hasher: H,
  _key_marker: PhantomData<K>,
  _value_marker: PhantomData<V>,
}

impl<K, V, H> fmt::Debug for CacheBuilder<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheBuilder")
      .field("store_duration", &self.store_duration)
      .field("janitor", &self.janitor)
      .finish_non_exhaustive()
  }
}

// --- General Configuration Methods ---
impl<K, V, H> CacheBuilder<K, V, H> {
  /// Sets the lifetime used by `store_default`. Zero keeps the default.
  pub fn store_duration(mut self, duration: Duration) -> Self {
    self.store_duration = duration;
    self
  }

  /// Sets the delay between background sweeps. Zero disables the janitor.
  pub fn sweep_period(mut self, period: Duration) -> Self {
    self.janitor.sweep_period = period;
    self
  }

  /// Sets how many entries a sweep inspects before briefly releasing its
  /// write lock. Zero sweeps the whole table under one lock.
  pub fn yield_every(mut self, entries: usize) -> Self {
    self.janitor.yield_every = entries;
    self
  }

  /// Replaces the janitor settings.
  pub fn janitor(mut self, janitor: JanitorConfig) -> Self {
    self.janitor = janitor;
    self
  }

  /// Replaces every setting with the values from `config`.
  pub fn config(mut self, config: Config) -> Self {
    self.store_duration = config.store_duration;
    self.janitor = config.janitor;
    self
  }

  /// Sets the hasher for the cache.
  pub fn hasher(mut self, hasher: H) -> Self {
    self.hasher = hasher;
    self
  }
}

// --- Default Constructor ---
impl<K, V, H: BuildHasher + Default> CacheBuilder<K, V, H> {
  /// Creates a new `CacheBuilder` with default settings.
  pub fn new() -> Self {
    Self {
      store_duration: Duration::ZERO,
      janitor: JanitorConfig::default(),
      hasher: H::default(),
      _key_marker: PhantomData,
      _value_marker: PhantomData,
    }
  }
}

impl<K, V> Default for CacheBuilder<K, V, ahash::RandomState> {
  fn default() -> Self {
    Self::new()
  }
}

// --- Build Methods ---
impl<K, V, H> CacheBuilder<K, V, H>
where
  K: Eq + Hash + Clone + Send + Sync + 'static,
  V: Send + Sync + 'static,
  H: BuildHasher + Send + Sync + 'static,
{
  /// Builds the cache, starting the janitor thread if a sweep period is set.
  pub fn build(self) -> Result<Cache<K, V, H>, BuildError> {
    let config = Config {
      store_duration: self.store_duration,
      janitor: self.janitor,
    };
    let shared = Arc::new(CacheShared::new(config, self.hasher));

    if config.janitor.is_enabled() {
      let janitor = Janitor::spawn(Arc::downgrade(&shared), config.janitor.sweep_period)?;
      shared.install_janitor(janitor);
    }

    Ok(Cache { shared })
  }
}
