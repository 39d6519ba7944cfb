use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crossbeam_utils::CachePadded;

/// A thread-safe, internal metrics collector for the cache.
/// All fields are atomic to allow for lock-free updates.
#[derive(Debug)]
pub(crate) struct Metrics {
  // --- Hit/Miss Ratios ---
  pub(crate) hits: CachePadded<AtomicU64>,
  pub(crate) misses: CachePadded<AtomicU64>,

  // --- Throughput ---
  pub(crate) stores: CachePadded<AtomicU64>,
  pub(crate) updates: CachePadded<AtomicU64>,
  pub(crate) deletes: CachePadded<AtomicU64>,

  // --- Expiration ---
  pub(crate) expired_removed: CachePadded<AtomicU64>,
  pub(crate) sweeps: CachePadded<AtomicU64>,
  pub(crate) sweep_yields: CachePadded<AtomicU64>,

  created_at: Instant,
}

impl Default for Metrics {
  fn default() -> Self {
    Self {
      hits: CachePadded::new(AtomicU64::new(0)),
      misses: CachePadded::new(AtomicU64::new(0)),
      stores: CachePadded::new(AtomicU64::new(0)),
      updates: CachePadded::new(AtomicU64::new(0)),
      deletes: CachePadded::new(AtomicU64::new(0)),
      expired_removed: CachePadded::new(AtomicU64::new(0)),
      sweeps: CachePadded::new(AtomicU64::new(0)),
      sweep_yields: CachePadded::new(AtomicU64::new(0)),
      created_at: Instant::now(),
    }
  }
}

impl Metrics {
  pub(crate) fn new() -> Self {
    Self::default()
  }

  #[inline]
  pub(crate) fn record(counter: &CachePadded<AtomicU64>, amount: u64) {
    counter.fetch_add(amount, Ordering::Relaxed);
  }

  /// Creates a point-in-time snapshot of the current metrics.
  pub(crate) fn snapshot(&self) -> MetricsSnapshot {
    let hits = self.hits.load(Ordering::Relaxed);
    let misses = self.misses.load(Ordering::Relaxed);
    let total_lookups = hits + misses;

    MetricsSnapshot {
      hits,
      misses,
      hit_ratio: if total_lookups == 0 {
        0.0
      } else {
        hits as f64 / total_lookups as f64
      },
      stores: self.stores.load(Ordering::Relaxed),
      updates: self.updates.load(Ordering::Relaxed),
      deletes: self.deletes.load(Ordering::Relaxed),
      expired_removed: self.expired_removed.load(Ordering::Relaxed),
      sweeps: self.sweeps.load(Ordering::Relaxed),
      sweep_yields: self.sweep_yields.load(Ordering::Relaxed),
      uptime_secs: self.created_at.elapsed().as_secs(),
    }
  }
}

/// A point-in-time, public-facing snapshot of the cache's metrics.
#[derive(Clone)]
pub struct MetricsSnapshot {
  /// Lookups that found a live entry.
  pub hits: u64,
  /// Lookups that found nothing or an expired entry.
  pub misses: u64,
  /// The cache hit ratio (hits / (hits + misses)).
  pub hit_ratio: f64,
  /// Calls to `store` and `store_default`.
  pub stores: u64,
  /// Successful `update` calls.
  pub updates: u64,
  /// Calls to `delete` that removed an entry.
  pub deletes: u64,
  /// Entries physically removed by sweeps.
  pub expired_removed: u64,
  /// Completed sweep passes, manual or janitor-driven.
  pub sweeps: u64,
  /// Times a sweep released and reacquired the write lock mid-scan.
  pub sweep_yields: u64,
  /// The number of seconds the cache has been running.
  pub uptime_secs: u64,
}

impl fmt::Debug for MetricsSnapshot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("MetricsSnapshot")
      .field("hits", &self.hits)
      .field("misses", &self.misses)
      .field("hit_ratio", &format!("{:.2}%", self.hit_ratio * 100.0))
      .field("stores", &self.stores)
      .field("updates", &self.updates)
      .field("deletes", &self.deletes)
      .field("expired_removed", &self.expired_removed)
      .field("sweeps", &self.sweeps)
      .field("sweep_yields", &self.sweep_yields)
      .field("uptime_secs", &self.uptime_secs)
      .finish()
  }
}
