use crate::config::{Config, JanitorConfig};
use crate::metrics::Metrics;
use crate::store::EntryTable;
use crate::task::janitor::Janitor;
use crate::time;

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock, RwLockWriteGuard};
use tracing::{debug, trace};

/// The internal, thread-safe core of the cache.
pub(crate) struct CacheShared<K, V, H> {
  pub(crate) table: RwLock<EntryTable<K, V, H>>,
  pub(crate) metrics: Metrics,
  pub(crate) store_duration: Duration,
  pub(crate) janitor_config: JanitorConfig,
  pub(crate) janitor: Mutex<Option<Janitor>>,
}

impl<K, V, H> fmt::Debug for CacheShared<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CacheShared")
      .field("store_duration", &self.store_duration)
      .field("janitor_config", &self.janitor_config)
      .field("metrics", &self.metrics.snapshot())
      .finish_non_exhaustive()
  }
}

impl<K, V, H> CacheShared<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher,
{
  pub(crate) fn new(config: Config, hasher: H) -> Self {
    Self {
      table: RwLock::new(EntryTable::with_hasher(hasher)),
      metrics: Metrics::new(),
      store_duration: config.effective_store_duration(),
      janitor_config: config.janitor,
      janitor: Mutex::new(None),
    }
  }

  /// Removes every entry that had expired when the sweep started.
  ///
  /// With `yield_every > 0` the write lock is handed to waiting threads after
  /// each batch of inspected entries (or a proportional run of vacant slots)
  /// and the scan resumes at the same slot.
  pub(crate) fn sweep_expired(&self) -> usize {
    let started = Instant::now();
    let now = time::now();
    let budget = self.janitor_config.yield_every;

    let mut guard = self.table.write();
    let mut resume_at = 0;
    let mut inspected = 0;
    let mut skipped = 0;
    let mut removed = 0;
    let mut yields = 0;

    loop {
      let progress = guard.sweep_from(resume_at, budget, now);
      inspected += progress.inspected;
      skipped += progress.skipped;
      removed += progress.removed;

      match progress.resume_at {
        Some(next) => {
          resume_at = next;
          yields += 1;
          RwLockWriteGuard::bump(&mut guard);
        }
        None => break,
      }
    }

    let remaining = guard.len();
    drop(guard);

    Metrics::record(&self.metrics.sweeps, 1);
    Metrics::record(&self.metrics.sweep_yields, yields);
    Metrics::record(&self.metrics.expired_removed, removed as u64);

    if removed > 0 {
      debug!(
        removed,
        remaining,
        inspected,
        skipped,
        yields,
        elapsed = ?started.elapsed(),
        "swept expired entries"
      );
    } else {
      trace!(inspected, skipped, yields, elapsed = ?started.elapsed(), "sweep found nothing to remove");
    }

    removed
  }

  pub(crate) fn install_janitor(&self, janitor: Janitor) {
    *self.janitor.lock() = Some(janitor);
  }
}
