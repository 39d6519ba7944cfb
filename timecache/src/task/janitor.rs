use crate::error::BuildError;
use crate::shared::CacheShared;

use std::hash::{BuildHasher, Hash};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};
use tracing::{debug, warn};

const JANITOR_THREAD_NAME: &str = "fibre-timecache-janitor";

/// Cancellation signal the janitor thread waits on between sweeps.
#[derive(Debug, Default)]
struct StopSignal {
  stopped: Mutex<bool>,
  condvar: Condvar,
}

impl StopSignal {
  fn stop(&self) {
    *self.stopped.lock() = true;
    self.condvar.notify_all();
  }

  /// Blocks for up to `timeout`. Returns `true` once a stop was requested.
  fn wait(&self, timeout: Duration) -> bool {
    let mut stopped = self.stopped.lock();
    match Instant::now().checked_add(timeout) {
      Some(deadline) => {
        while !*stopped {
          if self.condvar.wait_until(&mut stopped, deadline).timed_out() {
            break;
          }
        }
      }
      None => {
        while !*stopped {
          self.condvar.wait(&mut stopped);
        }
      }
    }
    *stopped
  }
}

/// Handle to the background thread that periodically sweeps expired entries.
///
/// The thread only holds a `Weak` reference to the cache, so it never keeps a
/// dropped cache alive.
#[derive(Debug)]
pub(crate) struct Janitor {
  handle: Option<JoinHandle<()>>,
  signal: Arc<StopSignal>,
}

impl Janitor {
  /// Spawns a new janitor thread sweeping every `period`.
  pub(crate) fn spawn<K, V, H>(
    shared: Weak<CacheShared<K, V, H>>,
    period: Duration,
  ) -> Result<Self, BuildError>
  where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Send + Sync + 'static,
    H: BuildHasher + Send + Sync + 'static,
  {
    let signal = Arc::new(StopSignal::default());
    let thread_signal = signal.clone();

    let handle = thread::Builder::new()
      .name(JANITOR_THREAD_NAME.to_string())
      .spawn(move || Self::run(shared, period, &thread_signal))
      .map_err(BuildError::JanitorSpawn)?;

    Ok(Self {
      handle: Some(handle),
      signal,
    })
  }

  fn run<K, V, H>(shared: Weak<CacheShared<K, V, H>>, period: Duration, signal: &StopSignal)
  where
    K: Eq + Hash + Clone,
    H: BuildHasher,
  {
    debug!(?period, "janitor started");

    while !signal.wait(period) {
      // The cache is gone; nobody is left to sweep for.
      let Some(shared) = shared.upgrade() else {
        break;
      };

      let started = Instant::now();
      shared.sweep_expired();
      let elapsed = started.elapsed();
      if elapsed > period {
        warn!(?elapsed, ?period, "sweep took longer than the janitor period");
      }
    }

    debug!("janitor stopped");
  }

  /// Stops the thread and waits for it to finish its current sweep.
  pub(crate) fn stop(mut self) {
    self.signal.stop();

    let Some(handle) = self.handle.take() else {
      return;
    };
    if handle.thread().id() == thread::current().id() {
      return;
    }
    if handle.join().is_err() {
      warn!("janitor thread panicked");
    }
  }
}

// Dropping the cache drops the janitor. Only signal here: the last owner of
// the cache may be the janitor thread itself, which cannot join itself.
impl Drop for Janitor {
  fn drop(&mut self) {
    self.signal.stop();
  }
}
