//! Plain configuration values for building a [`Cache`](crate::Cache).
//!
//! With the `serde` feature these types can be embedded in an application's
//! own configuration file. Missing fields fall back to their defaults.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifetime given to entries stored without an explicit duration.
pub const DEFAULT_STORE_DURATION: Duration = Duration::from_secs(10 * 60);

/// Delay between janitor sweeps for caches built with [`Cache::new`](crate::Cache::new).
pub const DEFAULT_SWEEP_PERIOD: Duration = Duration::from_secs(60);

/// Settings for the background janitor and the sweep it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JanitorConfig {
  /// Delay between sweeps. Zero disables the background janitor; expired
  /// entries are then only removed by calling `sweep_expired`.
  pub sweep_period: Duration,
  /// Number of entries a sweep inspects before briefly releasing its write
  /// lock. Zero holds the lock for the whole scan.
  pub yield_every: usize,
}

impl JanitorConfig {
  /// A janitor sweeping every `sweep_period` without yielding.
  pub fn every(sweep_period: Duration) -> Self {
    Self {
      sweep_period,
      yield_every: 0,
    }
  }

  /// Sets how many entries are inspected between yield points.
  pub fn yield_every(mut self, entries: usize) -> Self {
    self.yield_every = entries;
    self
  }

  #[inline]
  pub(crate) fn is_enabled(&self) -> bool {
    !self.sweep_period.is_zero()
  }
}

/// Full cache configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
  /// Lifetime used by `store_default`. Zero means [`DEFAULT_STORE_DURATION`].
  pub store_duration: Duration,
  pub janitor: JanitorConfig,
}

impl Config {
  /// The store duration after applying the zero-means-default rule.
  pub fn effective_store_duration(&self) -> Duration {
    if self.store_duration.is_zero() {
      DEFAULT_STORE_DURATION
    } else {
      self.store_duration
    }
  }
}
