#![allow(dead_code)]

use std::time::Duration;

use fibre_timecache::{Cache, CacheBuilder};

/// Long enough that nothing stored with it expires during a test.
pub const LONG_TTL: Duration = Duration::from_secs(600);
pub const SHORT_TTL: Duration = Duration::from_millis(10);
pub const SLEEP_PAST_SHORT: Duration = Duration::from_millis(15);

/// A cache without a janitor, so expired entries stay until swept manually.
pub fn build_manual_cache() -> Cache<i32, i32> {
  CacheBuilder::new().store_duration(LONG_TTL).build().unwrap()
}

/// Same as `build_manual_cache`, with mid-sweep yielding enabled.
pub fn build_yielding_cache(yield_every: usize) -> Cache<i32, i32> {
  CacheBuilder::new()
    .store_duration(LONG_TTL)
    .yield_every(yield_every)
    .build()
    .unwrap()
}

/// Stores `0..amount` with the default duration, and `short` keys with `SHORT_TTL`.
pub fn populate(cache: &Cache<i32, i32>, amount: i32, short: &[i32]) {
  for i in 0..amount {
    if short.contains(&i) {
      cache.store(i, i, SHORT_TTL);
    } else {
      cache.store_default(i, i);
    }
  }
}
