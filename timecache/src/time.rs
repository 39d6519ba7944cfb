use once_cell::sync::Lazy;
use std::time::{Duration, Instant};

// The single, static reference point for all expiration times in the cache.
// It is initialized lazily on its first use.
static CACHE_EPOCH: Lazy<Instant> = Lazy::new(Instant::now);

/// The current time as a `Duration` since the cache epoch.
#[inline]
pub(crate) fn now() -> Duration {
  Instant::now().saturating_duration_since(*CACHE_EPOCH)
}

/// The absolute deadline `duration` after `now`, saturating instead of
/// overflowing for absurdly large durations.
#[inline]
pub(crate) fn deadline_from(now: Duration, duration: Duration) -> Duration {
  now.checked_add(duration).unwrap_or(Duration::MAX)
}
