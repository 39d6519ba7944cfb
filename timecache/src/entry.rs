use crate::time;

use std::time::Duration;

/// A stored value together with its absolute expiration time.
#[derive(Debug)]
pub(crate) struct TimedEntry<V> {
  pub(crate) value: V,
  /// Deadline measured from the cache epoch.
  expires_at: Duration,
}

impl<V> TimedEntry<V> {
  /// Creates an entry that expires `duration` after `now`.
  pub(crate) fn new(value: V, now: Duration, duration: Duration) -> Self {
    Self {
      value,
      expires_at: time::deadline_from(now, duration),
    }
  }

  /// An entry is live only while its deadline is strictly in the future.
  #[inline]
  pub(crate) fn is_expired(&self, now: Duration) -> bool {
    self.expires_at <= now
  }

  /// Time left before expiry, `None` once expired.
  #[inline]
  pub(crate) fn remaining(&self, now: Duration) -> Option<Duration> {
    self.expires_at.checked_sub(now).filter(|d| !d.is_zero())
  }

  /// Replaces the value and pushes the deadline out from `now`.
  pub(crate) fn renew(&mut self, value: V, now: Duration, duration: Duration) {
    self.value = value;
    self.expires_at = time::deadline_from(now, duration);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn expires_exactly_at_deadline() {
    let now = Duration::from_millis(100);
    let entry = TimedEntry::new("v", now, Duration::from_millis(10));

    assert!(!entry.is_expired(now));
    assert!(!entry.is_expired(Duration::from_millis(109)));
    assert!(entry.is_expired(Duration::from_millis(110)));
    assert!(entry.is_expired(Duration::from_millis(111)));
  }

  #[test]
  fn zero_duration_is_already_expired() {
    let now = Duration::from_millis(100);
    let entry = TimedEntry::new(1, now, Duration::ZERO);
    assert!(entry.is_expired(now));
    assert_eq!(entry.remaining(now), None);
  }

  #[test]
  fn renew_moves_deadline_from_renewal_time() {
    let mut entry = TimedEntry::new(1, Duration::from_secs(0), Duration::from_secs(1));
    entry.renew(2, Duration::from_secs(5), Duration::from_secs(1));

    assert_eq!(entry.value, 2);
    assert!(!entry.is_expired(Duration::from_millis(5_500)));
    assert_eq!(entry.remaining(Duration::from_millis(5_500)), Some(Duration::from_millis(500)));
  }
}
