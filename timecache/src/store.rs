use crate::entry::TimedEntry;

use core::fmt;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::mem;
use std::time::Duration;

use generational_arena::{Arena, Index};

#[derive(Debug)]
struct Slot<K, V> {
  key: K,
  entry: TimedEntry<V>,
}

/// How far a bounded sweep got before it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SweepProgress {
  /// Slot position to resume from, `None` once the whole arena was scanned.
  pub(crate) resume_at: Option<usize>,
  pub(crate) inspected: usize,
  pub(crate) skipped: usize,
  pub(crate) removed: usize,
}

/// Vacant arena slots a bounded sweep may skip for every entry it is allowed
/// to inspect. The arena never shrinks, so a table that once held many more
/// entries still needs regular yields while walking its empty slots.
const VACANT_SLOTS_PER_ENTRY: usize = 64;

/// The key to entry mapping behind the cache lock.
///
/// Entries live in an arena and the hash map only resolves a key to its arena
/// slot. Slots never move when other entries are removed, so a sweep can drop
/// the lock, come back, and resume scanning at a plain slot position.
pub(crate) struct EntryTable<K, V, H> {
  slots: Arena<Slot<K, V>>,
  lookup: HashMap<K, Index, H>,
}

impl<K, V, H> fmt::Debug for EntryTable<K, V, H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("EntryTable")
      .field("len", &self.lookup.len())
      .field("slots", &self.slots.capacity())
      .finish()
  }
}

impl<K, V, H> EntryTable<K, V, H>
where
  K: Eq + Hash + Clone,
  H: BuildHasher,
{
  pub(crate) fn with_hasher(hasher: H) -> Self {
    Self {
      slots: Arena::new(),
      lookup: HashMap::with_hasher(hasher),
    }
  }

  /// Number of stored entries, expired or not.
  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.lookup.len()
  }

  pub(crate) fn get<Q>(&self, key: &Q) -> Option<&TimedEntry<V>>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let index = *self.lookup.get(key)?;
    self.slots.get(index).map(|slot| &slot.entry)
  }

  pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut TimedEntry<V>>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let index = *self.lookup.get(key)?;
    self.slots.get_mut(index).map(|slot| &mut slot.entry)
  }

  /// Inserts or overwrites in place, returning the previous entry.
  pub(crate) fn insert(&mut self, key: K, entry: TimedEntry<V>) -> Option<TimedEntry<V>> {
    if let Some(&index) = self.lookup.get(&key) {
      if let Some(slot) = self.slots.get_mut(index) {
        return Some(mem::replace(&mut slot.entry, entry));
      }
    }

    let index = self.slots.insert(Slot {
      key: key.clone(),
      entry,
    });
    self.lookup.insert(key, index);
    None
  }

  pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<TimedEntry<V>>
  where
    K: Borrow<Q>,
    Q: Hash + Eq + ?Sized,
  {
    let index = self.lookup.remove(key)?;
    self.slots.remove(index).map(|slot| slot.entry)
  }

  /// Drops every entry and returns how many there were.
  pub(crate) fn clear(&mut self) -> usize {
    let removed = self.lookup.len();
    self.lookup.clear();
    self.slots.clear();
    removed
  }

  /// Scans slots starting at `start`, removing entries expired as of `now`.
  ///
  /// With a nonzero `budget` the scan stops before an occupied slot once
  /// `budget` entries have been inspected, or before a vacant slot once
  /// `budget * VACANT_SLOTS_PER_ENTRY` vacant slots have been skipped, and
  /// reports where to resume. Trailing vacant slots within that cap never
  /// cause a stop.
  pub(crate) fn sweep_from(&mut self, start: usize, budget: usize, now: Duration) -> SweepProgress {
    let end = self.slots.capacity();
    let vacant_budget = budget.saturating_mul(VACANT_SLOTS_PER_ENTRY);
    let mut position = start;
    let mut inspected = 0;
    let mut skipped = 0;
    let mut removed = 0;

    while position < end {
      let expired = match self.slots.get_unknown_gen(position) {
        Some((slot, index)) => {
          if budget > 0 && inspected == budget {
            break;
          }
          inspected += 1;
          slot.entry.is_expired(now).then_some(index)
        }
        None => {
          if budget > 0 && skipped == vacant_budget {
            break;
          }
          skipped += 1;
          None
        }
      };

      if let Some(index) = expired {
        if let Some(slot) = self.slots.remove(index) {
          self.lookup.remove(&slot.key);
          removed += 1;
        }
      }

      position += 1;
    }

    SweepProgress {
      resume_at: (position < end).then_some(position),
      inspected,
      skipped,
      removed,
    }
  }
}
