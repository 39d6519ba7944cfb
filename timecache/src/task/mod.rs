//! Background tasks for the cache. Currently only the janitor, which sweeps
//! expired entries on a fixed period.

pub(crate) mod janitor;
