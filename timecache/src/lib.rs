//! A concurrent, generic in-process cache where every entry carries its own
//! absolute expiration time.
//!
//! # Features
//! - **Per-Entry TTL**: Each `store` picks its own lifetime; `store_default`
//!   uses the cache-wide default.
//! - **Lazy Expiry**: Expired entries are invisible to reads immediately and
//!   are physically removed later by a sweep.
//! - **Cooperative Sweeps**: A sweep can hand its write lock to waiting
//!   readers every `yield_every` entries, so huge tables do not stall traffic.
//! - **Cancellable Janitor**: The optional background sweeper stops promptly
//!   on `stop_janitor()` or when the cache is dropped.
//! - **Observability**: Exposes counters for lookups, writes and sweeps.
//!
//! ```
//! use fibre_timecache::{CacheBuilder, CacheError};
//! use std::time::Duration;
//!
//! let cache = CacheBuilder::<&str, u32>::new()
//!   .store_duration(Duration::from_secs(60))
//!   .build()
//!   .unwrap();
//!
//! cache.store_default("answer", 42);
//! assert_eq!(cache.get("answer"), Ok(42));
//!
//! cache.update("answer", Duration::from_secs(60), |v| v + 1).unwrap();
//! assert_eq!(cache.get("answer"), Ok(43));
//!
//! cache.delete("answer");
//! assert_eq!(cache.get("answer"), Err(CacheError::NotExists));
//! ```

// Public modules that form the API
pub mod builder;
pub mod config;
pub mod error;
pub mod handles;
pub mod metrics;

// Internal, crate-only modules
mod entry;
mod shared;
mod store;
mod task;
mod time;

// Re-export the primary user-facing types for convenience
pub use builder::CacheBuilder;
pub use config::{Config, JanitorConfig, DEFAULT_STORE_DURATION, DEFAULT_SWEEP_PERIOD};
pub use error::{BuildError, CacheError};
pub use handles::Cache;
pub use metrics::MetricsSnapshot;
