use thiserror::Error;

/// Errors returned by cache lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheError {
  /// The key was never stored, has been deleted, or its entry has expired.
  #[error("entry does not exist or has expired")]
  NotExists,
}

/// Errors that can occur when building a cache.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The operating system refused to start the background janitor thread.
  #[error("failed to spawn the janitor thread: {0}")]
  JanitorSpawn(#[source] std::io::Error),
}
