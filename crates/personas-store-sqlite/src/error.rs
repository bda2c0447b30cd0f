//! Error type for `personas-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A row carried an `is_deleted` value outside `{0, 1}`.
  #[error("invalid is_deleted flag: {0}")]
  InvalidFlag(i64),

  /// An update targeted a portrait id with no row.
  #[error("portrait not found: {0}")]
  PortraitNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
