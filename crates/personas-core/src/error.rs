//! Error types for `personas-core`.
//!
//! Validation misses are not errors; they surface as
//! [`Outcome::Skipped`](crate::Outcome::Skipped). Only collaborator faults
//! reach this type, boxed so the manager stays independent of the backend.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("portrait store error: {0}")]
  PortraitStore(#[source] BoxError),

  #[error("label catalog error: {0}")]
  LabelCatalog(#[source] BoxError),
}

impl Error {
  pub(crate) fn portrait_store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::PortraitStore(Box::new(e))
  }

  pub(crate) fn label_catalog<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::LabelCatalog(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
