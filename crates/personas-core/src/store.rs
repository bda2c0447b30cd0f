//! Collaborator traits consumed by the personas manager.
//!
//! Implemented by storage backends (e.g. `personas-store-sqlite`). The
//! manager depends on these abstractions, never on a concrete backend.
//!
//! Every select filters on `is_deleted = NotDeleted`; every insert writes
//! `NotDeleted`.

use std::future::Future;

use crate::{
  label::Label,
  portrait::{NewPortrait, Portrait, PortraitUpdate},
};

// ─── Portraits ───────────────────────────────────────────────────────────────

/// Persistence for [`Portrait`] records.
///
/// All methods return `Send` futures so implementations can be driven from a
/// multi-threaded runtime.
pub trait PortraitStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All non-deleted portraits for `personnel_id`, in a stable order.
  /// Callers use the first element and ignore the rest.
  fn select_by_person(
    &self,
    personnel_id: String,
  ) -> impl Future<Output = Result<Vec<Portrait>, Self::Error>> + Send + '_;

  /// Persist a new portrait and return it with its assigned `id`.
  fn insert(
    &self,
    portrait: NewPortrait,
  ) -> impl Future<Output = Result<Portrait, Self::Error>> + Send + '_;

  /// Replace `personas_ext` and `update_time` of the portrait with
  /// `update.id`. Other columns are untouched.
  fn update(
    &self,
    update: PortraitUpdate,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}

// ─── Label catalog ───────────────────────────────────────────────────────────

/// Read access to the label catalog.
pub trait LabelCatalog: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All non-deleted catalog rows whose business key is `label_id`.
  fn select_by_label_id(
    &self,
    label_id: i64,
  ) -> impl Future<Output = Result<Vec<Label>, Self::Error>> + Send + '_;
}
