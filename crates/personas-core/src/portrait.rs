//! Portrait — the persisted label set of one person.
//!
//! A person normally has a single portrait. Soft-deleted rows and concurrent
//! first inserts can leave more than one; readers always take the first
//! non-deleted match.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec;

/// Soft-delete marker shared by portraits and catalog labels.
///
/// Serialises as its column value, `0` or `1`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(into = "u8", try_from = "u8")]
pub enum DeleteFlag {
  #[default]
  NotDeleted = 0,
  Deleted = 1,
}

#[derive(Debug, Error)]
#[error("invalid is_deleted flag: {0}")]
pub struct InvalidDeleteFlag(pub u8);

impl From<DeleteFlag> for u8 {
  fn from(flag: DeleteFlag) -> Self { flag as u8 }
}

impl TryFrom<u8> for DeleteFlag {
  type Error = InvalidDeleteFlag;

  fn try_from(raw: u8) -> Result<Self, Self::Error> {
    match raw {
      0 => Ok(Self::NotDeleted),
      1 => Ok(Self::Deleted),
      other => Err(InvalidDeleteFlag(other)),
    }
  }
}

/// A stored portrait row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portrait {
  /// Surrogate key assigned by the store on insert.
  pub id:           i64,
  pub personnel_id: String,
  /// Comma-joined label list; see [`codec`].
  pub personas_ext: String,
  pub create_time:  String,
  /// `None` until the portrait is first updated.
  pub update_time:  Option<String>,
  pub is_deleted:   DeleteFlag,
}

impl Portrait {
  /// Decode `personas_ext` into its label list.
  pub fn labels(&self) -> Vec<String> { codec::decode(&self.personas_ext) }
}

/// Input to [`PortraitStore::insert`](crate::store::PortraitStore::insert).
/// The store assigns `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortrait {
  pub personnel_id: String,
  pub personas_ext: String,
  pub create_time:  String,
  pub is_deleted:   DeleteFlag,
}

/// Input to [`PortraitStore::update`](crate::store::PortraitStore::update).
///
/// Matches by `id`; only the fields carried here are replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortraitUpdate {
  pub id:           i64,
  pub personas_ext: String,
  pub update_time:  String,
}
