//! Conversions between SQLite rows and `personas-core` types.
//!
//! The soft-delete flag is stored as the integer `0` or `1`. Everything else
//! is stored as plain text or integers, exactly as the domain types hold it.

use personas_core::{
  label::Label,
  portrait::{DeleteFlag, Portrait},
};

use crate::{Error, Result};

// ─── DeleteFlag ──────────────────────────────────────────────────────────────

pub fn encode_flag(flag: DeleteFlag) -> i64 {
  match flag {
    DeleteFlag::NotDeleted => 0,
    DeleteFlag::Deleted => 1,
  }
}

pub fn decode_flag(raw: i64) -> Result<DeleteFlag> {
  match raw {
    0 => Ok(DeleteFlag::NotDeleted),
    1 => Ok(DeleteFlag::Deleted),
    other => Err(Error::InvalidFlag(other)),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

pub const PORTRAIT_COLUMNS: &str =
  "id, personnel_id, personas_ext, create_time, update_time, is_deleted";

/// Raw values read directly from a `personas_portrait` row.
pub struct RawPortrait {
  pub id:           i64,
  pub personnel_id: String,
  pub personas_ext: String,
  pub create_time:  String,
  pub update_time:  Option<String>,
  pub is_deleted:   i64,
}

impl RawPortrait {
  /// Read a row selected with [`PORTRAIT_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      personnel_id: row.get(1)?,
      personas_ext: row.get(2)?,
      create_time:  row.get(3)?,
      update_time:  row.get(4)?,
      is_deleted:   row.get(5)?,
    })
  }

  pub fn into_portrait(self) -> Result<Portrait> {
    Ok(Portrait {
      id:           self.id,
      personnel_id: self.personnel_id,
      personas_ext: self.personas_ext,
      create_time:  self.create_time,
      update_time:  self.update_time,
      is_deleted:   decode_flag(self.is_deleted)?,
    })
  }
}

pub const LABEL_COLUMNS: &str = "id, label_id, label_name, is_deleted";

/// Raw values read directly from a `personas_label` row.
pub struct RawLabel {
  pub id:         i64,
  pub label_id:   i64,
  pub label_name: String,
  pub is_deleted: i64,
}

impl RawLabel {
  /// Read a row selected with [`LABEL_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      label_id:   row.get(1)?,
      label_name: row.get(2)?,
      is_deleted: row.get(3)?,
    })
  }

  pub fn into_label(self) -> Result<Label> {
    Ok(Label {
      id:         self.id,
      label_id:   self.label_id,
      label_name: self.label_name,
      is_deleted: decode_flag(self.is_deleted)?,
    })
  }
}
