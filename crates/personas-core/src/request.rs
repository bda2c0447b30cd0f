//! The personas request value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A tag change request. Each manager operation reads the subset of fields
/// it needs and skips the request when one of them is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonasRequest {
  pub personnel_id: Option<String>,
  pub label_id:     Option<i64>,
  /// Label name for name-based adds; substring key for fuzzy removal.
  pub label_name:   Option<String>,
}

impl PersonasRequest {
  /// Request addressing a catalog label by id.
  pub fn by_label_id(personnel_id: impl Into<String>, label_id: i64) -> Self {
    Self {
      personnel_id: Some(personnel_id.into()),
      label_id:     Some(label_id),
      label_name:   None,
    }
  }

  /// Request carrying a free-form label name (or fuzzy key).
  pub fn by_label_name(
    personnel_id: impl Into<String>,
    label_name: impl Into<String>,
  ) -> Self {
    Self {
      personnel_id: Some(personnel_id.into()),
      label_id:     None,
      label_name:   Some(label_name.into()),
    }
  }
}

/// Absent fields print as `null`; log dashboards match on this layout.
impl fmt::Display for PersonasRequest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Personas(personnelId=")?;
    match &self.personnel_id {
      Some(id) => write!(f, "{id}")?,
      None => write!(f, "null")?,
    }
    write!(f, ", labelId=")?;
    match self.label_id {
      Some(id) => write!(f, "{id}")?,
      None => write!(f, "null")?,
    }
    write!(f, ", labelName=")?;
    match &self.label_name {
      Some(name) => write!(f, "{name}")?,
      None => write!(f, "null")?,
    }
    write!(f, ")")
  }
}
