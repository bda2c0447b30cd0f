//! Label catalog entries.

use serde::{Deserialize, Serialize};

use crate::portrait::DeleteFlag;

/// A catalog row mapping a numeric business key to its canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
  pub id:         i64,
  /// Business key referenced by id-based personas requests.
  pub label_id:   i64,
  pub label_name: String,
  pub is_deleted: DeleteFlag,
}

/// Input for adding a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLabel {
  pub label_id:   i64,
  pub label_name: String,
}
