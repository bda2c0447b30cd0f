//! The `personasExt` column format: labels joined with a single comma.
//!
//! There is no escaping. A label that itself contains a comma comes back as
//! several fragments on the next read.
//!
//! Decoding keeps the split rules existing rows were written under:
//! - an empty string decodes to one empty label, `[""]`;
//! - empty fields between separators are kept;
//! - trailing empty fields are dropped, so `"a,b,"` decodes to `["a", "b"]`.

use std::borrow::Borrow;

pub const SEPARATOR: &str = ",";

/// Split a stored `personasExt` value into its label list.
pub fn decode(ext: &str) -> Vec<String> {
  if ext.is_empty() {
    return vec![String::new()];
  }

  let mut labels: Vec<String> = ext.split(SEPARATOR).map(str::to_owned).collect();
  while labels.last().is_some_and(String::is_empty) {
    labels.pop();
  }
  labels
}

/// Join a label list into its stored `personasExt` form.
pub fn encode<S: Borrow<str>>(labels: &[S]) -> String { labels.join(SEPARATOR) }
