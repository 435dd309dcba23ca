//! Entry types — a single recorded trick.
//!
//! An entry points at one subject and one category by id. Reads are served
//! as the denormalised [`EntryView`], which carries the reference names
//! instead of their ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── EntryView ───────────────────────────────────────────────────────────────

/// An entry joined with its subject and category names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryView {
  pub id:         i64,
  pub subject:    String,
  pub category:   String,
  pub item:       String,
  pub remark:     String,
  /// Store-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
}

// ─── NewEntry ────────────────────────────────────────────────────────────────

/// Input to [`crate::store::TricksStore::add_entry`] and
/// [`crate::store::TricksStore::update_entry`].
///
/// Subject and category are given by name; the store resolves them to ids,
/// creating the reference rows on first use. `created_at` is always set by the
/// store and is not accepted from callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEntry {
  pub subject:  String,
  pub category: String,
  pub item:     String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub remark:   Option<String>,
}

impl NewEntry {
  /// Convenience constructor with no remark.
  pub fn new(
    subject: impl Into<String>,
    category: impl Into<String>,
    item: impl Into<String>,
  ) -> Self {
    Self {
      subject:  subject.into(),
      category: category.into(),
      item:     item.into(),
      remark:   None,
    }
  }

  pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
    self.remark = Some(remark.into());
    self
  }

  /// The remark as stored: an absent remark is the empty string.
  pub fn remark(&self) -> &str { self.remark.as_deref().unwrap_or_default() }
}

impl From<&EntryView> for NewEntry {
  fn from(view: &EntryView) -> Self {
    Self {
      subject:  view.subject.clone(),
      category: view.category.clone(),
      item:     view.item.clone(),
      remark:   Some(view.remark.clone()),
    }
  }
}

// ─── UpdateOutcome ───────────────────────────────────────────────────────────

/// Result of [`crate::store::TricksStore::update_entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOutcome {
  /// No entry has the requested id. Nothing was written.
  NotFound,
  /// The entry existed and at least one field changed.
  Updated,
  /// The entry existed and already held exactly these values.
  Unchanged,
}

impl UpdateOutcome {
  /// Whether the target row existed; the boolean the boundary reports.
  pub fn applied(&self) -> bool { !matches!(self, Self::NotFound) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_remark_reads_as_empty() {
    let e = NewEntry::new("JavaScript", "Arrays", "flatMap");
    assert_eq!(e.remark(), "");
    assert_eq!(e.with_remark("r").remark(), "r");
  }

  #[test]
  fn remark_is_optional_in_json() {
    let e: NewEntry = serde_json::from_str(
      r#"{"subject":"Rust","category":"Iterators","item":"use zip"}"#,
    )
    .unwrap();
    assert_eq!(e.remark, None);
  }

  #[test]
  fn only_not_found_collapses_to_false() {
    assert!(!UpdateOutcome::NotFound.applied());
    assert!(UpdateOutcome::Updated.applied());
    assert!(UpdateOutcome::Unchanged.applied());
  }
}
