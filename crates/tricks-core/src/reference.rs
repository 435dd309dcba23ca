//! Reference data — subjects and categories.
//!
//! Both tables share one shape: an integer id and a unique name. Rows are
//! created lazily the first time an entry names them and are never renamed or
//! deleted.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The topic a trick belongs to, e.g. "JavaScript".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
  pub id:   i64,
  pub name: String,
}

/// A grouping within or across subjects, e.g. "Arrays".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
  pub id:   i64,
  pub name: String,
}

/// Which reference table a name resolves against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
  Subject,
  Category,
}

impl ReferenceKind {
  /// The backing table name. Only ever one of two fixed literals, so it is
  /// safe to splice into SQL.
  pub fn table(self) -> &'static str {
    match self {
      Self::Subject => "subjects",
      Self::Category => "categories",
    }
  }
}

// ─── Name policy ─────────────────────────────────────────────────────────────

/// How subject and category names are compared when resolving a reference.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NamePolicy {
  /// Names match only when byte-for-byte identical and are stored as given.
  #[default]
  Exact,
  /// Surrounding whitespace is stripped before matching and storing.
  Trim,
  /// Trimmed, then matched case-insensitively (Unicode lowercase, not just
  /// ASCII). The first stored spelling wins.
  CaseInsensitive,
}

impl NamePolicy {
  /// The form of `name` that is looked up and, if absent, inserted.
  pub fn normalize<'a>(&self, name: &'a str) -> &'a str {
    match self {
      Self::Exact => name,
      Self::Trim | Self::CaseInsensitive => name.trim(),
    }
  }

  pub fn folds_case(&self) -> bool { matches!(self, Self::CaseInsensitive) }
}
