//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed microsecond
//! precision and a `Z` suffix, so lexical order equals chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use tricks_core::entry::EntryView;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Columns selected for every [`EntryView`] read.
pub const ENTRY_VIEW_SELECT: &str = "
  SELECT e.id, s.name, c.name, e.item, e.remark, e.created_at
  FROM entries e
  JOIN subjects   s ON s.id = e.subject_id
  JOIN categories c ON c.id = e.category_id";

/// Raw values read directly from an `entries` row joined with its references.
pub struct RawEntry {
  pub id:         i64,
  pub subject:    String,
  pub category:   String,
  pub item:       String,
  pub remark:     String,
  pub created_at: String,
}

impl RawEntry {
  /// Map a row produced by [`ENTRY_VIEW_SELECT`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      subject:    row.get(1)?,
      category:   row.get(2)?,
      item:       row.get(3)?,
      remark:     row.get(4)?,
      created_at: row.get(5)?,
    })
  }

  pub fn into_view(self) -> Result<EntryView> {
    Ok(EntryView {
      id:         self.id,
      subject:    self.subject,
      category:   self.category,
      item:       self.item,
      remark:     self.remark,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
