//! Get-or-create resolution of subject and category names to row ids.
//!
//! Runs on the caller's connection (normally inside its transaction), so a
//! resolution and the entry write that depends on it commit or roll back
//! together.

use rusqlite::{Connection, OptionalExtension as _};
use tricks_core::reference::{NamePolicy, ReferenceKind};

/// Return the id of the `kind` row named `name`, inserting it if absent.
///
/// Each call performs exactly one of a lookup hit or an insert. For the
/// case-sensitive policies the insert and the existence check are a single
/// statement (`ON CONFLICT DO NOTHING RETURNING`); the follow-up select only
/// runs when the conflict path was taken.
pub fn resolve(
  conn: &Connection,
  kind: ReferenceKind,
  name: &str,
  policy: NamePolicy,
) -> rusqlite::Result<i64> {
  let table = kind.table();
  let name = policy.normalize(name);

  if policy.folds_case()
    && let Some(id) = find_folded(conn, table, name)?
  {
    return Ok(id);
  }

  let inserted: Option<i64> = conn
    .query_row(
      &format!(
        "INSERT INTO {table} (name) VALUES (?1)
         ON CONFLICT(name) DO NOTHING
         RETURNING id"
      ),
      rusqlite::params![name],
      |r| r.get(0),
    )
    .optional()?;

  match inserted {
    Some(id) => {
      tracing::debug!(table, name, id, "created reference row");
      Ok(id)
    }
    None => conn.query_row(
      &format!("SELECT id FROM {table} WHERE name = ?1"),
      rusqlite::params![name],
      |r| r.get(0),
    ),
  }
}

/// Oldest row whose name equals `name` under Unicode lowercase folding.
///
/// SQLite's `NOCASE` only folds ASCII, so the comparison is done here over
/// every row in `table`. Reference tables stay small.
fn find_folded(
  conn: &Connection,
  table: &str,
  name: &str,
) -> rusqlite::Result<Option<i64>> {
  let wanted = name.to_lowercase();
  let mut stmt = conn.prepare(&format!("SELECT id, name FROM {table} ORDER BY id"))?;
  let mut rows = stmt.query([])?;
  while let Some(row) = rows.next()? {
    let candidate: String = row.get(1)?;
    if candidate.to_lowercase() == wanted {
      return Ok(Some(row.get(0)?));
    }
  }
  Ok(None)
}
