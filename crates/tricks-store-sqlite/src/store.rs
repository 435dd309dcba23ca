//! [`SqliteStore`] — the SQLite implementation of [`TricksStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, TransactionBehavior};

use tricks_core::{
  entry::{EntryView, NewEntry, UpdateOutcome},
  reference::{Category, NamePolicy, ReferenceKind, Subject},
  store::TricksStore,
  validate::validate,
};

use crate::{
  Result,
  encode::{ENTRY_VIEW_SELECT, RawEntry, encode_dt},
  resolve::resolve,
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A TricksVault store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted, and every
/// clone talks to the same background thread.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
  policy:          NamePolicy,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, policy: NamePolicy::default() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, policy: NamePolicy::default() };
    store.init_schema().await?;
    Ok(store)
  }

  /// Use `policy` when resolving subject and category names.
  pub fn with_name_policy(mut self, policy: NamePolicy) -> Self {
    self.policy = policy;
    self
  }

  pub fn name_policy(&self) -> NamePolicy { self.policy }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Resolve a single subject or category name to its id, creating the row
  /// if it does not exist yet.
  pub async fn resolve(&self, kind: ReferenceKind, name: &str) -> Result<i64> {
    let name = name.to_owned();
    let policy = self.policy;

    let id = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let id = resolve(&tx, kind, &name, policy)?;
        tx.commit()?;
        Ok(id)
      })
      .await?;
    Ok(id)
  }

  async fn list_names(&self, kind: ReferenceKind) -> Result<Vec<(i64, String)>> {
    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT id, name FROM {} ORDER BY id", kind.table()))?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

/// Read back one joined entry row on the given connection.
fn fetch_view(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<RawEntry>> {
  conn
    .query_row(
      &format!("{ENTRY_VIEW_SELECT} WHERE e.id = ?1"),
      rusqlite::params![id],
      RawEntry::from_row,
    )
    .optional()
}

// ─── TricksStore impl ────────────────────────────────────────────────────────

impl TricksStore for SqliteStore {
  type Error = crate::Error;

  // ── Reference data ────────────────────────────────────────────────────────

  async fn list_subjects(&self) -> Result<Vec<Subject>> {
    let rows = self.list_names(ReferenceKind::Subject).await?;
    Ok(rows.into_iter().map(|(id, name)| Subject { id, name }).collect())
  }

  async fn list_categories(&self) -> Result<Vec<Category>> {
    let rows = self.list_names(ReferenceKind::Category).await?;
    Ok(rows.into_iter().map(|(id, name)| Category { id, name }).collect())
  }

  // ── Entries — reads ───────────────────────────────────────────────────────

  async fn list_entries(&self) -> Result<Vec<EntryView>> {
    let raws: Vec<RawEntry> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "{ENTRY_VIEW_SELECT} ORDER BY e.created_at DESC, e.id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawEntry::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawEntry::into_view).collect()
  }

  async fn get_entry(&self, id: i64) -> Result<Option<EntryView>> {
    let raw = self
      .conn
      .call(move |conn| Ok(fetch_view(conn, id)?))
      .await?;

    raw.map(RawEntry::into_view).transpose()
  }

  // ── Entries — writes ──────────────────────────────────────────────────────

  async fn add_entry(&self, input: NewEntry) -> Result<EntryView> {
    validate(&input)?;

    let policy     = self.policy;
    let created_at = encode_dt(Utc::now());
    let remark     = input.remark().to_owned();
    let NewEntry { subject, category, item, .. } = input;

    let raw: RawEntry = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let subject_id  = resolve(&tx, ReferenceKind::Subject, &subject, policy)?;
        let category_id = resolve(&tx, ReferenceKind::Category, &category, policy)?;

        tx.execute(
          "INSERT INTO entries (subject_id, category_id, item, remark, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![subject_id, category_id, item, remark, created_at],
        )?;
        let id = tx.last_insert_rowid();

        // The row was inserted in this transaction, so it is always present.
        let raw = fetch_view(&tx, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
        tx.commit()?;

        tracing::debug!(id, subject_id, category_id, "added entry");
        Ok(raw)
      })
      .await?;

    raw.into_view()
  }

  async fn update_entry(&self, id: i64, input: NewEntry) -> Result<UpdateOutcome> {
    validate(&input)?;

    let policy = self.policy;
    let remark = input.remark().to_owned();
    let NewEntry { subject, category, item, .. } = input;

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current: Option<(i64, i64, String, String)> = tx
          .query_row(
            "SELECT subject_id, category_id, item, remark FROM entries WHERE id = ?1",
            rusqlite::params![id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
          )
          .optional()?;

        // Dropping `tx` rolls back; nothing has been written yet.
        let Some(current) = current else {
          return Ok(UpdateOutcome::NotFound);
        };

        let subject_id  = resolve(&tx, ReferenceKind::Subject, &subject, policy)?;
        let category_id = resolve(&tx, ReferenceKind::Category, &category, policy)?;

        if current == (subject_id, category_id, item.clone(), remark.clone()) {
          tx.commit()?;
          return Ok(UpdateOutcome::Unchanged);
        }

        tx.execute(
          "UPDATE entries
           SET subject_id = ?1, category_id = ?2, item = ?3, remark = ?4
           WHERE id = ?5",
          rusqlite::params![subject_id, category_id, item, remark, id],
        )?;
        tx.commit()?;

        tracing::debug!(id, subject_id, category_id, "updated entry");
        Ok(UpdateOutcome::Updated)
      })
      .await?;

    Ok(outcome)
  }

  async fn delete_entry(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM entries WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    tracing::debug!(id, removed, "deleted entry");
    Ok(removed > 0)
  }
}
