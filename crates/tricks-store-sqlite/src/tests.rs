//! Integration tests for `SqliteStore` against an in-memory database.

use tricks_core::{
  entry::{NewEntry, UpdateOutcome},
  reference::{NamePolicy, ReferenceKind},
  store::TricksStore,
  validate::EntryField,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// Row counts of `(subjects, categories, entries)`.
async fn counts(s: &SqliteStore) -> (i64, i64, i64) {
  s.conn
    .call(|conn| {
      let count = |table: &str| -> rusqlite::Result<i64> {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
      };
      Ok((count("subjects")?, count("categories")?, count("entries")?))
    })
    .await
    .unwrap()
}

/// Run raw SQL against the store's connection, e.g. to install a trigger.
async fn exec(s: &SqliteStore, sql: &'static str) {
  s.conn
    .call(move |conn| Ok(conn.execute_batch(sql)?))
    .await
    .unwrap();
}

fn flat_map() -> NewEntry {
  NewEntry::new("JavaScript", "Arrays", "Use flatMap to map+flatten").with_remark("")
}

// ─── Reference resolution ────────────────────────────────────────────────────

#[tokio::test]
async fn resolve_same_name_twice_is_idempotent() {
  let s = store().await;

  let a = s.resolve(ReferenceKind::Subject, "Rust").await.unwrap();
  let b = s.resolve(ReferenceKind::Subject, "Rust").await.unwrap();
  assert_eq!(a, b);
  assert!(a > 0);

  let subjects = s.list_subjects().await.unwrap();
  assert_eq!(subjects.len(), 1);
  assert_eq!(subjects[0].name, "Rust");
}

#[tokio::test]
async fn subjects_and_categories_are_separate_namespaces() {
  let s = store().await;

  s.resolve(ReferenceKind::Subject, "Strings").await.unwrap();
  s.resolve(ReferenceKind::Category, "Strings").await.unwrap();

  assert_eq!(counts(&s).await, (1, 1, 0));
}

#[tokio::test]
async fn exact_policy_keeps_case_and_whitespace_variants() {
  let s = store().await;

  let a = s.resolve(ReferenceKind::Subject, "Rust").await.unwrap();
  let b = s.resolve(ReferenceKind::Subject, "rust").await.unwrap();
  let c = s.resolve(ReferenceKind::Subject, " Rust ").await.unwrap();
  assert_ne!(a, b);
  assert_ne!(a, c);
  assert_eq!(s.list_subjects().await.unwrap().len(), 3);
}

#[tokio::test]
async fn trim_policy_folds_surrounding_whitespace() {
  let s = store().await.with_name_policy(NamePolicy::Trim);

  let a = s.resolve(ReferenceKind::Subject, "Rust").await.unwrap();
  let b = s.resolve(ReferenceKind::Subject, "  Rust\t").await.unwrap();
  let c = s.resolve(ReferenceKind::Subject, "rust").await.unwrap();
  assert_eq!(a, b);
  assert_ne!(a, c);
}

#[tokio::test]
async fn case_insensitive_policy_keeps_first_spelling() {
  let s = store().await.with_name_policy(NamePolicy::CaseInsensitive);

  let view = s.add_entry(flat_map()).await.unwrap();
  assert_eq!(view.subject, "JavaScript");

  let second = s
    .add_entry(NewEntry::new(" javascript ", "ARRAYS", "Array.from"))
    .await
    .unwrap();
  assert_eq!(second.subject, "JavaScript");
  assert_eq!(second.category, "Arrays");

  assert_eq!(counts(&s).await, (1, 1, 2));
}

#[tokio::test]
async fn case_insensitive_policy_folds_non_ascii_letters() {
  let s = store().await.with_name_policy(NamePolicy::CaseInsensitive);

  let a = s.resolve(ReferenceKind::Subject, "Élan").await.unwrap();
  let b = s.resolve(ReferenceKind::Subject, "élan").await.unwrap();
  let c = s.resolve(ReferenceKind::Subject, " ÉLAN ").await.unwrap();
  assert_eq!(a, b);
  assert_eq!(a, c);

  let subjects = s.list_subjects().await.unwrap();
  assert_eq!(subjects.len(), 1);
  assert_eq!(subjects[0].name, "Élan");
}

// ─── add_entry ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_entry_then_list_contains_it() {
  let s = store().await;

  let created = s.add_entry(flat_map()).await.unwrap();
  assert!(created.id > 0);
  assert_eq!(created.subject, "JavaScript");
  assert_eq!(created.category, "Arrays");
  assert_eq!(created.item, "Use flatMap to map+flatten");
  assert_eq!(created.remark, "");

  let all = s.list_entries().await.unwrap();
  assert_eq!(all, vec![created]);
}

#[tokio::test]
async fn add_entry_reuses_existing_subject() {
  let s = store().await;

  s.add_entry(flat_map()).await.unwrap();
  s.add_entry(NewEntry::new("JavaScript", "Strings", "Use padStart"))
    .await
    .unwrap();

  let subjects = s.list_subjects().await.unwrap();
  assert_eq!(
    subjects.iter().filter(|x| x.name == "JavaScript").count(),
    1
  );
  let categories = s.list_categories().await.unwrap();
  let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
  assert_eq!(names, ["Arrays", "Strings"]);
  assert_eq!(s.list_entries().await.unwrap().len(), 2);
}

#[tokio::test]
async fn missing_remark_is_stored_as_empty_string() {
  let s = store().await;

  let created = s
    .add_entry(NewEntry::new("Rust", "Errors", "Prefer ? over match"))
    .await
    .unwrap();
  let fetched = s.get_entry(created.id).await.unwrap().unwrap();
  assert_eq!(fetched.remark, "");
}

#[tokio::test]
async fn invalid_entry_writes_nothing() {
  let s = store().await;

  for (input, field) in [
    (NewEntry::new("", "Arrays", "x"), EntryField::Subject),
    (NewEntry::new("New subject", " ", "x"), EntryField::Category),
    (NewEntry::new("New subject", "New category", ""), EntryField::Item),
  ] {
    let err = s.add_entry(input).await.unwrap_err();
    assert_eq!(err.as_validation().map(|v| v.field()), Some(field));
  }

  assert_eq!(counts(&s).await, (0, 0, 0));
}

#[tokio::test]
async fn list_entries_is_newest_first() {
  let s = store().await;

  let first = s.add_entry(flat_map()).await.unwrap();
  let second = s
    .add_entry(NewEntry::new("Python", "Strings", "Use f-strings"))
    .await
    .unwrap();

  let ids: Vec<_> = s.list_entries().await.unwrap().iter().map(|e| e.id).collect();
  assert_eq!(ids, vec![second.id, first.id]);
}

#[tokio::test]
async fn get_entry_missing_returns_none() {
  let s = store().await;
  assert!(s.get_entry(42).await.unwrap().is_none());
}

// ─── update_entry ────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_replaces_fields_and_keeps_created_at() {
  let s = store().await;
  let created = s.add_entry(flat_map()).await.unwrap();

  let outcome = s
    .update_entry(
      created.id,
      NewEntry::new("Python", "Arrays", "updated text").with_remark("r"),
    )
    .await
    .unwrap();
  assert_eq!(outcome, UpdateOutcome::Updated);
  assert!(outcome.applied());

  let all = s.list_entries().await.unwrap();
  assert_eq!(all.len(), 1);
  let row = &all[0];
  assert_eq!(row.id, created.id);
  assert_eq!(row.subject, "Python");
  assert_eq!(row.category, "Arrays");
  assert_eq!(row.item, "updated text");
  assert_eq!(row.remark, "r");
  assert_eq!(row.created_at, created.created_at);

  // The old subject row stays behind, unused.
  assert_eq!(counts(&s).await, (2, 1, 1));
}

#[tokio::test]
async fn update_with_same_values_is_unchanged() {
  let s = store().await;
  let created = s.add_entry(flat_map()).await.unwrap();

  let outcome = s.update_entry(created.id, flat_map()).await.unwrap();
  assert_eq!(outcome, UpdateOutcome::Unchanged);
  assert!(outcome.applied());
}

#[tokio::test]
async fn update_missing_id_changes_nothing() {
  let s = store().await;
  s.add_entry(flat_map()).await.unwrap();
  let before = counts(&s).await;

  let outcome = s
    .update_entry(9999, NewEntry::new("Go", "Channels", "close from sender"))
    .await
    .unwrap();
  assert_eq!(outcome, UpdateOutcome::NotFound);
  assert!(!outcome.applied());
  assert_eq!(counts(&s).await, before);
}

#[tokio::test]
async fn update_rejects_invalid_input() {
  let s = store().await;
  let created = s.add_entry(flat_map()).await.unwrap();

  let err = s
    .update_entry(created.id, NewEntry::new("Rust", "Errors", "   "))
    .await
    .unwrap_err();
  assert_eq!(err.to_string(), "Item is required");

  let row = s.get_entry(created.id).await.unwrap().unwrap();
  assert_eq!(row, created);
  assert_eq!(counts(&s).await, (1, 1, 1));
}

// ─── delete_entry ────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete_entry(1).await.unwrap());
}

#[tokio::test]
async fn delete_removes_only_that_entry() {
  let s = store().await;
  let keep = s.add_entry(flat_map()).await.unwrap();
  let gone = s
    .add_entry(NewEntry::new("JavaScript", "Strings", "padStart"))
    .await
    .unwrap();

  assert!(s.delete_entry(gone.id).await.unwrap());
  assert!(!s.delete_entry(gone.id).await.unwrap());

  let all = s.list_entries().await.unwrap();
  assert_eq!(all, vec![keep]);
  // Reference rows survive their last entry.
  assert_eq!(counts(&s).await, (1, 2, 1));
}

// ─── Atomicity ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_entry_insert_rolls_back_new_references() {
  let s = store().await;
  exec(
    &s,
    "CREATE TRIGGER reject_insert BEFORE INSERT ON entries
     BEGIN SELECT RAISE(ABORT, 'entry insert rejected'); END;",
  )
  .await;

  let err = s.add_entry(flat_map()).await.unwrap_err();
  assert!(err.as_validation().is_none());
  assert!(err.to_string().contains("entry insert rejected"), "{err}");

  // The subject and category resolved before the insert are gone too.
  assert_eq!(counts(&s).await, (0, 0, 0));
}

#[tokio::test]
async fn failed_entry_update_rolls_back_new_references() {
  let s = store().await;
  let created = s.add_entry(flat_map()).await.unwrap();
  exec(
    &s,
    "CREATE TRIGGER reject_update BEFORE UPDATE ON entries
     BEGIN SELECT RAISE(ABORT, 'entry update rejected'); END;",
  )
  .await;

  let err = s
    .update_entry(
      created.id,
      NewEntry::new("Brand new subject", "Brand new category", "changed"),
    )
    .await
    .unwrap_err();
  assert!(err.to_string().contains("entry update rejected"), "{err}");

  assert_eq!(counts(&s).await, (1, 1, 1));
  assert_eq!(s.get_entry(created.id).await.unwrap().unwrap(), created);
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_file_store_keeps_data() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("tricks.db");

  let created = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.add_entry(flat_map()).await.unwrap()
  };

  // Schema initialisation runs again and must not clobber anything.
  let s = SqliteStore::open(&path).await.unwrap();
  let all = s.list_entries().await.unwrap();
  assert_eq!(all, vec![created]);
  assert_eq!(s.list_subjects().await.unwrap().len(), 1);
}
