//! The `TricksStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `tricks-store-sqlite`).
//! Higher layers (`tricks-api`, `tricks-server`) depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use crate::{
  entry::{EntryView, NewEntry, UpdateOutcome},
  reference::{Category, Subject},
};

/// Abstraction over a TricksVault store backend.
///
/// Writes that touch more than one table (resolving a subject or category
/// and then writing the entry) are atomic: either every statement lands or
/// none does.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait TricksStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Reference data ────────────────────────────────────────────────────

  /// All subjects in insertion order.
  fn list_subjects(
    &self,
  ) -> impl Future<Output = Result<Vec<Subject>, Self::Error>> + Send + '_;

  /// All categories in insertion order.
  fn list_categories(
    &self,
  ) -> impl Future<Output = Result<Vec<Category>, Self::Error>> + Send + '_;

  // ── Entries — reads ───────────────────────────────────────────────────

  /// Every entry joined with its subject and category names, newest first.
  fn list_entries(
    &self,
  ) -> impl Future<Output = Result<Vec<EntryView>, Self::Error>> + Send + '_;

  /// A single entry by id. Returns `None` if not found.
  fn get_entry(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<EntryView>, Self::Error>> + Send + '_;

  // ── Entries — writes ──────────────────────────────────────────────────

  /// Validate `input`, resolve (or create) its subject and category, and
  /// insert a new entry stamped with the current time.
  fn add_entry(
    &self,
    input: NewEntry,
  ) -> impl Future<Output = Result<EntryView, Self::Error>> + Send + '_;

  /// Replace the subject, category, item, and remark of entry `id`.
  ///
  /// `created_at` is preserved. A missing `id` yields
  /// [`UpdateOutcome::NotFound`] and writes nothing, not even reference rows.
  fn update_entry(
    &self,
    id: i64,
    input: NewEntry,
  ) -> impl Future<Output = Result<UpdateOutcome, Self::Error>> + Send + '_;

  /// Delete entry `id`. Returns `true` if a row was removed. Subjects and
  /// categories are left untouched.
  fn delete_entry(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
