//! Handlers for entry endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/tricks` | Every entry joined with subject/category names |
//! | `GET`    | `/entries/:id` | Single entry; 404 if not found |
//! | `POST`   | `/entries` | Body: [`EntryBody`]; returns 201 + stored entry |
//! | `PUT`    | `/entries/:id` | Body: [`EntryBody`]; returns `true`/`false` |
//! | `DELETE` | `/entries/:id` | Returns `true`/`false` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use tricks_core::{
  entry::{EntryView, NewEntry},
  store::TricksStore,
  validate::validate,
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /tricks`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<EntryView>>, ApiError>
where
  S: TricksStore,
{
  let entries = store.list_entries().await.map_err(ApiError::store)?;
  Ok(Json(entries))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /entries/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<EntryView>, ApiError>
where
  S: TricksStore,
{
  let Path(id) = id?;
  let entry = store
    .get_entry(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("entry {id} not found")))?;
  Ok(Json(entry))
}

// ─── Body ─────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /entries` and `PUT /entries/:id`.
///
/// Missing string fields deserialise as empty so the validator, not the JSON
/// layer, names the field that is absent.
#[derive(Debug, Deserialize)]
pub struct EntryBody {
  #[serde(default)]
  pub subject:  String,
  #[serde(default)]
  pub category: String,
  #[serde(default)]
  pub item:     String,
  pub remark:   Option<String>,
}

impl From<EntryBody> for NewEntry {
  fn from(b: EntryBody) -> Self {
    NewEntry {
      subject:  b.subject,
      category: b.category,
      item:     b.item,
      remark:   b.remark,
    }
  }
}

/// Unwrap the body and run the validator before the store sees it.
fn checked(
  body: Result<Json<EntryBody>, JsonRejection>,
) -> Result<NewEntry, ApiError> {
  let Json(body) = body?;
  let input = NewEntry::from(body);
  validate(&input)?;
  Ok(input)
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /entries` — returns 201 + the stored [`EntryView`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<EntryBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: TricksStore,
{
  let input = checked(body)?;
  let entry = store.add_entry(input).await.map_err(ApiError::store)?;
  tracing::info!(id = entry.id, "entry added");
  Ok((StatusCode::CREATED, Json(entry)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /entries/:id` — `true` if the entry exists (changed or not), `false`
/// if there is no such entry.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
  body: Result<Json<EntryBody>, JsonRejection>,
) -> Result<Json<bool>, ApiError>
where
  S: TricksStore,
{
  let Path(id) = id?;
  let input = checked(body)?;
  let outcome = store
    .update_entry(id, input)
    .await
    .map_err(ApiError::store)?;
  tracing::info!(id, ?outcome, "entry update");
  Ok(Json(outcome.applied()))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /entries/:id` — `true` if a row was removed.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Json<bool>, ApiError>
where
  S: TricksStore,
{
  let Path(id) = id?;
  let removed = store.delete_entry(id).await.map_err(ApiError::store)?;
  tracing::info!(id, removed, "entry delete");
  Ok(Json(removed))
}
