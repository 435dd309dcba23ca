//! Handlers for the reference-data endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/subjects`   | `[{"id":1,"name":"Rust"}]`, insertion order |
//! | `GET`  | `/categories` | same shape |

use std::sync::Arc;

use axum::{Json, extract::State};
use tricks_core::{
  reference::{Category, Subject},
  store::TricksStore,
};

use crate::error::ApiError;

/// `GET /subjects`
pub async fn subjects<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Subject>>, ApiError>
where
  S: TricksStore,
{
  let subjects = store.list_subjects().await.map_err(ApiError::store)?;
  Ok(Json(subjects))
}

/// `GET /categories`
pub async fn categories<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Category>>, ApiError>
where
  S: TricksStore,
{
  let categories = store.list_categories().await.map_err(ApiError::store)?;
  Ok(Json(categories))
}
