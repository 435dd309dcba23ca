//! JSON REST API for TricksVault.
//!
//! Exposes an axum [`Router`] backed by any [`tricks_core::store::TricksStore`].
//! Each route is one request/response boundary operation; TLS and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tricks_api::api_router(store.clone()))
//! ```

pub mod entries;
pub mod error;
pub mod references;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use tricks_core::store::TricksStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: TricksStore + 'static,
{
  Router::new()
    // Reference data
    .route("/subjects", get(references::subjects::<S>))
    .route("/categories", get(references::categories::<S>))
    // Entries
    .route("/tricks", get(entries::list::<S>))
    .route("/entries", post(entries::create::<S>))
    .route(
      "/entries/{id}",
      get(entries::get_one::<S>)
        .put(entries::update::<S>)
        .delete(entries::delete::<S>),
    )
    .with_state(store)
}
