//! Async HTTP client wrapping the TricksVault JSON API.

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;
use tricks_core::{
  entry::{EntryView, NewEntry},
  reference::{Category, Subject},
};

/// Connection settings for the TricksVault API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the TricksVault JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// The `{"error": "..."}` payload every failed request carries.
#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  /// Decode a successful body, or turn the server's error payload into an
  /// error carrying its message.
  async fn decode<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
      return resp.json().await.with_context(|| format!("deserialising {what}"));
    }
    match resp.json::<ErrorBody>().await {
      Ok(body) => Err(anyhow!(body.error)),
      Err(_) => Err(anyhow!("{what} → {status}")),
    }
  }

  // ── Reference data ────────────────────────────────────────────────────────

  /// `GET /api/subjects`
  pub async fn list_subjects(&self) -> Result<Vec<Subject>> {
    let resp = self
      .client
      .get(self.url("/subjects"))
      .send()
      .await
      .context("GET /subjects failed")?;
    Self::decode(resp, "subjects").await
  }

  /// `GET /api/categories`
  pub async fn list_categories(&self) -> Result<Vec<Category>> {
    let resp = self
      .client
      .get(self.url("/categories"))
      .send()
      .await
      .context("GET /categories failed")?;
    Self::decode(resp, "categories").await
  }

  // ── Entries ───────────────────────────────────────────────────────────────

  /// `GET /api/tricks`
  pub async fn list_tricks(&self) -> Result<Vec<EntryView>> {
    let resp = self
      .client
      .get(self.url("/tricks"))
      .send()
      .await
      .context("GET /tricks failed")?;
    Self::decode(resp, "tricks").await
  }

  /// `POST /api/entries`
  pub async fn add_entry(&self, entry: &NewEntry) -> Result<EntryView> {
    let resp = self
      .client
      .post(self.url("/entries"))
      .json(entry)
      .send()
      .await
      .context("POST /entries failed")?;
    Self::decode(resp, "created entry").await
  }

  /// `PUT /api/entries/<id>` — `false` if the entry no longer exists.
  pub async fn update_entry(&self, id: i64, entry: &NewEntry) -> Result<bool> {
    let resp = self
      .client
      .put(self.url(&format!("/entries/{id}")))
      .json(entry)
      .send()
      .await
      .with_context(|| format!("PUT /entries/{id} failed"))?;
    Self::decode(resp, "update result").await
  }

  /// `DELETE /api/entries/<id>` — `false` if there was nothing to delete.
  pub async fn delete_entry(&self, id: i64) -> Result<bool> {
    let resp = self
      .client
      .delete(self.url(&format!("/entries/{id}")))
      .send()
      .await
      .with_context(|| format!("DELETE /entries/{id} failed"))?;
    Self::decode(resp, "delete result").await
  }
}
