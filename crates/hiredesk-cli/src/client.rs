//! Async HTTP client for the recruiting REST API.

use std::time::Duration;

use anyhow::Context;
use hiredesk_core::{
  ApiError, Result,
  api::RecruitingApi,
  candidate::{Candidate, Form, JobOffer, StateChange, StateHistoryEntry},
  document::Document,
  draft::CandidatePayload,
  interview::Interview,
  user::CurrentUser,
};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Deserialize, de::DeserializeOwned};

/// Connection settings for the recruiting API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// Base URL including any `/api` prefix, e.g. `https://ats.example.com/api`.
  pub base_url: String,
  /// Bearer token; requests are sent unauthenticated when absent.
  pub token:    Option<String>,
  pub timeout:  Duration,
}

/// HTTP implementation of [`RecruitingApi`].
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn request(&self, method: Method, path: &str, org: Option<i64>) -> RequestBuilder {
    let mut req = self.client.request(method, self.url(path));
    if let Some(token) = &self.config.token {
      req = req.bearer_auth(token);
    }
    if let Some(org) = org {
      req = req.query(&[("organizationId", org)]);
    }
    req
  }

  /// Send `req`, turning transport failures and non-2xx statuses into
  /// [`ApiError`]s.
  async fn send(&self, req: RequestBuilder, method: &Method, path: &str) -> Result<Response> {
    tracing::debug!(%method, path, "request");
    let resp = req.send().await.map_err(|e| {
      tracing::warn!(%method, path, error = %e, "request did not complete");
      ApiError::Transport(e.to_string())
    })?;

    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let err = ApiError::from_response(status.as_u16(), &body);
    tracing::warn!(%method, path, status = status.as_u16(), error = %err, "request failed");
    Err(err)
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str, org: Option<i64>) -> Result<T> {
    let method = Method::GET;
    let resp = self
      .send(self.request(method.clone(), path, org), &method, path)
      .await?;
    resp
      .json()
      .await
      .map_err(|e| ApiError::Decode(format!("{path}: {e}")))
  }

  /// A list endpoint; a `null` body counts as empty.
  async fn get_list<T: DeserializeOwned>(&self, path: &str, org: Option<i64>) -> Result<Vec<T>> {
    let list: Option<Vec<T>> = self.get_json(path, org).await?;
    Ok(list.unwrap_or_default())
  }

  /// A write whose response body is not needed.
  async fn write<B: serde::Serialize + ?Sized>(
    &self,
    method: Method,
    path: &str,
    org: Option<i64>,
    body: Option<&B>,
  ) -> Result<()> {
    let mut req = self.request(method.clone(), path, org);
    if let Some(body) = body {
      req = req.json(body);
    }
    self.send(req, &method, path).await.map(drop)
  }
}

#[derive(Deserialize)]
struct CountBody {
  #[serde(default)]
  count: u64,
}

impl RecruitingApi for ApiClient {
  // ── Session ───────────────────────────────────────────────────────────────

  async fn current_user(&self) -> Result<CurrentUser> { self.get_json("/users/me", None).await }

  async fn logout(&self) -> Result<()> {
    self
      .write::<()>(Method::POST, "/auth/logout", None, None)
      .await
  }

  // ── Candidates ────────────────────────────────────────────────────────────

  async fn list_candidates(&self, org: Option<i64>) -> Result<Vec<Candidate>> {
    self.get_list("/candidates", org).await
  }

  async fn my_applications(&self) -> Result<Vec<Candidate>> {
    self.get_list("/candidates/me/applications", None).await
  }

  async fn create_candidate(&self, org: i64, payload: &CandidatePayload) -> Result<()> {
    self
      .write(Method::POST, "/candidates", Some(org), Some(payload))
      .await
  }

  async fn update_candidate(&self, id: i64, org: i64, payload: &CandidatePayload) -> Result<()> {
    self
      .write(Method::PATCH, &format!("/candidates/{id}"), Some(org), Some(payload))
      .await
  }

  async fn delete_candidate(&self, id: i64, org: i64) -> Result<()> {
    self
      .write::<()>(Method::DELETE, &format!("/candidates/{id}"), Some(org), None)
      .await
  }

  async fn change_state(&self, id: i64, org: Option<i64>, change: &StateChange) -> Result<()> {
    self
      .write(Method::PATCH, &format!("/candidates/{id}/state"), org, Some(change))
      .await
  }

  async fn candidate_history(&self, id: i64, org: i64) -> Result<Vec<StateHistoryEntry>> {
    self
      .get_list(&format!("/candidates/{id}/history"), Some(org))
      .await
  }

  // ── Documents ─────────────────────────────────────────────────────────────

  async fn candidate_documents(&self, id: i64, org: i64) -> Result<Vec<Document>> {
    self
      .get_list(&format!("/candidates/{id}/documents"), Some(org))
      .await
  }

  async fn list_documents(&self, org: i64) -> Result<Vec<Document>> {
    self.get_list("/documents", Some(org)).await
  }

  async fn download_document(&self, id: i64, org: i64) -> Result<Vec<u8>> {
    let method = Method::GET;
    let path = format!("/documents/{id}/download");
    let resp = self
      .send(self.request(method.clone(), &path, Some(org)), &method, &path)
      .await?;
    let bytes = resp
      .bytes()
      .await
      .map_err(|e| ApiError::Transport(e.to_string()))?;
    Ok(bytes.to_vec())
  }

  // ── Interviews ────────────────────────────────────────────────────────────

  async fn list_interviews(&self, org: i64) -> Result<Vec<Interview>> {
    self.get_list("/interviews", Some(org)).await
  }

  async fn my_interviews(&self, org: Option<i64>) -> Result<Vec<Interview>> {
    self.get_list("/interviews/me/interviews", org).await
  }

  // ── Misc ──────────────────────────────────────────────────────────────────

  async fn unread_notifications(&self, org: i64) -> Result<u64> {
    let body: CountBody = self.get_json("/notifications/count", Some(org)).await?;
    Ok(body.count)
  }

  async fn job_offers(&self, org: i64) -> Result<Vec<JobOffer>> {
    self.get_list("/forms/job-offers", Some(org)).await
  }

  async fn forms(&self, org: i64) -> Result<Vec<Form>> { self.get_list("/forms", Some(org)).await }
}
