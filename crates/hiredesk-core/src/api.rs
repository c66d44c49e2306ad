//! The `RecruitingApi` trait: every call the dashboard makes to the backend.
//!
//! `hiredesk-cli` implements it over HTTP; its screens depend only on this
//! abstraction. Organization scoping is passed explicitly: `org` values
//! become the `organizationId` query parameter, and `Option<i64>` means the
//! endpoint is also valid unscoped.

use std::future::Future;

use crate::{
  Result,
  candidate::{Candidate, Form, JobOffer, StateChange, StateHistoryEntry},
  document::Document,
  draft::CandidatePayload,
  interview::Interview,
  user::CurrentUser,
};

pub trait RecruitingApi: Send + Sync {
  // ── Session ───────────────────────────────────────────────────────────

  /// `GET /users/me`
  fn current_user(&self) -> impl Future<Output = Result<CurrentUser>> + Send + '_;

  /// `POST /auth/logout`
  fn logout(&self) -> impl Future<Output = Result<()>> + Send + '_;

  // ── Candidates ────────────────────────────────────────────────────────

  /// `GET /candidates[?organizationId=]`
  fn list_candidates(
    &self,
    org: Option<i64>,
  ) -> impl Future<Output = Result<Vec<Candidate>>> + Send + '_;

  /// `GET /candidates/me/applications`: every organization, never scoped.
  fn my_applications(&self) -> impl Future<Output = Result<Vec<Candidate>>> + Send + '_;

  /// `POST /candidates?organizationId=`
  fn create_candidate<'a>(
    &'a self,
    org: i64,
    payload: &'a CandidatePayload,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  /// `PATCH /candidates/:id?organizationId=`
  fn update_candidate<'a>(
    &'a self,
    id: i64,
    org: i64,
    payload: &'a CandidatePayload,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  /// `DELETE /candidates/:id?organizationId=`
  fn delete_candidate(
    &self,
    id: i64,
    org: i64,
  ) -> impl Future<Output = Result<()>> + Send + '_;

  /// `PATCH /candidates/:id/state[?organizationId=]`
  fn change_state<'a>(
    &'a self,
    id: i64,
    org: Option<i64>,
    change: &'a StateChange,
  ) -> impl Future<Output = Result<()>> + Send + 'a;

  /// `GET /candidates/:id/history?organizationId=`
  fn candidate_history(
    &self,
    id: i64,
    org: i64,
  ) -> impl Future<Output = Result<Vec<StateHistoryEntry>>> + Send + '_;

  // ── Documents ─────────────────────────────────────────────────────────

  /// `GET /candidates/:id/documents?organizationId=`
  fn candidate_documents(
    &self,
    id: i64,
    org: i64,
  ) -> impl Future<Output = Result<Vec<Document>>> + Send + '_;

  /// `GET /documents?organizationId=`
  fn list_documents(&self, org: i64) -> impl Future<Output = Result<Vec<Document>>> + Send + '_;

  /// `GET /documents/:id/download?organizationId=`: raw file bytes.
  fn download_document(
    &self,
    id: i64,
    org: i64,
  ) -> impl Future<Output = Result<Vec<u8>>> + Send + '_;

  // ── Interviews ────────────────────────────────────────────────────────

  /// `GET /interviews?organizationId=`
  fn list_interviews(&self, org: i64)
  -> impl Future<Output = Result<Vec<Interview>>> + Send + '_;

  /// `GET /interviews/me/interviews[?organizationId=]`
  fn my_interviews(
    &self,
    org: Option<i64>,
  ) -> impl Future<Output = Result<Vec<Interview>>> + Send + '_;

  // ── Misc ──────────────────────────────────────────────────────────────

  /// `GET /notifications/count?organizationId=`: the `count` field.
  fn unread_notifications(&self, org: i64) -> impl Future<Output = Result<u64>> + Send + '_;

  /// `GET /forms/job-offers?organizationId=`
  fn job_offers(&self, org: i64) -> impl Future<Output = Result<Vec<JobOffer>>> + Send + '_;

  /// `GET /forms?organizationId=`
  fn forms(&self, org: i64) -> impl Future<Output = Result<Vec<Form>>> + Send + '_;
}
