//! In-memory `RecruitingApi` that records every call, for screen tests.

use std::{collections::HashSet, sync::Mutex};

use chrono::{TimeZone, Utc};
use hiredesk_core::{
  ApiError, Result,
  api::RecruitingApi,
  candidate::{Candidate, CandidateState, Form, JobOffer, StateChange, StateHistoryEntry},
  document::Document,
  draft::CandidatePayload,
  interview::{Interview, InterviewStatus},
  user::{CurrentUser, Membership, OrganizationSummary, UserRole},
};

use super::SessionContext;

pub struct FakeApi {
  pub user:         CurrentUser,
  pub candidates:   Mutex<Vec<Candidate>>,
  pub applications: Mutex<Vec<Candidate>>,
  pub history:      Vec<StateHistoryEntry>,
  pub documents:    Vec<Document>,
  pub interviews:   Vec<Interview>,
  pub job_offers:   Vec<JobOffer>,
  pub forms:        Vec<Form>,
  pub unread:       u64,
  failing:          Mutex<HashSet<&'static str>>,
  calls:            Mutex<Vec<String>>,
}

fn candidate(id: i64, first: &str, last: &str, state: CandidateState, org: Option<i64>, month: u32) -> Candidate {
  Candidate {
    id,
    first_name: first.into(),
    last_name: last.into(),
    email: format!("{}@example.com", first.to_lowercase()),
    phone: None,
    state,
    created_at: Utc.with_ymd_and_hms(2024, month, 1, 9, 0, 0).unwrap(),
    organization_id: org,
    job_offer: None,
    form: None,
    organization: None,
    manager: None,
    notes: None,
  }
}

fn user(id: i64, role: UserRole, org: i64) -> CurrentUser {
  CurrentUser {
    id,
    email: Some(format!("user{id}@example.com")),
    first_name: Some("Test".into()),
    last_name: Some("User".into()),
    role: Some(role),
    user_organizations: vec![Membership {
      organization_id: org,
      role:            Some(role),
      organization:    Some(OrganizationSummary { id: org, name: format!("Org {org}") }),
    }],
  }
}

fn document(id: i64, original_name: &str) -> Document {
  Document {
    id,
    filename: format!("stored-{id}"),
    original_name: original_name.into(),
    kind: "cv".into(),
    mime_type: "application/pdf".into(),
    size: 2048,
    description: None,
    created_at: Utc.with_ymd_and_hms(2024, 4, 2, 10, 0, 0).unwrap(),
  }
}

pub(crate) fn interview(id: i64, date: &str, time: &str, status: InterviewStatus) -> Interview {
  Interview {
    id,
    title: format!("Interview {id}"),
    description: None,
    date: date.into(),
    start_time: time.into(),
    duration: 60,
    status,
    location: Some("Room B".into()),
    meeting_link: None,
    candidate: None,
    participant_ids: vec![1, 2],
    created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
  }
}

impl FakeApi {
  fn with_user(user: CurrentUser) -> Self {
    Self {
      user,
      candidates: Mutex::new(Vec::new()),
      applications: Mutex::new(Vec::new()),
      history: Vec::new(),
      documents: Vec::new(),
      interviews: Vec::new(),
      job_offers: Vec::new(),
      forms: Vec::new(),
      unread: 0,
      failing: Mutex::new(HashSet::new()),
      calls: Mutex::new(Vec::new()),
    }
  }

  /// An HR user in `org` with three candidates, the newest being id 3.
  pub fn recruiter(org: i64) -> Self {
    let mut api = Self::with_user(user(100, UserRole::Rh, org));
    *api.candidates.get_mut().unwrap() = vec![
      candidate(1, "Jeanne", "Martin", CandidateState::New, Some(org), 1),
      candidate(2, "Paul", "Durand", CandidateState::Shortlisted, Some(5), 2),
      candidate(3, "Amelie", "Roux", CandidateState::New, None, 3),
    ];
    api.history = vec![StateHistoryEntry {
      id:              Some("h1".into()),
      candidate_id:    2,
      organization_id: 5,
      previous_state:  CandidateState::New,
      new_state:       CandidateState::Shortlisted,
      changed_by:      100,
      changed_by_name: "Test User".into(),
      comment:         None,
      changed_at:      Utc.with_ymd_and_hms(2024, 2, 3, 8, 0, 0).unwrap(),
    }];
    api.documents = vec![document(40, "cv.pdf"), document(41, "letter.pdf")];
    api.interviews = vec![interview(30, "2024-05-01", "10:00", InterviewStatus::Planned)];
    api.job_offers = vec![JobOffer { id: 4, title: "Backend engineer".into(), description: None }];
    api.forms = vec![Form { id: 6, name: "Engineering intake".into(), description: None }];
    api.unread = 4;
    api
  }

  /// A candidate account with one open and one rejected application.
  pub fn candidate() -> Self {
    let mut api = Self::with_user(user(200, UserRole::Candidate, 7));
    *api.applications.get_mut().unwrap() = vec![
      candidate(10, "Test", "User", CandidateState::New, Some(7), 5),
      candidate(11, "Test", "User", CandidateState::Rejected, Some(9), 4),
    ];
    api.interviews = vec![
      interview(20, "2029-06-01", "09:00", InterviewStatus::Completed),
      interview(21, "2030-03-10T00:00:00.000Z", "14:30:00", InterviewStatus::Confirmed),
      interview(22, "2030-04-01", "11:00", InterviewStatus::Cancelled),
    ];
    api
  }

  /// Make every later call to `method` fail with a 400.
  pub fn fail(&self, method: &'static str) { self.failing.lock().unwrap().insert(method); }

  pub fn calls(&self) -> Vec<String> { self.calls.lock().unwrap().clone() }

  pub fn clear_calls(&self) { self.calls.lock().unwrap().clear(); }

  /// The session `App::bootstrap` would derive from this user.
  pub fn session(&self) -> SessionContext {
    SessionContext {
      user:            Some(self.user.clone()),
      organization_id: self.user.primary_organization(),
      role:            self.user.effective_role(),
    }
  }

  fn record(&self, method: &'static str, call: String) -> Result<()> {
    self.calls.lock().unwrap().push(call);
    if self.failing.lock().unwrap().contains(method) {
      return Err(ApiError::Status { status: 400, message: Some("backend said no".into()) });
    }
    Ok(())
  }
}

impl RecruitingApi for FakeApi {
  async fn current_user(&self) -> Result<CurrentUser> {
    self.record("current_user", "current_user".into())?;
    Ok(self.user.clone())
  }

  async fn logout(&self) -> Result<()> { self.record("logout", "logout".into()) }

  async fn list_candidates(&self, org: Option<i64>) -> Result<Vec<Candidate>> {
    self.record("list_candidates", format!("list_candidates {org:?}"))?;
    Ok(self.candidates.lock().unwrap().clone())
  }

  async fn my_applications(&self) -> Result<Vec<Candidate>> {
    self.record("my_applications", "my_applications".into())?;
    Ok(self.applications.lock().unwrap().clone())
  }

  async fn create_candidate(&self, org: i64, payload: &CandidatePayload) -> Result<()> {
    self.record("create_candidate", format!("create_candidate {org} {}", payload.first_name))
  }

  async fn update_candidate(&self, id: i64, org: i64, payload: &CandidatePayload) -> Result<()> {
    self.record(
      "update_candidate",
      format!("update_candidate {id} {org} {}", payload.first_name),
    )
  }

  async fn delete_candidate(&self, id: i64, org: i64) -> Result<()> {
    self.record("delete_candidate", format!("delete_candidate {id} {org}"))?;
    self.candidates.lock().unwrap().retain(|c| c.id != id);
    self.applications.lock().unwrap().retain(|c| c.id != id);
    Ok(())
  }

  async fn change_state(&self, id: i64, org: Option<i64>, change: &StateChange) -> Result<()> {
    let mut call = format!("change_state {id} {org:?} {}", change.new_state.as_str());
    if let Some(comment) = &change.comment {
      call.push_str(&format!(": {comment}"));
    }
    self.record("change_state", call)?;
    for list in [&self.candidates, &self.applications] {
      for c in list.lock().unwrap().iter_mut().filter(|c| c.id == id) {
        c.state = change.new_state;
      }
    }
    Ok(())
  }

  async fn candidate_history(&self, id: i64, org: i64) -> Result<Vec<StateHistoryEntry>> {
    self.record("candidate_history", format!("candidate_history {id} {org}"))?;
    Ok(self.history.iter().filter(|h| h.candidate_id == id).cloned().collect())
  }

  async fn candidate_documents(&self, id: i64, org: i64) -> Result<Vec<Document>> {
    self.record("candidate_documents", format!("candidate_documents {id} {org}"))?;
    Ok(self.documents.clone())
  }

  async fn list_documents(&self, org: i64) -> Result<Vec<Document>> {
    self.record("list_documents", format!("list_documents {org}"))?;
    Ok(self.documents.clone())
  }

  async fn download_document(&self, id: i64, org: i64) -> Result<Vec<u8>> {
    self.record("download_document", format!("download_document {id} {org}"))?;
    Ok(b"%PDF-1.4 fake".to_vec())
  }

  async fn list_interviews(&self, org: i64) -> Result<Vec<Interview>> {
    self.record("list_interviews", format!("list_interviews {org}"))?;
    Ok(self.interviews.clone())
  }

  async fn my_interviews(&self, org: Option<i64>) -> Result<Vec<Interview>> {
    self.record("my_interviews", format!("my_interviews {org:?}"))?;
    Ok(self.interviews.clone())
  }

  async fn unread_notifications(&self, org: i64) -> Result<u64> {
    self.record("unread_notifications", format!("unread_notifications {org}"))?;
    Ok(self.unread)
  }

  async fn job_offers(&self, org: i64) -> Result<Vec<JobOffer>> {
    self.record("job_offers", format!("job_offers {org}"))?;
    Ok(self.job_offers.clone())
  }

  async fn forms(&self, org: i64) -> Result<Vec<Form>> {
    self.record("forms", format!("forms {org}"))?;
    Ok(self.forms.clone())
  }
}
