//! Candidates, their pipeline state and the state-change log.
//!
//! The backend owns every transition. The client only reads these shapes and
//! sends [`StateChange`] requests; nothing here enforces a state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

// ─── State ────────────────────────────────────────────────────────────────────

/// Recruitment pipeline stage, as assigned by the backend.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter,
)]
pub enum CandidateState {
  #[serde(rename = "nouveau")]
  New,
  #[serde(rename = "preselectionne")]
  Shortlisted,
  #[serde(rename = "entretien_planifie")]
  InterviewScheduled,
  #[serde(rename = "en_entretien")]
  InInterview,
  #[serde(rename = "accepte")]
  Accepted,
  #[serde(rename = "refuse")]
  Rejected,
  #[serde(rename = "annule")]
  Cancelled,
}

impl CandidateState {
  /// All states in pipeline order.
  pub fn all() -> impl Iterator<Item = Self> { Self::iter() }

  /// Wire value, as used in query strings and request bodies.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::New => "nouveau",
      Self::Shortlisted => "preselectionne",
      Self::InterviewScheduled => "entretien_planifie",
      Self::InInterview => "en_entretien",
      Self::Accepted => "accepte",
      Self::Rejected => "refuse",
      Self::Cancelled => "annule",
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::New => "New",
      Self::Shortlisted => "Shortlisted",
      Self::InterviewScheduled => "Interview scheduled",
      Self::InInterview => "In interview",
      Self::Accepted => "Accepted",
      Self::Rejected => "Rejected",
      Self::Cancelled => "Cancelled",
    }
  }

  /// A closed application has reached a final decision and can no longer be
  /// cancelled by the candidate.
  pub fn is_closed(self) -> bool {
    matches!(self, Self::Accepted | Self::Rejected | Self::Cancelled)
  }
}

impl std::fmt::Display for CandidateState {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

// ─── Candidate ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOfferRef {
  pub id:    i64,
  pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRef {
  pub id:   i64,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRef {
  pub id:   i64,
  pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manager {
  pub id:    i64,
  pub name:  String,
  pub email: String,
}

/// An applicant, as returned by `/candidates` and
/// `/candidates/me/applications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
  pub id:              i64,
  pub first_name:      String,
  pub last_name:       String,
  pub email:           String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub phone:           Option<String>,
  pub state:           CandidateState,
  pub created_at:      DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub organization_id: Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub job_offer:       Option<JobOfferRef>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub form:            Option<FormRef>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub organization:    Option<OrganizationRef>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub manager:         Option<Manager>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notes:           Option<String>,
}

impl Candidate {
  pub fn full_name(&self) -> String {
    format!("{} {}", self.first_name, self.last_name)
  }

  /// Up to two upper-case initials, used as the list "avatar".
  pub fn initials(&self) -> String {
    [&self.first_name, &self.last_name]
      .iter()
      .filter_map(|s| s.chars().next())
      .flat_map(char::to_uppercase)
      .collect()
  }

  /// The candidate's own organization, or the organization of the nested
  /// `organization` object when only that is present.
  pub fn organization_id(&self) -> Option<i64> {
    self
      .organization_id
      .or_else(|| self.organization.as_ref().map(|o| o.id))
  }

  /// Non-empty phone number, if any.
  pub fn phone(&self) -> Option<&str> {
    self.phone.as_deref().filter(|p| !p.is_empty())
  }
}

// ─── History ──────────────────────────────────────────────────────────────────

/// One entry of the append-only state-change log kept by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateHistoryEntry {
  #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
  pub id:              Option<String>,
  pub candidate_id:    i64,
  pub organization_id: i64,
  pub previous_state:  CandidateState,
  pub new_state:       CandidateState,
  pub changed_by:      i64,
  pub changed_by_name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub comment:         Option<String>,
  pub changed_at:      DateTime<Utc>,
}

/// Body of `PATCH /candidates/:id/state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChange {
  pub new_state: CandidateState,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub comment:   Option<String>,
}

impl StateChange {
  pub fn to(new_state: CandidateState) -> Self {
    Self { new_state, comment: None }
  }

  pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
    self.comment = Some(comment.into());
    self
  }
}

// ─── Catalog ──────────────────────────────────────────────────────────────────

/// A job offer a candidate can be attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobOffer {
  pub id:          i64,
  pub title:       String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

/// An application form a candidate may have filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
  pub id:          i64,
  pub name:        String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}
