//! Candidate create/edit form values and the JSON payloads built from them.

use serde::Serialize;

use crate::{DraftError, candidate::Candidate};

/// The values typed into the create or edit candidate form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateDraft {
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  pub phone:        String,
  pub job_offer_id: Option<i64>,
  pub form_id:      Option<i64>,
  pub notes:        String,
}

/// Body of `POST /candidates` and `PATCH /candidates/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePayload {
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub job_offer_id: Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub form_id:      Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub notes:        Option<String>,
}

impl CandidateDraft {
  /// Pre-fill the edit form from an existing candidate.
  pub fn from_candidate(candidate: &Candidate) -> Self {
    Self {
      first_name:   candidate.first_name.clone(),
      last_name:    candidate.last_name.clone(),
      email:        candidate.email.clone(),
      phone:        candidate.phone.clone().unwrap_or_default(),
      job_offer_id: candidate.job_offer.as_ref().map(|j| j.id),
      form_id:      candidate.form.as_ref().map(|f| f.id),
      notes:        candidate.notes.clone().unwrap_or_default(),
    }
  }

  /// First name, last name and email are required.
  pub fn validate(&self) -> Result<(), DraftError> {
    if self.first_name.trim().is_empty() {
      return Err(DraftError::MissingField("first name"));
    }
    if self.last_name.trim().is_empty() {
      return Err(DraftError::MissingField("last name"));
    }
    if self.email.trim().is_empty() {
      return Err(DraftError::MissingField("email"));
    }
    Ok(())
  }

  pub fn to_create_payload(&self) -> CandidatePayload {
    CandidatePayload {
      form_id: self.form_id,
      ..self.base_payload()
    }
  }

  /// The update body never re-links the application form.
  pub fn to_update_payload(&self) -> CandidatePayload { self.base_payload() }

  fn base_payload(&self) -> CandidatePayload {
    let optional = |s: &str| (!s.is_empty()).then(|| s.to_string());
    CandidatePayload {
      first_name:   self.first_name.clone(),
      last_name:    self.last_name.clone(),
      email:        self.email.clone(),
      phone:        optional(&self.phone),
      job_offer_id: self.job_offer_id,
      form_id:      None,
      notes:        optional(&self.notes),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn filled() -> CandidateDraft {
    CandidateDraft {
      first_name: "Jean".into(),
      last_name: "Dupont".into(),
      email: "jean.dupont@example.com".into(),
      ..Default::default()
    }
  }

  #[test]
  fn required_fields_are_checked_in_order() {
    assert_eq!(
      CandidateDraft::default().validate(),
      Err(DraftError::MissingField("first name"))
    );
    let mut d = filled();
    d.last_name = "   ".into();
    assert_eq!(d.validate(), Err(DraftError::MissingField("last name")));
    let mut d = filled();
    d.email.clear();
    assert_eq!(d.validate(), Err(DraftError::MissingField("email")));
    assert_eq!(filled().validate(), Ok(()));
  }

  #[test]
  fn empty_optionals_are_omitted() {
    let body = serde_json::to_value(filled().to_create_payload()).unwrap();
    assert_eq!(
      body,
      json!({
        "firstName": "Jean",
        "lastName": "Dupont",
        "email": "jean.dupont@example.com"
      })
    );
  }

  #[test]
  fn create_sends_form_but_update_does_not() {
    let d = CandidateDraft {
      phone: "+33 6 12 34 56 78".into(),
      job_offer_id: Some(4),
      form_id: Some(2),
      notes: "Met at job fair".into(),
      ..filled()
    };
    let create = serde_json::to_value(d.to_create_payload()).unwrap();
    assert_eq!(create["formId"], json!(2));
    assert_eq!(create["jobOfferId"], json!(4));
    assert_eq!(create["phone"], json!("+33 6 12 34 56 78"));

    let update = serde_json::to_value(d.to_update_payload()).unwrap();
    assert!(update.get("formId").is_none());
    assert_eq!(update["notes"], json!("Met at job fair"));
  }
}
