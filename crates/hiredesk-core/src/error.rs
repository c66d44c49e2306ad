//! Error types for `hiredesk-core`.

use serde_json::Value;
use thiserror::Error;

/// A failed call to the recruiting backend.
///
/// Nothing is classified beyond "the request did not succeed"; the variants
/// only distinguish where the failure happened so the message shown to the
/// user can be as specific as the backend allows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
  /// The backend answered with a non-success status.
  #[error("{}", status_text(.status, .message))]
  Status {
    status:  u16,
    /// Best-effort message extracted from the response body.
    message: Option<String>,
  },

  /// The request never produced a response (connect, timeout, TLS).
  #[error("network error: {0}")]
  Transport(String),

  /// The response body did not have the expected shape.
  #[error("unexpected response: {0}")]
  Decode(String),
}

fn status_text(status: &u16, message: &Option<String>) -> String {
  match message {
    Some(m) => format!("{m} ({status})"),
    None => format!("request failed with status {status}"),
  }
}

impl ApiError {
  /// Build a [`ApiError::Status`] from a status code and raw response body.
  ///
  /// The body is searched for `{"message": "..."}`, `{"message": ["...", ..]}`
  /// (first element wins) and `{"error": "..."}`, in that order.
  pub fn from_response(status: u16, body: &str) -> Self {
    let message = serde_json::from_str::<Value>(body)
      .ok()
      .and_then(|v| extract_message(&v));
    Self::Status { status, message }
  }

  /// The backend's own wording for this failure, if it sent one.
  pub fn server_message(&self) -> Option<&str> {
    match self {
      Self::Status { message, .. } => message.as_deref(),
      _ => None,
    }
  }

  /// The backend's message, or `fallback` when there is none.
  pub fn user_message(&self, fallback: &str) -> String {
    self
      .server_message()
      .map(str::to_string)
      .unwrap_or_else(|| fallback.to_string())
  }

  pub fn status(&self) -> Option<u16> {
    match self {
      Self::Status { status, .. } => Some(*status),
      _ => None,
    }
  }
}

fn extract_message(body: &Value) -> Option<String> {
  let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());
  match body.get("message") {
    Some(Value::String(s)) => non_empty(s),
    Some(Value::Array(items)) => items.first().and_then(Value::as_str).and_then(non_empty),
    _ => body.get("error").and_then(Value::as_str).and_then(non_empty),
  }
}

/// Client-side validation failure for the candidate form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
  #[error("missing required field: {0}")]
  MissingField(&'static str),
}

pub type Result<T, E = ApiError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn message_string_is_extracted() {
    let err = ApiError::from_response(400, r#"{"message":"Email already used"}"#);
    assert_eq!(err.server_message(), Some("Email already used"));
    assert_eq!(err.status(), Some(400));
  }

  #[test]
  fn message_array_uses_first_element() {
    let err = ApiError::from_response(
      422,
      r#"{"message":["newState must be a valid enum value","other"]}"#,
    );
    assert_eq!(
      err.server_message(),
      Some("newState must be a valid enum value")
    );
  }

  #[test]
  fn error_field_is_a_fallback() {
    let err = ApiError::from_response(500, r#"{"error":"Internal Server Error"}"#);
    assert_eq!(err.server_message(), Some("Internal Server Error"));
  }

  #[test]
  fn non_json_body_has_no_message() {
    let err = ApiError::from_response(502, "<html>Bad Gateway</html>");
    assert_eq!(err.server_message(), None);
    assert_eq!(err.user_message("Could not load"), "Could not load");
    assert_eq!(err.to_string(), "request failed with status 502");
  }

  #[test]
  fn transport_errors_use_the_fallback() {
    let err = ApiError::Transport("connection refused".into());
    assert_eq!(err.user_message("Could not load"), "Could not load");
    assert_eq!(err.status(), None);
  }
}
