//! Candidate documents: metadata only, the bytes are fetched on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
  pub id:            i64,
  /// Storage name on the backend.
  pub filename:      String,
  /// Name the file was uploaded with; used when saving a download.
  pub original_name: String,
  #[serde(rename = "type")]
  pub kind:          String,
  pub mime_type:     String,
  /// Bytes.
  pub size:          u64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:   Option<String>,
  pub created_at:    DateTime<Utc>,
}

impl Document {
  pub fn size_kb(&self) -> String { format!("{:.2} KB", self.size as f64 / 1024.0) }
}
