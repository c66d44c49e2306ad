//! Interviews as seen by the candidate: scheduling fields and a status.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
  Planned,
  Confirmed,
  Completed,
  Cancelled,
}

impl InterviewStatus {
  pub fn label(self) -> &'static str {
    match self {
      Self::Planned => "Planned",
      Self::Confirmed => "Confirmed",
      Self::Completed => "Completed",
      Self::Cancelled => "Cancelled",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewCandidate {
  pub id:         i64,
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
  pub id:              i64,
  pub title:           String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description:     Option<String>,
  /// Calendar day; the backend sends either `YYYY-MM-DD` or a full ISO
  /// timestamp, only the first ten characters are meaningful.
  pub date:            String,
  /// `HH:MM` or `HH:MM:SS`, local time.
  pub start_time:      String,
  /// Minutes.
  pub duration:        u32,
  pub status:          InterviewStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location:        Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub meeting_link:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub candidate:       Option<InterviewCandidate>,
  #[serde(default)]
  pub participant_ids: Vec<i64>,
  pub created_at:      DateTime<Utc>,
}

impl Interview {
  pub fn day(&self) -> Option<NaiveDate> {
    let day = self.date.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
  }

  pub fn start(&self) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(&self.start_time, "%H:%M:%S")
      .or_else(|_| NaiveTime::parse_from_str(&self.start_time, "%H:%M"))
      .ok()
  }

  /// Local start timestamp; `None` when either part does not parse.
  pub fn starts_at(&self) -> Option<NaiveDateTime> {
    Some(self.day()?.and_time(self.start()?))
  }

  /// Whether the interview's date string falls on `day`.
  pub fn is_on(&self, day: NaiveDate) -> bool {
    self.date.starts_with(&day.format("%Y-%m-%d").to_string())
  }

  pub fn is_cancelled(&self) -> bool { self.status == InterviewStatus::Cancelled }
}

/// Split interviews into `(upcoming, past)` relative to `now`.
///
/// Upcoming interviews start at or after `now` and are not cancelled.
/// Everything else is past, including interviews whose date cannot be read.
pub fn partition(
  interviews: &[Interview],
  now: NaiveDateTime,
) -> (Vec<&Interview>, Vec<&Interview>) {
  interviews.iter().partition(|i| {
    !i.is_cancelled() && i.starts_at().is_some_and(|at| at >= now)
  })
}

/// `45 min`, `2h`, `1h30`.
pub fn format_duration(minutes: u32) -> String {
  let (hours, mins) = (minutes / 60, minutes % 60);
  match (hours, mins) {
    (0, m) => format!("{m} min"),
    (h, 0) => format!("{h}h"),
    (h, m) => format!("{h}h{m}"),
  }
}
