//! Headline numbers for the dashboard screen.

use chrono::NaiveDate;

use crate::{candidate::Candidate, interview::Interview};

/// How many candidates the "recent" panel shows.
pub const RECENT_CANDIDATES: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
  pub candidates_count:     usize,
  pub interviews_today:     usize,
  pub unread_notifications: u64,
  pub documents_count:      usize,
  /// Newest first.
  pub recent_candidates:    Vec<Candidate>,
}

impl DashboardStats {
  pub fn compute(
    mut candidates: Vec<Candidate>,
    interviews: &[Interview],
    documents_count: usize,
    unread_notifications: u64,
    today: NaiveDate,
  ) -> Self {
    let candidates_count = candidates.len();
    let interviews_today = interviews.iter().filter(|i| i.is_on(today)).count();

    candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    candidates.truncate(RECENT_CANDIDATES);

    Self {
      candidates_count,
      interviews_today,
      unread_notifications,
      documents_count,
      recent_candidates: candidates,
    }
  }
}
