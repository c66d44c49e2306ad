//! "My interviews" for the candidate role.

use std::cell::Cell;

use chrono::NaiveDateTime;
use crossterm::event::{KeyCode, KeyEvent};
use hiredesk_core::{
  api::RecruitingApi,
  interview::{self, Interview},
};

use super::{Outcome, SessionContext, toast::Toasts};

#[derive(Debug, Default)]
pub struct InterviewsPage {
  pub interviews: Vec<Interview>,
  pub loading:    bool,
  /// First rendered line shown.
  pub scroll:     usize,
  /// Largest useful `scroll`, in rendered lines; recorded by each draw.
  pub max_scroll: Cell<usize>,
}

impl InterviewsPage {
  pub async fn load<A: RecruitingApi>(
    &mut self,
    api: &A,
    session: &SessionContext,
    toasts: &mut Toasts,
  ) {
    if !session.is_candidate() {
      self.loading = false;
      return;
    }
    self.loading = true;
    match api.my_interviews(session.organization_id).await {
      Ok(interviews) => self.interviews = interviews,
      Err(e) => {
        tracing::error!(error = %e, "failed to load interviews");
        toasts.error("Failed to load your interviews");
        self.interviews.clear();
      }
    }
    self.loading = false;
    self.scroll = 0;
  }

  /// `(upcoming, past)` relative to `now`, in local time.
  pub fn split(&self, now: NaiveDateTime) -> (Vec<&Interview>, Vec<&Interview>) {
    interview::partition(&self.interviews, now)
  }

  pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        if self.scroll < self.max_scroll.get() {
          self.scroll += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
      _ => return Outcome::Ignored,
    }
    Outcome::Handled
  }
}
