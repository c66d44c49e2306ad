//! Dashboard screen: four headline metrics and the latest candidates.

use chrono::Utc;
use crossterm::event::KeyEvent;
use hiredesk_core::{api::RecruitingApi, dashboard::DashboardStats};

use super::{Outcome, SessionContext, toast::Toasts};

#[derive(Debug, Default)]
pub struct DashboardPage {
  pub stats:   DashboardStats,
  pub loading: bool,
}

impl DashboardPage {
  /// The dashboard has no bindings of its own.
  pub fn handle_key(&mut self, _key: KeyEvent) -> Outcome { Outcome::Ignored }

  /// Fetch candidates, unread notifications, interviews and documents for
  /// the session's organization, concurrently.
  pub async fn load<A: RecruitingApi>(
    &mut self,
    api: &A,
    session: &SessionContext,
    toasts: &mut Toasts,
  ) {
    self.loading = true;
    let Some(org) = session.organization_id else {
      tracing::warn!("no organization for this account; dashboard left empty");
      toasts.info("No organization found for this account");
      self.stats = DashboardStats::default();
      self.loading = false;
      return;
    };

    let (candidates, unread, interviews, documents) = tokio::join!(
      api.list_candidates(Some(org)),
      api.unread_notifications(org),
      api.list_interviews(org),
      api.list_documents(org),
    );

    self.stats = match (candidates, unread, interviews, documents) {
      (Ok(candidates), Ok(unread), Ok(interviews), Ok(documents)) => DashboardStats::compute(
        candidates,
        &interviews,
        documents.len(),
        unread,
        Utc::now().date_naive(),
      ),
      (c, u, i, d) => {
        let first = [c.err(), u.err(), i.err(), d.err()].into_iter().flatten().next();
        if let Some(e) = first {
          tracing::error!(error = %e, "failed to load dashboard");
        }
        toasts.error("Failed to load the dashboard");
        DashboardStats::default()
      }
    };
    self.loading = false;
  }
}
