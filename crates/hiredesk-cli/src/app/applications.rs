//! "My applications": a candidate's own view of every organization they
//! applied to.

use crossterm::event::{KeyCode, KeyEvent};
use hiredesk_core::{
  api::RecruitingApi,
  candidate::{Candidate, CandidateState, StateChange},
};

use super::{Action, Outcome, SessionContext, detail::HistoryPanel, toast::Toasts};

const CANCEL_COMMENT: &str = "Application cancelled by the candidate";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationsDialog {
  History,
  ConfirmCancel(i64),
  ConfirmDelete(i64),
}

#[derive(Debug, Default)]
pub struct ApplicationsPage {
  pub applications: Vec<Candidate>,
  pub loading:      bool,
  pub cursor:       usize,
  pub dialog:       Option<ApplicationsDialog>,
  pub history:      HistoryPanel,
}

impl ApplicationsPage {
  pub fn selected(&self) -> Option<&Candidate> { self.applications.get(self.cursor) }

  fn find(&self, id: i64) -> Option<&Candidate> { self.applications.iter().find(|a| a.id == id) }

  /// The organization an action on `id` is scoped to.
  fn organization_for(&self, id: i64, session: &SessionContext) -> Option<i64> {
    self
      .find(id)
      .and_then(Candidate::organization_id)
      .or(session.organization_id)
  }

  /// Fetch the signed-in candidate's applications. Other roles get nothing.
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
    match api.my_applications().await {
      Ok(applications) => self.applications = applications,
      Err(e) => {
        tracing::error!(error = %e, "failed to load applications");
        toasts.error("Failed to load your applications");
        self.applications.clear();
      }
    }
    self.loading = false;
    self.cursor = self.cursor.min(self.applications.len().saturating_sub(1));
  }

  pub async fn open_history<A: RecruitingApi>(
    &mut self,
    api: &A,
    session: &SessionContext,
    toasts: &mut Toasts,
    id: i64,
  ) {
    let Some(org) = self.organization_for(id, session) else {
      toasts.error("Cannot determine the organization");
      return;
    };
    self.dialog = Some(ApplicationsDialog::History);
    self.history.open(id);
    self.history.fetch(api, org, toasts).await;
  }

  /// Withdraw an application that is still open.
  pub async fn cancel<A: RecruitingApi>(
    &mut self,
    api: &A,
    session: &SessionContext,
    toasts: &mut Toasts,
    id: i64,
  ) {
    if self.find(id).is_some_and(|a| a.state.is_closed()) {
      toasts.info("This application is already closed");
      return;
    }
    let org = self.organization_for(id, session);
    let change = StateChange::to(CandidateState::Cancelled).with_comment(CANCEL_COMMENT);
    match api.change_state(id, org, &change).await {
      Ok(()) => {
        tracing::info!(application_id = id, "application cancelled");
        toasts.success("Application cancelled");
        self.load(api, session, toasts).await;
      }
      Err(e) => {
        tracing::error!(application_id = id, error = %e, "cancel failed");
        toasts.error(e.user_message("Failed to cancel the application"));
      }
    }
  }

  pub async fn delete<A: RecruitingApi>(
    &mut self,
    api: &A,
    session: &SessionContext,
    toasts: &mut Toasts,
    id: i64,
  ) {
    let Some(org) = self.organization_for(id, session) else {
      toasts.error("Cannot determine the organization");
      return;
    };
    match api.delete_candidate(id, org).await {
      Ok(()) => {
        toasts.success("Application deleted");
        self.load(api, session, toasts).await;
      }
      Err(e) => {
        tracing::error!(application_id = id, error = %e, "delete failed");
        toasts.error(e.user_message("Failed to delete the application"));
      }
    }
  }

  pub fn handle_key(
    &mut self,
    key: KeyEvent,
    session: &SessionContext,
    toasts: &mut Toasts,
  ) -> Outcome {
    if let Some(dialog) = self.dialog {
      return self.handle_dialog_key(dialog, key);
    }
    if !session.is_candidate() {
      return Outcome::Ignored;
    }

    let selected = self.selected().map(|a| (a.id, a.state));
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.applications.len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
      KeyCode::Enter | KeyCode::Char('h') => {
        if let Some((id, _)) = selected {
          return Outcome::Run(Action::ApplicationHistory(id));
        }
      }
      KeyCode::Char('c') => match selected {
        Some((_, state)) if state.is_closed() => toasts.info("This application is already closed"),
        Some((id, _)) => self.dialog = Some(ApplicationsDialog::ConfirmCancel(id)),
        None => {}
      },
      KeyCode::Char('D') => {
        if let Some((id, _)) = selected {
          self.dialog = Some(ApplicationsDialog::ConfirmDelete(id));
        }
      }
      _ => return Outcome::Ignored,
    }
    Outcome::Handled
  }

  fn handle_dialog_key(&mut self, dialog: ApplicationsDialog, key: KeyEvent) -> Outcome {
    let confirmed = matches!(key.code, KeyCode::Char('y') | KeyCode::Enter);
    let dismissed = matches!(key.code, KeyCode::Char('n') | KeyCode::Esc | KeyCode::Char('q'));
    match dialog {
      ApplicationsDialog::History => match key.code {
        KeyCode::Down | KeyCode::Char('j') => self.history.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => self.history.scroll_up(),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') => {
          self.dialog = None;
          self.history.close();
        }
        _ => {}
      },
      ApplicationsDialog::ConfirmCancel(id) if confirmed => {
        self.dialog = None;
        return Outcome::Run(Action::CancelApplication(id));
      }
      ApplicationsDialog::ConfirmDelete(id) if confirmed => {
        self.dialog = None;
        return Outcome::Run(Action::DeleteApplication(id));
      }
      _ if dismissed => self.dialog = None,
      _ => {}
    }
    Outcome::Handled
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::KeyModifiers;

  use super::*;
  use crate::app::fake::FakeApi;

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  async fn loaded(api: &FakeApi) -> (ApplicationsPage, SessionContext, Toasts) {
    let session = api.session();
    let mut page = ApplicationsPage::default();
    let mut toasts = Toasts::default();
    page.load(api, &session, &mut toasts).await;
    api.clear_calls();
    (page, session, toasts)
  }

  #[tokio::test]
  async fn recruiters_never_fetch_applications() {
    let api = FakeApi::recruiter(3);
    let mut page = ApplicationsPage { loading: true, ..Default::default() };
    page.load(&api, &api.session(), &mut Toasts::default()).await;
    assert!(api.calls().is_empty());
    assert!(!page.loading);
  }

  #[tokio::test]
  async fn applications_are_fetched_unscoped() {
    let api = FakeApi::candidate();
    let mut page = ApplicationsPage::default();
    page.load(&api, &api.session(), &mut Toasts::default()).await;
    assert_eq!(api.calls(), vec!["my_applications"]);
    assert_eq!(page.applications.len(), 2);
  }

  #[tokio::test]
  async fn load_failure_empties_the_list() {
    let api = FakeApi::candidate();
    let (mut page, session, mut toasts) = loaded(&api).await;
    api.fail("my_applications");

    page.load(&api, &session, &mut toasts).await;

    assert!(page.applications.is_empty());
    assert_eq!(toasts.last().unwrap().message, "Failed to load your applications");
  }

  #[tokio::test]
  async fn history_uses_the_application_organization() {
    let api = FakeApi::candidate();
    let (mut page, session, mut toasts) = loaded(&api).await;

    page.open_history(&api, &session, &mut toasts, 10).await;

    assert_eq!(api.calls(), vec!["candidate_history 10 7"]);
    assert_eq!(page.dialog, Some(ApplicationsDialog::History));
  }

  #[tokio::test]
  async fn history_without_any_organization_is_an_error() {
    let api = FakeApi::candidate();
    let (mut page, mut session, mut toasts) = loaded(&api).await;
    session.organization_id = None;
    for app in &mut page.applications {
      app.organization_id = None;
      app.organization = None;
    }

    page.open_history(&api, &session, &mut toasts, 10).await;

    assert!(api.calls().is_empty());
    assert!(page.dialog.is_none());
    assert_eq!(toasts.last().unwrap().message, "Cannot determine the organization");
  }

  #[tokio::test]
  async fn cancel_is_confirmed_then_sent_with_a_comment() {
    let api = FakeApi::candidate();
    let (mut page, session, mut toasts) = loaded(&api).await;

    page.handle_key(key(KeyCode::Char('c')), &session, &mut toasts);
    assert_eq!(page.dialog, Some(ApplicationsDialog::ConfirmCancel(10)));
    let outcome = page.handle_key(key(KeyCode::Char('y')), &session, &mut toasts);
    assert_eq!(outcome, Outcome::Run(Action::CancelApplication(10)));

    page.cancel(&api, &session, &mut toasts, 10).await;

    assert_eq!(
      api.calls(),
      vec!["change_state 10 Some(7) annule: Application cancelled by the candidate", "my_applications"]
    );
    assert_eq!(page.applications[0].state, CandidateState::Cancelled);
    assert_eq!(toasts.last().unwrap().message, "Application cancelled");
  }

  #[tokio::test]
  async fn closed_applications_cannot_be_cancelled() {
    let api = FakeApi::candidate();
    let (mut page, session, mut toasts) = loaded(&api).await;

    page.handle_key(key(KeyCode::Down), &session, &mut toasts);
    page.handle_key(key(KeyCode::Char('c')), &session, &mut toasts);
    assert!(page.dialog.is_none());

    page.cancel(&api, &session, &mut toasts, 11).await;
    assert!(api.calls().is_empty());
    assert_eq!(toasts.last().unwrap().message, "This application is already closed");
  }

  #[tokio::test]
  async fn delete_after_confirmation() {
    let api = FakeApi::candidate();
    let (mut page, session, mut toasts) = loaded(&api).await;

    page.handle_key(key(KeyCode::Char('D')), &session, &mut toasts);
    page.handle_key(key(KeyCode::Esc), &session, &mut toasts);
    assert!(page.dialog.is_none());

    page.delete(&api, &session, &mut toasts, 11).await;
    assert_eq!(api.calls(), vec!["delete_candidate 11 9", "my_applications"]);
    assert_eq!(toasts.last().unwrap().message, "Application deleted");
  }
}
