//! Application state, key dispatch and the queued-action runner.
//!
//! Key handlers never touch the network. They mutate local state and queue
//! an [`Action`]; the event loop draws a frame (so loading indicators show)
//! and then awaits [`App::run_pending`].

pub mod applications;
pub mod candidates;
pub mod dashboard;
pub mod detail;
pub mod form;
pub mod interviews;
pub mod toast;

#[cfg(test)]
pub(crate) mod fake;

use std::{collections::VecDeque, path::PathBuf, sync::Arc};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use hiredesk_core::{
  api::RecruitingApi,
  candidate::CandidateState,
  user::{CurrentUser, UserRole},
};

use crate::session::TokenStore;

use self::{
  applications::ApplicationsPage,
  candidates::CandidatesPage,
  dashboard::DashboardPage,
  interviews::InterviewsPage,
  toast::Toasts,
};

// ─── Page ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
  Dashboard,
  Candidates,
  Applications,
  Interviews,
}

impl Page {
  pub const ALL: [Page; 4] = [
    Page::Dashboard,
    Page::Candidates,
    Page::Applications,
    Page::Interviews,
  ];

  pub fn title(self) -> &'static str {
    match self {
      Self::Dashboard => "Dashboard",
      Self::Candidates => "Candidates",
      Self::Applications => "My applications",
      Self::Interviews => "My interviews",
    }
  }

  fn index(self) -> usize { Self::ALL.iter().position(|p| *p == self).unwrap_or(0) }

  fn next(self) -> Self { Self::ALL[(self.index() + 1) % Self::ALL.len()] }

  fn prev(self) -> Self { Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()] }
}

// ─── Actions ──────────────────────────────────────────────────────────────────

/// Work that needs the backend, queued by key handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  /// Fetch `/users/me` and resolve organization and role.
  Bootstrap,
  LoadDashboard,
  LoadCandidates,
  /// Job offers and forms for the candidate form pickers.
  LoadCatalog,
  ChangeState { candidate_id: i64, state: CandidateState },
  OpenHistory(i64),
  OpenDocuments(i64),
  Download { document_id: i64, filename: String },
  SubmitForm,
  DeleteCandidate(i64),
  LoadApplications,
  ApplicationHistory(i64),
  CancelApplication(i64),
  DeleteApplication(i64),
  LoadInterviews,
  Logout,
}

/// Result of offering a key to a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  /// Not for this screen; global bindings apply.
  Ignored,
  Handled,
  Run(Action),
}

// ─── Session ──────────────────────────────────────────────────────────────────

/// Who is signed in and which organization scopes the requests.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
  pub user:            Option<CurrentUser>,
  pub organization_id: Option<i64>,
  pub role:            Option<UserRole>,
}

impl SessionContext {
  pub fn can_manage_candidates(&self) -> bool {
    self.role.is_some_and(UserRole::can_manage_candidates)
  }

  pub fn is_candidate(&self) -> bool { self.role.is_some_and(UserRole::is_candidate) }
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<A> {
  pub api:          Arc<A>,
  pub page:         Page,
  pub session:      SessionContext,
  /// Organization forced by configuration; wins over `/users/me`.
  org_override:     Option<i64>,
  pub dashboard:    DashboardPage,
  pub candidates:   CandidatesPage,
  pub applications: ApplicationsPage,
  pub interviews:   InterviewsPage,
  pub toasts:       Toasts,
  pub pending:      VecDeque<Action>,
  pub running:      bool,
  pub signed_out:   bool,
  pub download_dir: PathBuf,
  token_store:      Option<TokenStore>,
}

impl<A: RecruitingApi> App<A> {
  pub fn new(api: A) -> Self {
    Self {
      api:          Arc::new(api),
      page:         Page::Dashboard,
      session:      SessionContext::default(),
      org_override: None,
      dashboard:    DashboardPage::default(),
      candidates:   CandidatesPage::default(),
      applications: ApplicationsPage::default(),
      interviews:   InterviewsPage::default(),
      toasts:       Toasts::default(),
      pending:      VecDeque::from([Action::Bootstrap]),
      running:      true,
      signed_out:   false,
      download_dir: PathBuf::from("."),
      token_store:  None,
    }
  }

  pub fn with_organization(mut self, org: Option<i64>) -> Self {
    self.org_override = org;
    self.session.organization_id = org;
    self
  }

  pub fn with_download_dir(mut self, dir: PathBuf) -> Self {
    self.download_dir = dir;
    self
  }

  pub fn with_token_store(mut self, store: TokenStore) -> Self {
    self.token_store = Some(store);
    self
  }

  // ── Navigation ────────────────────────────────────────────────────────────

  /// Switch to `page` and queue its initial fetch, as if freshly mounted.
  pub fn switch_to(&mut self, page: Page) {
    self.page = page;
    self.queue_page_load();
  }

  fn queue_page_load(&mut self) {
    match self.page {
      Page::Dashboard => {
        self.dashboard.loading = true;
        self.pending.push_back(Action::LoadDashboard);
      }
      Page::Candidates => {
        self.candidates.loading = true;
        self.pending.push_back(Action::LoadCandidates);
        self.pending.push_back(Action::LoadCatalog);
      }
      Page::Applications => {
        self.applications.loading = self.session.is_candidate();
        self.pending.push_back(Action::LoadApplications);
      }
      Page::Interviews => {
        self.interviews.loading = self.session.is_candidate();
        self.pending.push_back(Action::LoadInterviews);
      }
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  pub fn handle_key(&mut self, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      self.running = false;
      return;
    }

    let outcome = match self.page {
      Page::Dashboard => self.dashboard.handle_key(key),
      Page::Candidates => self
        .candidates
        .handle_key(key, &self.session, &mut self.toasts),
      Page::Applications => self
        .applications
        .handle_key(key, &self.session, &mut self.toasts),
      Page::Interviews => self.interviews.handle_key(key),
    };

    match outcome {
      Outcome::Handled => {}
      Outcome::Run(action) => self.pending.push_back(action),
      Outcome::Ignored => self.handle_global_key(key),
    }
  }

  fn handle_global_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Char('q') => self.running = false,
      KeyCode::Char(c @ '1'..='4') => {
        let index = c as usize - '1' as usize;
        self.switch_to(Page::ALL[index]);
      }
      KeyCode::Tab => self.switch_to(self.page.next()),
      KeyCode::BackTab => self.switch_to(self.page.prev()),
      KeyCode::Char('r') => self.queue_page_load(),
      KeyCode::Char('L') => self.pending.push_back(Action::Logout),
      _ => {}
    }
  }

  // ── Action runner ─────────────────────────────────────────────────────────

  /// Run every queued action in order.
  pub async fn run_pending(&mut self) {
    while let Some(action) = self.pending.pop_front() {
      self.perform(action).await;
      if !self.running {
        break;
      }
    }
  }

  async fn perform(&mut self, action: Action) {
    tracing::debug!(?action, "perform");
    let api = Arc::clone(&self.api);
    let api = api.as_ref();
    let session = &self.session;
    let toasts = &mut self.toasts;

    match action {
      Action::Bootstrap => self.bootstrap().await,
      Action::LoadDashboard => self.dashboard.load(api, session, toasts).await,
      Action::LoadCandidates => self.candidates.load(api, session, toasts).await,
      Action::LoadCatalog => self.candidates.load_catalog(api, session).await,
      Action::ChangeState { candidate_id, state } => {
        self
          .candidates
          .change_state(api, session, toasts, candidate_id, state)
          .await
      }
      Action::OpenHistory(id) => self.candidates.open_history(api, session, toasts, id).await,
      Action::OpenDocuments(id) => self.candidates.open_documents(api, session, toasts, id).await,
      Action::Download { document_id, filename } => {
        self
          .candidates
          .download(api, session, toasts, &self.download_dir, document_id, &filename)
          .await
      }
      Action::SubmitForm => self.candidates.submit_form(api, session, toasts).await,
      Action::DeleteCandidate(id) => self.candidates.delete(api, session, toasts, id).await,
      Action::LoadApplications => self.applications.load(api, session, toasts).await,
      Action::ApplicationHistory(id) => {
        self
          .applications
          .open_history(api, session, toasts, id)
          .await
      }
      Action::CancelApplication(id) => self.applications.cancel(api, session, toasts, id).await,
      Action::DeleteApplication(id) => self.applications.delete(api, session, toasts, id).await,
      Action::LoadInterviews => self.interviews.load(api, session, toasts).await,
      Action::Logout => self.logout().await,
    }
  }

  /// Resolve the signed-in user, then load the landing page.
  async fn bootstrap(&mut self) {
    match self.api.current_user().await {
      Ok(user) => {
        self.session.organization_id = self.org_override.or(user.primary_organization());
        self.session.role = user.effective_role();
        tracing::info!(
          user_id = user.id,
          organization_id = ?self.session.organization_id,
          role = ?self.session.role,
          "signed in"
        );
        self.session.user = Some(user);
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to load profile");
        self.toasts.error("Failed to load your profile");
      }
    }

    self.page = if self.session.is_candidate() {
      Page::Applications
    } else {
      Page::Dashboard
    };
    self.queue_page_load();
  }

  /// Tell the backend, forget the token, and leave.
  async fn logout(&mut self) {
    if let Err(e) = self.api.logout().await {
      tracing::warn!(error = %e, "logout request failed");
    }
    if let Some(store) = &self.token_store
      && let Err(e) = store.clear()
    {
      tracing::error!(error = %e, "failed to clear stored token");
    }
    self.session = SessionContext::default();
    self.toasts.success("Signed out");
    self.signed_out = true;
    self.running = false;
    self.pending.clear();
  }
}

#[cfg(test)]
mod tests {
  use crossterm::event::KeyModifiers;
  use hiredesk_core::user::UserRole;

  use super::{fake::FakeApi, *};

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  #[tokio::test]
  async fn bootstrap_resolves_organization_and_lands_on_dashboard() {
    let api = FakeApi::recruiter(3);
    let mut app = App::new(api);
    app.run_pending().await;

    assert_eq!(app.session.organization_id, Some(3));
    assert_eq!(app.session.role, Some(UserRole::Rh));
    assert_eq!(app.page, Page::Dashboard);
    assert!(!app.dashboard.loading);
    assert!(app.api.calls().iter().any(|c| c == "list_candidates Some(3)"));
  }

  #[tokio::test]
  async fn configured_organization_overrides_profile() {
    let mut app = App::new(FakeApi::recruiter(3)).with_organization(Some(8));
    app.run_pending().await;
    assert_eq!(app.session.organization_id, Some(8));
  }

  #[tokio::test]
  async fn candidates_land_on_their_applications() {
    let mut app = App::new(FakeApi::candidate());
    app.run_pending().await;
    assert_eq!(app.page, Page::Applications);
    assert!(app.api.calls().iter().any(|c| c == "my_applications"));
  }

  #[tokio::test]
  async fn profile_failure_is_toasted_and_not_fatal() {
    let api = FakeApi::recruiter(3);
    api.fail("current_user");
    let mut app = App::new(api);
    app.run_pending().await;

    assert!(app.running);
    assert_eq!(app.session.organization_id, None);
    assert_eq!(app.toasts.iter().next().unwrap().message, "Failed to load your profile");
  }

  #[tokio::test]
  async fn number_keys_switch_pages_and_fetch_again() {
    let mut app = App::new(FakeApi::recruiter(3));
    app.run_pending().await;

    app.handle_key(key(KeyCode::Char('2')));
    assert_eq!(app.page, Page::Candidates);
    assert!(app.candidates.loading);
    assert_eq!(
      app.pending,
      VecDeque::from([Action::LoadCandidates, Action::LoadCatalog])
    );
    app.run_pending().await;
    assert!(!app.candidates.loading);
    assert_eq!(app.candidates.candidates.len(), 3);
  }

  #[tokio::test]
  async fn quit_and_ctrl_c() {
    let mut app = App::new(FakeApi::recruiter(3));
    app.handle_key(key(KeyCode::Char('q')));
    assert!(!app.running);

    let mut app = App::new(FakeApi::recruiter(3));
    app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(!app.running);
  }

  #[tokio::test]
  async fn logout_clears_token_even_when_request_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = TokenStore::new(dir.path().join("session.toml"));
    store.save("secret").unwrap();

    let api = FakeApi::recruiter(3);
    api.fail("logout");
    let mut app = App::new(api).with_token_store(store.clone());
    app.run_pending().await;

    app.handle_key(key(KeyCode::Char('L')));
    app.run_pending().await;

    assert!(app.signed_out);
    assert!(!app.running);
    assert_eq!(store.load().unwrap(), None);
    assert!(app.session.user.is_none());
    assert_eq!(app.toasts.last().unwrap().message, "Signed out");
  }
}
