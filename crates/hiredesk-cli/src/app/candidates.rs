//! Candidates screen: the recruiter's pipeline view.

use std::{
  io,
  path::{Path, PathBuf},
};

use crossterm::event::{KeyCode, KeyEvent};
use hiredesk_core::{
  api::RecruitingApi,
  candidate::{Candidate, CandidateState, Form, JobOffer, StateChange},
  filter::CandidateQuery,
};
use tokio::{fs::OpenOptions, io::AsyncWriteExt};

use super::{
  Action, Outcome, SessionContext,
  detail::{DocumentsPanel, HistoryPanel},
  form::{CandidateForm, FormKey, FormMode},
  toast::Toasts,
};

/// Popup currently covering the list.
#[derive(Debug, Clone)]
pub enum CandidatesDialog {
  /// "Change state" menu for one candidate; `cursor` indexes
  /// [`CandidateState::all`].
  StateMenu { candidate_id: i64, cursor: usize },
  History,
  Documents,
  Form(CandidateForm),
  ConfirmDelete { candidate_id: i64, name: String },
}

#[derive(Debug, Default)]
pub struct CandidatesPage {
  pub candidates:    Vec<Candidate>,
  pub loading:       bool,
  pub query:         CandidateQuery,
  /// Keys go to the search box while set.
  pub search_active: bool,
  /// Position within the *filtered* list.
  pub cursor:        usize,
  pub job_offers:    Vec<JobOffer>,
  pub forms:         Vec<Form>,
  pub dialog:        Option<CandidatesDialog>,
  pub history:       HistoryPanel,
  pub documents:     DocumentsPanel,
  pub submitting:    bool,
}

impl CandidatesPage {
  // ── Derived views ─────────────────────────────────────────────────────────

  pub fn visible(&self) -> Vec<&Candidate> { self.query.apply(&self.candidates) }

  pub fn selected(&self) -> Option<&Candidate> { self.visible().get(self.cursor).copied() }

  pub fn find(&self, id: i64) -> Option<&Candidate> { self.candidates.iter().find(|c| c.id == id) }

  fn clamp_cursor(&mut self) {
    let len = self.visible().len();
    self.cursor = self.cursor.min(len.saturating_sub(1));
  }

  // ── Fetching ──────────────────────────────────────────────────────────────

  /// Fetch the list, scoped to the session's organization when known.
  pub async fn load<A: RecruitingApi>(
    &mut self,
    api: &A,
    session: &SessionContext,
    toasts: &mut Toasts,
  ) {
    self.loading = true;
    match api.list_candidates(session.organization_id).await {
      Ok(candidates) => self.candidates = candidates,
      Err(e) => {
        tracing::error!(error = %e, "failed to load candidates");
        toasts.error("Failed to load candidates");
        self.candidates.clear();
      }
    }
    self.loading = false;
    self.clamp_cursor();
  }

  /// Job offers and forms for the form pickers. Failures leave the pickers
  /// empty without bothering the user.
  pub async fn load_catalog<A: RecruitingApi>(&mut self, api: &A, session: &SessionContext) {
    let Some(org) = session.organization_id else { return };
    let (offers, forms) = tokio::join!(api.job_offers(org), api.forms(org));
    self.job_offers = offers.unwrap_or_else(|e| {
      tracing::warn!(error = %e, "failed to load job offers");
      Vec::new()
    });
    self.forms = forms.unwrap_or_else(|e| {
      tracing::warn!(error = %e, "failed to load forms");
      Vec::new()
    });
  }

  // ── State change ──────────────────────────────────────────────────────────

  /// Move a candidate to `new_state`.
  ///
  /// A request for the state the candidate is already in is rejected here,
  /// before any network call. The list is updated optimistically and fully
  /// refetched if the backend refuses.
  pub async fn change_state<A: RecruitingApi>(
    &mut self,
    api: &A,
    session: &SessionContext,
    toasts: &mut Toasts,
    candidate_id: i64,
    new_state: CandidateState,
  ) {
    if session.user.is_none() {
      toasts.error("You must be signed in to change a state");
      return;
    }
    let candidate = self.candidates.iter_mut().find(|c| c.id == candidate_id);
    let org = match candidate {
      Some(c) if c.state == new_state => {
        toasts.info("The candidate is already in this state");
        return;
      }
      Some(c) => {
        c.state = new_state;
        c.organization_id().or(session.organization_id)
      }
      None => session.organization_id,
    };
    self.clamp_cursor();

    match api
      .change_state(candidate_id, org, &StateChange::to(new_state))
      .await
    {
      Ok(()) => {
        tracing::info!(candidate_id, state = new_state.as_str(), "state changed");
        toasts.success(format!("State updated: {}", new_state.label()));
        if matches!(self.dialog, Some(CandidatesDialog::History))
          && self.history.is_open_for(candidate_id)
          && let Some(org) = session.organization_id
        {
          self.history.fetch(api, org, toasts).await;
        }
      }
      Err(e) => {
        tracing::error!(candidate_id, error = %e, "state change rejected");
        toasts.error(e.user_message("Failed to update the state"));
        self.load(api, session, toasts).await;
      }
    }
  }

  // ── Dialogs ───────────────────────────────────────────────────────────────

  pub async fn open_history<A: RecruitingApi>(
    &mut self,
    api: &A,
    session: &SessionContext,
    toasts: &mut Toasts,
    candidate_id: i64,
  ) {
    self.dialog = Some(CandidatesDialog::History);
    self.history.open(candidate_id);
    match session.organization_id {
      Some(org) => self.history.fetch(api, org, toasts).await,
      None => self.history.loading = false,
    }
  }

  pub async fn open_documents<A: RecruitingApi>(
    &mut self,
    api: &A,
    session: &SessionContext,
    toasts: &mut Toasts,
    candidate_id: i64,
  ) {
    let Some(org) = session.organization_id else { return };
    self.dialog = Some(CandidatesDialog::Documents);
    self.documents.open(candidate_id);
    self.documents.fetch(api, org, toasts).await;
  }

  pub fn close_dialog(&mut self) {
    match self.dialog.take() {
      Some(CandidatesDialog::History) => self.history.close(),
      Some(CandidatesDialog::Documents) => self.documents.close(),
      _ => {}
    }
  }

  /// Save a document into `dir` under its original file name, numbering the
  /// name (`cv-1.pdf`, `cv-2.pdf`, ...) rather than overwriting a file.
  pub async fn download<A: RecruitingApi>(
    &mut self,
    api: &A,
    session: &SessionContext,
    toasts: &mut Toasts,
    dir: &Path,
    document_id: i64,
    filename: &str,
  ) {
    let Some(org) = session.organization_id else { return };
    let target = download_path(dir, document_id, filename);

    let result = match api.download_document(document_id, org).await {
      Ok(bytes) => save_new(&target, &bytes).await.map_err(|e| e.to_string()),
      Err(e) => Err(e.to_string()),
    };
    match result {
      Ok(target) => {
        tracing::info!(document_id, path = %target.display(), "document saved");
        toasts.success(format!("Downloaded to {}", target.display()));
      }
      Err(e) => {
        tracing::error!(document_id, error = %e, "download failed");
        toasts.error("Failed to download the document");
      }
    }
  }

  // ── Create / edit / delete ────────────────────────────────────────────────

  pub async fn submit_form<A: RecruitingApi>(
    &mut self,
    api: &A,
    session: &SessionContext,
    toasts: &mut Toasts,
  ) {
    let Some(CandidatesDialog::Form(form)) = &self.dialog else { return };
    let (mode, draft) = (form.mode, form.draft.clone());

    if let Err(e) = draft.validate() {
      tracing::debug!(error = %e, "form rejected");
      toasts.error("Please fill in all required fields");
      return;
    }
    let Some(org) = session.organization_id else {
      toasts.error("No organization selected");
      return;
    };

    self.submitting = true;
    let result = match mode {
      FormMode::Create => api.create_candidate(org, &draft.to_create_payload()).await,
      FormMode::Edit(id) => api.update_candidate(id, org, &draft.to_update_payload()).await,
    };
    self.submitting = false;

    match (result, mode) {
      (Ok(()), FormMode::Create) => {
        toasts.success("Candidate created");
        self.dialog = None;
        self.load(api, session, toasts).await;
      }
      (Ok(()), FormMode::Edit(_)) => {
        toasts.success("Candidate updated");
        self.dialog = None;
        self.load(api, session, toasts).await;
      }
      (Err(e), FormMode::Create) => {
        tracing::error!(error = %e, "create failed");
        toasts.error(e.user_message("Failed to create the candidate"));
      }
      (Err(e), FormMode::Edit(id)) => {
        tracing::error!(candidate_id = id, error = %e, "update failed");
        toasts.error(e.user_message("Failed to update the candidate"));
      }
    }
  }

  /// Delete after the user confirmed it.
  pub async fn delete<A: RecruitingApi>(
    &mut self,
    api: &A,
    session: &SessionContext,
    toasts: &mut Toasts,
    candidate_id: i64,
  ) {
    let Some(org) = session.organization_id else { return };
    match api.delete_candidate(candidate_id, org).await {
      Ok(()) => {
        toasts.success("Candidate deleted");
        self.load(api, session, toasts).await;
      }
      Err(e) => {
        tracing::error!(candidate_id, error = %e, "delete failed");
        toasts.error(e.user_message("Failed to delete the candidate"));
      }
    }
  }

  // ── Keys ──────────────────────────────────────────────────────────────────

  pub fn handle_key(
    &mut self,
    key: KeyEvent,
    session: &SessionContext,
    toasts: &mut Toasts,
  ) -> Outcome {
    if self.dialog.is_some() {
      return self.handle_dialog_key(key);
    }
    if self.search_active {
      return self.handle_search_key(key);
    }

    let selected = self.selected().map(|c| (c.id, c.full_name()));
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        if self.cursor + 1 < self.visible().len() {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
      KeyCode::Char('/') => self.search_active = true,
      KeyCode::Right | KeyCode::Char('s') => {
        self.query.state = self.query.state.next();
        self.cursor = 0;
      }
      KeyCode::Left | KeyCode::Char('S') => {
        self.query.state = self.query.state.prev();
        self.cursor = 0;
      }
      KeyCode::Char('x') => {
        self.query.clear();
        self.cursor = 0;
      }
      KeyCode::Char('n') => self.dialog = Some(CandidatesDialog::Form(CandidateForm::create())),
      KeyCode::Enter | KeyCode::Char('c') => {
        if let Some((id, _)) = selected {
          let current = self.find(id).map(|c| c.state);
          let cursor = CandidateState::all()
            .position(|s| Some(s) == current)
            .unwrap_or(0);
          self.dialog = Some(CandidatesDialog::StateMenu { candidate_id: id, cursor });
        }
      }
      KeyCode::Char('h') => {
        if let Some((id, _)) = selected {
          return Outcome::Run(Action::OpenHistory(id));
        }
      }
      KeyCode::Char('d') => {
        if let Some((id, _)) = selected {
          return Outcome::Run(Action::OpenDocuments(id));
        }
      }
      KeyCode::Char('e') | KeyCode::Char('D') if !session.can_manage_candidates() => {
        toasts.info("Only admins, HR and managers can edit or delete candidates");
      }
      KeyCode::Char('e') => {
        if let Some(candidate) = self.selected() {
          self.dialog = Some(CandidatesDialog::Form(CandidateForm::edit(candidate)));
        }
      }
      KeyCode::Char('D') => {
        if let Some((candidate_id, name)) = selected {
          self.dialog = Some(CandidatesDialog::ConfirmDelete { candidate_id, name });
        }
      }
      _ => return Outcome::Ignored,
    }
    Outcome::Handled
  }

  fn handle_search_key(&mut self, key: KeyEvent) -> Outcome {
    match key.code {
      KeyCode::Esc => {
        self.search_active = false;
        self.query.search.clear();
      }
      KeyCode::Enter => self.search_active = false,
      KeyCode::Backspace => {
        self.query.search.pop();
      }
      KeyCode::Char(c) => self.query.search.push(c),
      _ => {}
    }
    self.cursor = 0;
    Outcome::Handled
  }

  fn handle_dialog_key(&mut self, key: KeyEvent) -> Outcome {
    let Some(dialog) = self.dialog.as_mut() else { return Outcome::Ignored };
    match dialog {
      CandidatesDialog::StateMenu { candidate_id, cursor } => match key.code {
        KeyCode::Esc => self.dialog = None,
        KeyCode::Down | KeyCode::Char('j') => {
          *cursor = (*cursor + 1).min(CandidateState::all().count() - 1);
        }
        KeyCode::Up | KeyCode::Char('k') => *cursor = cursor.saturating_sub(1),
        KeyCode::Enter => {
          let candidate_id = *candidate_id;
          let state = CandidateState::all().nth(*cursor);
          self.dialog = None;
          if let Some(state) = state {
            return Outcome::Run(Action::ChangeState { candidate_id, state });
          }
        }
        _ => {}
      },
      CandidatesDialog::History => match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') => self.close_dialog(),
        KeyCode::Down | KeyCode::Char('j') => self.history.scroll_down(),
        KeyCode::Up | KeyCode::Char('k') => self.history.scroll_up(),
        _ => {}
      },
      CandidatesDialog::Documents => match key.code {
        KeyCode::Esc | KeyCode::Char('q') => self.close_dialog(),
        KeyCode::Down | KeyCode::Char('j') => self.documents.cursor_down(),
        KeyCode::Up | KeyCode::Char('k') => self.documents.cursor_up(),
        KeyCode::Enter => {
          if let Some(doc) = self.documents.selected() {
            return Outcome::Run(Action::Download {
              document_id: doc.id,
              filename:    doc.original_name.clone(),
            });
          }
        }
        _ => {}
      },
      CandidatesDialog::Form(form) => {
        if self.submitting {
          return Outcome::Handled;
        }
        match form.handle_key(key, &self.job_offers, &self.forms) {
          FormKey::Continue => {}
          FormKey::Submit => return Outcome::Run(Action::SubmitForm),
          FormKey::Cancel => self.dialog = None,
        }
      }
      CandidatesDialog::ConfirmDelete { candidate_id, .. } => match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
          let id = *candidate_id;
          self.dialog = None;
          return Outcome::Run(Action::DeleteCandidate(id));
        }
        KeyCode::Char('n') | KeyCode::Esc => self.dialog = None,
        _ => {}
      },
    }
    Outcome::Handled
  }
}

/// `dir/<file name>`; directory components in the backend's name are dropped.
fn download_path(dir: &Path, document_id: i64, filename: &str) -> PathBuf {
  let name = Path::new(filename)
    .file_name()
    .map(|n| n.to_os_string())
    .unwrap_or_else(|| format!("document-{document_id}").into());
  dir.join(name)
}

/// `cv.pdf` becomes `cv-<n>.pdf`.
fn numbered(path: &Path, n: u32) -> PathBuf {
  let stem = path
    .file_stem()
    .map(|s| s.to_string_lossy().into_owned())
    .unwrap_or_default();
  let name = match path.extension() {
    Some(ext) => format!("{stem}-{n}.{}", ext.to_string_lossy()),
    None => format!("{stem}-{n}"),
  };
  path.with_file_name(name)
}

/// Write `bytes` to `target`, or to the first free numbered variant of it.
async fn save_new(target: &Path, bytes: &[u8]) -> io::Result<PathBuf> {
  let mut n = 0;
  loop {
    let path = if n == 0 { target.to_path_buf() } else { numbered(target, n) };
    match OpenOptions::new().write(true).create_new(true).open(&path).await {
      Ok(mut file) => {
        file.write_all(bytes).await?;
        file.flush().await?;
        return Ok(path);
      }
      Err(e) if e.kind() == io::ErrorKind::AlreadyExists => n += 1,
      Err(e) => return Err(e),
    }
  }
}
