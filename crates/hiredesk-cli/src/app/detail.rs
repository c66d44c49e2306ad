//! Lazily fetched secondary data: state history and documents.
//!
//! Both panels are empty until a dialog opens for a candidate, fetch exactly
//! once per opening, and are wiped when the dialog closes.

use std::cell::Cell;

use hiredesk_core::{
  api::RecruitingApi,
  candidate::StateHistoryEntry,
  document::Document,
};

use super::toast::Toasts;

// ─── History ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct HistoryPanel {
  pub candidate_id: Option<i64>,
  pub entries:      Vec<StateHistoryEntry>,
  pub loading:      bool,
  /// First rendered line shown.
  pub scroll:       usize,
  /// Largest useful `scroll`, in rendered lines; recorded by each draw.
  pub max_scroll:   Cell<usize>,
}

impl HistoryPanel {
  /// Select `candidate_id` and mark the panel as loading.
  pub fn open(&mut self, candidate_id: i64) {
    *self = Self {
      candidate_id: Some(candidate_id),
      loading: true,
      ..Self::default()
    };
  }

  pub fn close(&mut self) { *self = Self::default(); }

  pub fn is_open_for(&self, candidate_id: i64) -> bool {
    self.candidate_id == Some(candidate_id)
  }

  /// Fetch the history of the selected candidate within `org`.
  pub async fn fetch<A: RecruitingApi>(&mut self, api: &A, org: i64, toasts: &mut Toasts) {
    let Some(id) = self.candidate_id else { return };
    self.loading = true;
    match api.candidate_history(id, org).await {
      Ok(entries) => self.entries = entries,
      Err(e) => {
        tracing::error!(candidate_id = id, error = %e, "failed to load history");
        toasts.error("Failed to load the state history");
        self.entries.clear();
      }
    }
    self.loading = false;
    self.scroll = 0;
  }

  pub fn scroll_down(&mut self) {
    if self.scroll < self.max_scroll.get() {
      self.scroll += 1;
    }
  }

  pub fn scroll_up(&mut self) { self.scroll = self.scroll.saturating_sub(1); }
}

// ─── Documents ────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct DocumentsPanel {
  pub candidate_id: Option<i64>,
  pub documents:    Vec<Document>,
  pub loading:      bool,
  pub cursor:       usize,
}

impl DocumentsPanel {
  pub fn open(&mut self, candidate_id: i64) {
    *self = Self {
      candidate_id: Some(candidate_id),
      loading: true,
      ..Self::default()
    };
  }

  pub fn close(&mut self) { *self = Self::default(); }

  pub async fn fetch<A: RecruitingApi>(&mut self, api: &A, org: i64, toasts: &mut Toasts) {
    let Some(id) = self.candidate_id else { return };
    self.loading = true;
    match api.candidate_documents(id, org).await {
      Ok(documents) => self.documents = documents,
      Err(e) => {
        tracing::error!(candidate_id = id, error = %e, "failed to load documents");
        toasts.error("Failed to load documents");
        self.documents.clear();
      }
    }
    self.loading = false;
    self.cursor = 0;
  }

  pub fn selected(&self) -> Option<&Document> { self.documents.get(self.cursor) }

  pub fn cursor_down(&mut self) {
    if self.cursor + 1 < self.documents.len() {
      self.cursor += 1;
    }
  }

  pub fn cursor_up(&mut self) { self.cursor = self.cursor.saturating_sub(1); }
}
