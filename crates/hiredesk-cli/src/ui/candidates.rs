//! Candidates page: state chips, search bar, the list and its dialogs.

use hiredesk_core::filter::StateFilter;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::{dialog, muted, state_style};
use crate::app::{
  SessionContext,
  candidates::{CandidatesDialog, CandidatesPage},
};

pub fn draw(f: &mut Frame, area: Rect, page: &CandidatesPage, session: &SessionContext) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // chips
      Constraint::Length(1), // search
      Constraint::Min(0),    // list
    ])
    .split(area);

  draw_chips(f, rows[0], page);
  draw_search(f, rows[1], page);
  draw_list(f, rows[2], page, session);
  draw_dialog(f, area, page);
}

fn draw_chips(f: &mut Frame, area: Rect, page: &CandidatesPage) {
  let mut spans = vec![Span::raw(" ")];
  for chip in StateFilter::chips() {
    let style = if chip == page.query.state {
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      match chip {
        StateFilter::All => Style::default().fg(Color::Gray),
        StateFilter::Only(s) => state_style(s),
      }
    };
    spans.push(Span::styled(format!(" {} ", chip.label()), style));
    spans.push(Span::raw(" "));
  }
  f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_search(f: &mut Frame, area: Rect, page: &CandidatesPage) {
  let text = match (page.search_active, page.query.search.is_empty()) {
    (true, _) => format!(" /{}_", page.query.search),
    (false, false) => format!(" /{}", page.query.search),
    (false, true) => " / to search by name or email".to_string(),
  };
  let style = if page.search_active || !page.query.search.is_empty() {
    Style::default().fg(Color::Yellow)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  f.render_widget(Paragraph::new(text).style(style), area);
}

fn draw_list(f: &mut Frame, area: Rect, page: &CandidatesPage, session: &SessionContext) {
  let visible = page.visible();
  let title = if page.query.is_active() {
    format!(" Candidates ({}/{}) ", visible.len(), page.candidates.len())
  } else {
    format!(" Candidates ({}) ", page.candidates.len())
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if page.loading {
    f.render_widget(muted("Loading…"), inner);
    return;
  }
  if visible.is_empty() {
    let message = if page.candidates.is_empty() {
      "No candidates."
    } else {
      "No candidate matches the current filters."
    };
    f.render_widget(muted(message), inner);
    return;
  }

  let items: Vec<ListItem> = visible
    .iter()
    .map(|c| {
      let offer = c
        .job_offer
        .as_ref()
        .map(|o| o.title.as_str())
        .unwrap_or("—");
      let mut spans = vec![
        Span::raw(format!("{:<26}", c.full_name())),
        Span::styled(format!("{:<30}", c.email), Style::default().fg(Color::Gray)),
        Span::styled(format!("{:<22}", c.state.label()), state_style(c.state)),
        Span::raw(format!("{offer:<24}")),
        Span::styled(
          c.created_at.format("%Y-%m-%d").to_string(),
          Style::default().fg(Color::DarkGray),
        ),
      ];
      if session.organization_id.is_none()
        && let Some(org) = &c.organization
      {
        spans.push(Span::styled(format!("  {}", org.name), Style::default().fg(Color::DarkGray)));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  let mut state = ListState::default();
  state.select(Some(page.cursor));
  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner,
    &mut state,
  );
}

fn draw_dialog(f: &mut Frame, area: Rect, page: &CandidatesPage) {
  let Some(open) = &page.dialog else { return };
  match open {
    CandidatesDialog::StateMenu { candidate_id, cursor } => {
      let candidate = page.find(*candidate_id);
      let name = candidate.map(|c| c.full_name()).unwrap_or_default();
      dialog::state_menu(f, area, &name, candidate.map(|c| c.state), *cursor);
    }
    CandidatesDialog::History => {
      let name = page
        .history
        .candidate_id
        .and_then(|id| page.find(id))
        .map(|c| c.full_name())
        .unwrap_or_default();
      dialog::history(f, area, &format!("State history: {name}"), &page.history);
    }
    CandidatesDialog::Documents => dialog::documents(f, area, &page.documents),
    CandidatesDialog::Form(form) => {
      dialog::form(f, area, form, &page.job_offers, &page.forms, page.submitting)
    }
    CandidatesDialog::ConfirmDelete { name, .. } => dialog::confirm(
      f,
      area,
      "Delete candidate",
      &format!("Delete {name}? This cannot be undone."),
    ),
  }
}
