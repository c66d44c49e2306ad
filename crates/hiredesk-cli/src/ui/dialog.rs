//! Popups drawn over a page: state menu, history, documents, the candidate
//! form and yes/no confirmations.

use hiredesk_core::candidate::{CandidateState, Form, JobOffer};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::{muted, scrolled, state_style};
use crate::app::{
  detail::{DocumentsPanel, HistoryPanel},
  form::CandidateForm,
};

/// A `percent_x` by `percent_y` rectangle centered in `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
  let vertical = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Percentage((100 - percent_y) / 2),
      Constraint::Percentage(percent_y),
      Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);
  Layout::default()
    .direction(Direction::Horizontal)
    .constraints([
      Constraint::Percentage((100 - percent_x) / 2),
      Constraint::Percentage(percent_x),
      Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1])[1]
}

/// Clear `area` and draw a titled frame; returns the inner area.
fn popup(f: &mut Frame, area: Rect, title: &str) -> Rect {
  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(area);
  f.render_widget(Clear, area);
  f.render_widget(block, area);
  inner
}

fn highlight() -> Style {
  Style::default()
    .bg(Color::Blue)
    .fg(Color::White)
    .add_modifier(Modifier::BOLD)
}

// ─── State menu ───────────────────────────────────────────────────────────────

pub fn state_menu(f: &mut Frame, area: Rect, name: &str, current: Option<CandidateState>, cursor: usize) {
  let inner = popup(f, centered_rect(40, 45, area), &format!("Change state: {name}"));
  let items: Vec<ListItem> = CandidateState::all()
    .map(|s| {
      let marker = if Some(s) == current { "● " } else { "  " };
      ListItem::new(Line::from(vec![
        Span::raw(marker),
        Span::styled(s.label(), state_style(s)),
      ]))
    })
    .collect();
  let mut state = ListState::default();
  state.select(Some(cursor));
  f.render_stateful_widget(List::new(items).highlight_style(highlight()), inner, &mut state);
}

// ─── History ──────────────────────────────────────────────────────────────────

pub fn history(f: &mut Frame, area: Rect, title: &str, panel: &HistoryPanel) {
  let inner = popup(f, centered_rect(70, 70, area), title);
  panel.max_scroll.set(0);
  if panel.loading {
    f.render_widget(muted("Loading…"), inner);
    return;
  }
  if panel.entries.is_empty() {
    f.render_widget(muted("No state changes recorded."), inner);
    return;
  }

  // Comments are wrapped here so every rendered row is one line to scroll.
  let width = (inner.width as usize).saturating_sub(4).max(1);
  let mut lines = Vec::new();
  for entry in &panel.entries {
    lines.push(Line::from(vec![
      Span::styled(
        entry.changed_at.format("%Y-%m-%d %H:%M  ").to_string(),
        Style::default().fg(Color::DarkGray),
      ),
      Span::styled(entry.previous_state.label(), state_style(entry.previous_state)),
      Span::raw(" → "),
      Span::styled(entry.new_state.label(), state_style(entry.new_state)),
    ]));
    lines.push(Line::from(Span::styled(
      format!("    by {}", entry.changed_by_name),
      Style::default().fg(Color::Gray),
    )));
    if let Some(comment) = &entry.comment {
      let chars: Vec<char> = comment.chars().collect();
      for chunk in chars.chunks(width) {
        lines.push(Line::from(Span::styled(
          format!("    {}", chunk.iter().collect::<String>()),
          Style::default().add_modifier(Modifier::ITALIC),
        )));
      }
    }
  }
  f.render_widget(
    scrolled(lines, inner.height, panel.scroll, &panel.max_scroll),
    inner,
  );
}

// ─── Documents ────────────────────────────────────────────────────────────────

pub fn documents(f: &mut Frame, area: Rect, panel: &DocumentsPanel) {
  let inner = popup(f, centered_rect(70, 60, area), "Documents  (Enter download)");
  if panel.loading {
    f.render_widget(muted("Loading…"), inner);
    return;
  }
  if panel.documents.is_empty() {
    f.render_widget(muted("No documents."), inner);
    return;
  }

  let items: Vec<ListItem> = panel
    .documents
    .iter()
    .map(|d| {
      ListItem::new(Line::from(vec![
        Span::raw(format!("{:<32}", d.original_name)),
        Span::styled(format!("{:<12}", d.kind), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{:>12}  ", d.size_kb()), Style::default().fg(Color::Gray)),
        Span::styled(
          d.created_at.format("%Y-%m-%d").to_string(),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();
  let mut state = ListState::default();
  state.select(Some(panel.cursor));
  f.render_stateful_widget(List::new(items).highlight_style(highlight()), inner, &mut state);
}

// ─── Candidate form ───────────────────────────────────────────────────────────

pub fn form(
  f: &mut Frame,
  area: Rect,
  form: &CandidateForm,
  offers: &[JobOffer],
  forms: &[Form],
  submitting: bool,
) {
  let inner = popup(f, centered_rect(60, 60, area), form.title());

  let mut lines: Vec<Line> = form
    .fields()
    .iter()
    .map(|field| {
      let focused = *field == form.focus;
      let value = form.display_value(*field, offers, forms);
      let value = match (focused, field.is_picker()) {
        (true, true) => format!("‹ {value} ›"),
        (true, false) => format!("{value}_"),
        (false, _) => value,
      };
      let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      Line::from(vec![
        Span::styled(format!("{:<14}", field.label()), label_style),
        Span::raw(value),
      ])
    })
    .collect();

  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    if submitting {
      "Saving…"
    } else {
      "Tab/↑↓ move  ←→ pick  Ctrl-S save  Esc cancel"
    },
    Style::default().fg(Color::DarkGray),
  )));
  f.render_widget(Paragraph::new(lines), inner);
}

// ─── Confirmation ─────────────────────────────────────────────────────────────

pub fn confirm(f: &mut Frame, area: Rect, title: &str, message: &str) {
  let inner = popup(f, centered_rect(50, 25, area), title);
  let lines = vec![
    Line::from(message.to_string()),
    Line::from(""),
    Line::from(Span::styled("y confirm   n cancel", Style::default().fg(Color::DarkGray))),
  ];
  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
}
