//! TUI rendering: header with page tabs, the active page, and a status bar.

pub mod applications;
pub mod candidates;
pub mod dashboard;
pub mod dialog;
pub mod interviews;

use std::cell::Cell;

use chrono::Local;
use hiredesk_core::candidate::CandidateState;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Page, toast::ToastLevel};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<A>(f: &mut Frame, app: &App<A>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  match app.page {
    Page::Dashboard => dashboard::draw(f, rows[1], &app.dashboard, &app.session),
    Page::Candidates => candidates::draw(f, rows[1], &app.candidates, &app.session),
    Page::Applications => applications::draw(f, rows[1], &app.applications, &app.session),
    Page::Interviews => interviews::draw(f, rows[1], &app.interviews, &app.session),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<A>(f: &mut Frame, area: Rect, app: &App<A>) {
  let mut spans = vec![Span::styled(
    " hiredesk ",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  )];
  for (i, page) in Page::ALL.iter().enumerate() {
    let style = if *page == app.page {
      Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::raw(" "));
    spans.push(Span::styled(format!(" {} {} ", i + 1, page.title()), style));
  }

  let who = match &app.session.user {
    Some(user) => {
      let org = user
        .organization_name()
        .map(|n| format!(" · {n}"))
        .unwrap_or_default();
      format!("{}{org}", user.display_name())
    }
    None => "not signed in".to_string(),
  };
  let right = Span::styled(
    format!("{who}  {} ", Local::now().format("%Y-%m-%d")),
    Style::default().fg(Color::Gray),
  );

  let used: usize = spans.iter().map(|s| s.content.chars().count()).sum();
  let pad = (area.width as usize)
    .saturating_sub(used)
    .saturating_sub(right.content.chars().count());
  spans.push(Span::raw(" ".repeat(pad)));
  spans.push(right);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(Line::from(spans)), inner);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<A>(f: &mut Frame, area: Rect, app: &App<A>) {
  let busy = !app.pending.is_empty()
    || app.dashboard.loading
    || app.candidates.loading
    || app.applications.loading
    || app.interviews.loading;
  let (mode, mode_bg) = if busy {
    ("LOADING", Color::Yellow)
  } else if app.page == Page::Candidates && app.candidates.search_active {
    ("SEARCH", Color::Magenta)
  } else {
    ("NORMAL", Color::Cyan)
  };

  let mode_span = Span::styled(
    format!(" {mode} "),
    Style::default()
      .fg(Color::Black)
      .bg(mode_bg)
      .add_modifier(Modifier::BOLD),
  );

  let message = match app.toasts.current() {
    Some(toast) => {
      let color = match toast.level {
        ToastLevel::Success => Color::Green,
        ToastLevel::Info => Color::Blue,
        ToastLevel::Error => Color::Red,
      };
      Span::styled(format!("  {}", toast.message), Style::default().fg(color))
    }
    None => Span::styled(
      format!("  {}", hints(app)),
      Style::default().fg(Color::DarkGray),
    ),
  };

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, message])).style(Style::default().bg(Color::Black)),
    area,
  );
}

fn hints<A>(app: &App<A>) -> &'static str {
  match app.page {
    Page::Candidates if app.candidates.search_active => "Type to search  Enter keep  Esc clear",
    Page::Candidates if app.candidates.dialog.is_some() => "Esc close",
    Page::Candidates => {
      "jk move  / search  s/S state  x clear  Enter state  h history  d docs  n new  e edit  D delete"
    }
    Page::Applications if app.applications.dialog.is_some() => "y confirm  Esc close",
    Page::Applications => "jk move  Enter history  c cancel  D delete  1-4 pages  r reload  L logout  q quit",
    Page::Dashboard | Page::Interviews => "1-4 / Tab pages  r reload  L logout  q quit",
  }
}

// ─── Shared styling ───────────────────────────────────────────────────────────

pub(crate) fn state_style(state: CandidateState) -> Style {
  let color = match state {
    CandidateState::New => Color::Blue,
    CandidateState::Shortlisted => Color::Cyan,
    CandidateState::InterviewScheduled => Color::Magenta,
    CandidateState::InInterview => Color::LightMagenta,
    CandidateState::Accepted => Color::Green,
    CandidateState::Rejected => Color::Red,
    CandidateState::Cancelled => Color::DarkGray,
  };
  Style::default().fg(color)
}

pub(crate) fn muted(text: impl Into<String>) -> Paragraph<'static> {
  Paragraph::new(text.into()).style(Style::default().fg(Color::DarkGray))
}

/// Unwrapped `lines` scrolled down by `scroll` rendered lines inside an area
/// `height` rows tall. The largest offset that still fills the area is
/// stored in `max_scroll` for the key handlers.
pub(crate) fn scrolled<'a>(
  lines: Vec<Line<'a>>,
  height: u16,
  scroll: usize,
  max_scroll: &Cell<usize>,
) -> Paragraph<'a> {
  let max = lines.len().saturating_sub(height as usize);
  max_scroll.set(max);
  let offset = u16::try_from(scroll.min(max)).unwrap_or(u16::MAX);
  Paragraph::new(lines).scroll((offset, 0))
}
