//! "My interviews": upcoming first, then past.

use chrono::Local;
use hiredesk_core::interview::{Interview, InterviewStatus, format_duration};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders},
};

use super::{muted, scrolled};
use crate::app::{SessionContext, interviews::InterviewsPage};

pub fn draw(f: &mut Frame, area: Rect, page: &InterviewsPage, session: &SessionContext) {
  let block = Block::default()
    .title(" My interviews ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  page.max_scroll.set(0);
  if !session.is_candidate() {
    f.render_widget(muted("This page is only available to candidate accounts."), inner);
    return;
  }
  if page.loading {
    f.render_widget(muted("Loading…"), inner);
    return;
  }

  let (upcoming, past) = page.split(Local::now().naive_local());
  let mut lines = Vec::new();
  section(&mut lines, "Upcoming", &upcoming, "No upcoming interviews.");
  lines.push(Line::from(""));
  section(&mut lines, "Past", &past, "No past interviews.");

  f.render_widget(
    scrolled(lines, inner.height, page.scroll, &page.max_scroll),
    inner,
  );
}

fn section(lines: &mut Vec<Line<'static>>, title: &str, interviews: &[&Interview], empty: &str) {
  lines.push(Line::from(Span::styled(
    format!("{title} ({})", interviews.len()),
    Style::default()
      .fg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  )));
  if interviews.is_empty() {
    lines.push(Line::from(Span::styled(
      format!("  {empty}"),
      Style::default().fg(Color::DarkGray),
    )));
    return;
  }
  for i in interviews {
    lines.extend(interview_lines(i));
  }
}

fn interview_lines(i: &Interview) -> Vec<Line<'static>> {
  let day = i
    .day()
    .map(|d| d.format("%a %d %b %Y").to_string())
    .unwrap_or_else(|| i.date.clone());
  let time = i
    .start()
    .map(|t| t.format("%H:%M").to_string())
    .unwrap_or_else(|| i.start_time.clone());
  let status_color = match i.status {
    InterviewStatus::Planned => Color::Blue,
    InterviewStatus::Confirmed => Color::Green,
    InterviewStatus::Completed => Color::Gray,
    InterviewStatus::Cancelled => Color::Red,
  };

  let mut lines = vec![Line::from(vec![
    Span::raw("  "),
    Span::styled(i.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
    Span::raw("  "),
    Span::styled(format!("[{}]", i.status.label()), Style::default().fg(status_color)),
  ])];

  let mut details = format!("    {day} at {time} · {}", format_duration(i.duration));
  if let Some(location) = &i.location {
    details.push_str(&format!(" · {location}"));
  }
  if !i.participant_ids.is_empty() {
    details.push_str(&format!(" · {} participants", i.participant_ids.len()));
  }
  lines.push(Line::from(Span::styled(details, Style::default().fg(Color::Gray))));

  if let Some(link) = &i.meeting_link {
    lines.push(Line::from(Span::styled(
      format!("    {link}"),
      Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
    )));
  }
  if let Some(description) = &i.description {
    lines.push(Line::from(Span::styled(
      format!("    {description}"),
      Style::default().fg(Color::DarkGray),
    )));
  }
  lines
}
