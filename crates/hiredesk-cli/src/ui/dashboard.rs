//! Dashboard: four metric tiles and the most recent candidates.

use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::{muted, state_style};
use crate::app::{SessionContext, dashboard::DashboardPage};

pub fn draw(f: &mut Frame, area: Rect, page: &DashboardPage, session: &SessionContext) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Length(4), Constraint::Min(0)])
    .split(area);

  if session.organization_id.is_none() && !page.loading {
    f.render_widget(muted(" No organization found for this account."), rows[0]);
    return;
  }

  let tiles = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Ratio(1, 4); 4])
    .split(rows[0]);

  let stats = &page.stats;
  let metrics = [
    ("Candidates", stats.candidates_count.to_string()),
    ("Interviews today", stats.interviews_today.to_string()),
    ("Unread notifications", stats.unread_notifications.to_string()),
    ("Documents", stats.documents_count.to_string()),
  ];
  for ((label, value), tile) in metrics.into_iter().zip(tiles.iter()) {
    let block = Block::default()
      .title(format!(" {label} "))
      .borders(Borders::ALL)
      .border_style(Style::default().fg(Color::DarkGray));
    let text = if page.loading { "…".to_string() } else { value };
    f.render_widget(
      Paragraph::new(Line::from(Span::styled(
        format!(" {text}"),
        Style::default().add_modifier(Modifier::BOLD),
      )))
      .block(block),
      *tile,
    );
  }

  let block = Block::default()
    .title(" Recent candidates ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(rows[1]);
  f.render_widget(block, rows[1]);

  if page.loading {
    f.render_widget(muted("Loading…"), inner);
    return;
  }
  if stats.recent_candidates.is_empty() {
    f.render_widget(muted("No candidates yet."), inner);
    return;
  }

  let items: Vec<ListItem> = stats
    .recent_candidates
    .iter()
    .map(|c| {
      ListItem::new(Line::from(vec![
        Span::styled(
          format!("{:<4}", c.initials()),
          Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{:<28}", c.full_name())),
        Span::styled(format!("{:<24}", c.state.label()), state_style(c.state)),
        Span::styled(
          c.created_at.format("%Y-%m-%d").to_string(),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
    })
    .collect();
  f.render_widget(List::new(items), inner);
}
