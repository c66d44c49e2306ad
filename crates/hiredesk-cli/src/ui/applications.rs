//! "My applications" page.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState},
};

use super::{dialog, muted, state_style};
use crate::app::{
  SessionContext,
  applications::{ApplicationsDialog, ApplicationsPage},
};

pub fn draw(f: &mut Frame, area: Rect, page: &ApplicationsPage, session: &SessionContext) {
  let block = Block::default()
    .title(format!(" My applications ({}) ", page.applications.len()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  if !session.is_candidate() {
    f.render_widget(muted("This page is only available to candidate accounts."), inner);
    return;
  }
  if page.loading {
    f.render_widget(muted("Loading…"), inner);
    return;
  }
  if page.applications.is_empty() {
    f.render_widget(muted("You have not applied anywhere yet."), inner);
    return;
  }

  let items: Vec<ListItem> = page
    .applications
    .iter()
    .map(|a| {
      let org = match (&a.organization, a.organization_id()) {
        (Some(o), _) => o.name.clone(),
        (None, Some(id)) => format!("Organization #{id}"),
        (None, None) => "—".to_string(),
      };
      let offer = a
        .job_offer
        .as_ref()
        .map(|o| o.title.as_str())
        .unwrap_or("Spontaneous application");
      ListItem::new(Line::from(vec![
        Span::raw(format!("{org:<26}")),
        Span::styled(format!("{offer:<30}"), Style::default().fg(Color::Gray)),
        Span::styled(format!("{:<22}", a.state.label()), state_style(a.state)),
        Span::styled(
          format!("applied {}", a.created_at.format("%Y-%m-%d")),
          Style::default().fg(Color::DarkGray),
        ),
      ]))
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

  match page.dialog {
    Some(ApplicationsDialog::History) => dialog::history(f, area, "Application history", &page.history),
    Some(ApplicationsDialog::ConfirmCancel(_)) => dialog::confirm(
      f,
      area,
      "Cancel application",
      "Withdraw this application? The recruiter will see it as cancelled.",
    ),
    Some(ApplicationsDialog::ConfirmDelete(_)) => dialog::confirm(
      f,
      area,
      "Delete application",
      "Delete this application? This cannot be undone.",
    ),
    None => {}
  }
}
