//! TUI rendering — orchestrates all panes.

pub mod entry_form;
pub mod trick_table;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Flex, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  trick_table::draw(f, rows[1], app);
  draw_status(f, rows[2], app);

  match &app.screen {
    Screen::Table => {}
    Screen::Form => {
      if let Some(form) = &app.form {
        entry_form::draw(f, rows[1], form, &app.suggestion_names());
      }
    }
    Screen::ConfirmDelete(id) => draw_confirm(f, rows[1], app, *id),
  }
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
    .flex(Flex::Center)
    .areas(area);
  let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
    .flex(Flex::Center)
    .areas(row);
  cell
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " tricks  [a] add  [/] search  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!(
      "{} subjects · {} categories  {date} ",
      app.subjects.len(),
      app.categories.len()
    ),
    Style::default().fg(Color::Gray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.chars().count() as u16;
  let right_width = right.content.chars().count() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Delete confirmation ──────────────────────────────────────────────────────

fn draw_confirm(f: &mut Frame, area: Rect, app: &App, id: i64) {
  let popup = centered(area, 50, 6);
  f.render_widget(Clear, popup);

  let item = app
    .tricks
    .iter()
    .find(|e| e.id == id)
    .map(|e| e.item.as_str())
    .unwrap_or("(unknown)");

  let text = vec![
    Line::from(Span::styled(
      item.to_string(),
      Style::default().add_modifier(Modifier::ITALIC),
    )),
    Line::from(""),
    Line::from(vec![
      Span::styled("[y]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
      Span::raw(" delete   "),
      Span::styled("any other key", Style::default().fg(Color::DarkGray)),
      Span::raw(" cancel"),
    ]),
  ];

  let block = Block::default()
    .title(format!(" Delete #{id}? "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Red));
  f.render_widget(
    Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
    popup,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match &app.screen {
    Screen::Table if app.filter_active => (
      "SEARCH",
      "Type to filter  Esc clear  Enter done",
    ),
    Screen::Table => (
      "TABLE",
      "↑↓/jk move  / search  a add  e edit  d delete  r reload  q quit",
    ),
    Screen::Form => (
      "FORM",
      "Tab next  ↑↓ suggestions  Enter pick  Ctrl-S save  Esc cancel",
    ),
    Screen::ConfirmDelete(_) => ("CONFIRM", "y delete  any other key cancels"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {status}"),
    Style::default().fg(Color::DarkGray),
  );

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}
