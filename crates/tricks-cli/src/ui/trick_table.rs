//! Tricks table — the main pane.

use ratatui::{
  Frame,
  layout::{Constraint, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};

use crate::app::App;

/// Render the (filtered) tricks table into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_tricks();
  let total = app.tricks.len();

  // Title with count.
  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Tricks ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Tricks ({}) ", total)
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Filter bar on the last inner line while searching or filtered.
  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      y: inner_area.y + inner_area.height - 1,
      height: 1,
      ..inner_area
    };
    inner_area.height -= 1;

    let filter_text = if app.filter_active {
      format!("/{}_", app.filter)
    } else {
      format!("/{}", app.filter)
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  if filtered.is_empty() {
    let hint = if total == 0 {
      "No tricks yet. Press a to add one."
    } else {
      "Nothing matches the filter."
    };
    f.render_widget(
      Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  let header = Row::new(["#", "Subject", "Category", "Trick/Hack", "Remark", "Added"])
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

  let rows: Vec<Row> = filtered
    .iter()
    .map(|e| {
      Row::new(vec![
        Line::from(e.id.to_string()),
        Line::from(e.subject.as_str()),
        Line::from(e.category.as_str()),
        Line::from(e.item.as_str()),
        Line::styled(e.remark.as_str(), Style::default().fg(Color::Gray)),
        Line::styled(
          e.created_at.format("%Y-%m-%d").to_string(),
          Style::default().fg(Color::DarkGray),
        ),
      ])
    })
    .collect();

  let widths = [
    Constraint::Length(5),
    Constraint::Percentage(14),
    Constraint::Percentage(14),
    Constraint::Fill(3),
    Constraint::Fill(2),
    Constraint::Length(10),
  ];

  // Scrollable table with cursor tracking.
  let mut state = TableState::default();
  state.select(Some(app.cursor));

  f.render_stateful_widget(
    Table::new(rows, widths).header(header).row_highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}
