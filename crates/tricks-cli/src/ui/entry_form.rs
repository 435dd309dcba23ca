//! Add/edit popup.

use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
};

use super::centered;
use crate::form::{EntryForm, FormField};

/// Render `form` as a popup centred over `area`. `names` are the known
/// reference names for the focused field.
pub fn draw(f: &mut Frame, area: Rect, form: &EntryForm, names: &[&str]) {
  let suggestions = form.suggestions(names);
  let list_height = suggestions.len() as u16;

  // Four inputs of three rows each, plus the border and suggestions.
  let popup = centered(area, 70, 4 * 3 + 2 + list_height);
  f.render_widget(Clear, popup);

  let title = match form.editing {
    Some(id) => format!(" Edit #{id} "),
    None => " New trick ".to_string(),
  };
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Cyan));
  let inner = block.inner(popup);
  f.render_widget(block, popup);

  let mut constraints = Vec::new();
  for field in FormField::ALL {
    constraints.push(Constraint::Length(3));
    if field == form.focus() && list_height > 0 {
      constraints.push(Constraint::Length(list_height));
    }
  }
  let slots = Layout::vertical(constraints).split(inner);

  let mut slot = 0;
  for field in FormField::ALL {
    let focused = field == form.focus();
    draw_input(f, slots[slot], field, form.value(field), focused);
    slot += 1;

    if focused && list_height > 0 {
      draw_suggestions(f, slots[slot], &suggestions, form.suggestion);
      slot += 1;
    }
  }
}

fn draw_input(f: &mut Frame, area: Rect, field: FormField, value: &str, focused: bool) {
  let border = if focused {
    Style::default().fg(Color::Yellow)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  let text = if focused {
    format!("{value}_")
  } else {
    value.to_string()
  };
  let block = Block::default()
    .title(format!(" {} ", field.label()))
    .borders(Borders::ALL)
    .border_style(border);
  f.render_widget(Paragraph::new(text).block(block), area);
}

fn draw_suggestions(f: &mut Frame, area: Rect, names: &[&str], highlighted: Option<usize>) {
  let items: Vec<ListItem> = names
    .iter()
    .enumerate()
    .map(|(i, name)| {
      let style = if Some(i) == highlighted {
        Style::default()
          .bg(Color::Blue)
          .fg(Color::White)
          .add_modifier(Modifier::BOLD)
      } else {
        Style::default().fg(Color::Gray)
      };
      ListItem::new(Line::from(vec![
        Span::styled("  ↳ ", Style::default().fg(Color::DarkGray)),
        Span::styled(name.to_string(), style),
      ]))
    })
    .collect();
  f.render_widget(List::new(items), area);
}
