//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tricks_core::{
  entry::EntryView,
  filter::EntryFilter,
  reference::{Category, Subject},
  validate::validate,
};

use crate::{
  client::ApiClient,
  form::{EntryForm, FormField},
};

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the tricks table.
  Table,
  /// The add/edit form is open over the table.
  Form,
  /// Waiting for `y` to delete the entry with this id.
  ConfirmDelete(i64),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Every entry, newest first, as returned by the API.
  pub tricks: Vec<EntryView>,

  /// Known reference names, for form suggestions.
  pub subjects:   Vec<Subject>,
  pub categories: Vec<Category>,

  /// Current filter string (typed while `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* table.
  pub cursor: usize,

  /// The open add/edit form, if any.
  pub form: Option<EntryForm>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  /// Create an [`App`] with nothing loaded.
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::Table,
      tricks: Vec::new(),
      subjects: Vec::new(),
      categories: Vec::new(),
      filter: String::new(),
      filter_active: false,
      cursor: 0,
      form: None,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch tricks, subjects, and categories from the API.
  pub async fn load(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading tricks…".into();
    let result = tokio::try_join!(
      self.client.list_tricks(),
      self.client.list_subjects(),
      self.client.list_categories(),
    );
    match result {
      Ok((tricks, subjects, categories)) => {
        self.tricks = tricks;
        self.subjects = subjects;
        self.categories = categories;
        self.clamp_cursor();
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  /// Reload after a write, keeping `message` unless the reload itself fails.
  async fn reload_with(&mut self, message: String) {
    if self.load().await.is_ok() {
      self.status_msg = message;
    }
  }

  // ── Filtered table ────────────────────────────────────────────────────────

  /// Entries that match the current filter query.
  pub fn filtered_tricks(&self) -> Vec<&EntryView> {
    EntryFilter::parse(&self.filter).apply(&self.tricks)
  }

  /// The entry under the cursor in the filtered view, if any.
  pub fn cursor_entry(&self) -> Option<&EntryView> {
    self.filtered_tricks().get(self.cursor).copied()
  }

  fn clamp_cursor(&mut self) {
    let len = self.filtered_tricks().len();
    self.cursor = self.cursor.min(len.saturating_sub(1));
  }

  /// Reference names to suggest for the form's focused field.
  pub fn suggestion_names(&self) -> Vec<&str> {
    match self.form.as_ref().map(EntryForm::focus) {
      Some(FormField::Subject) => {
        self.subjects.iter().map(|s| s.name.as_str()).collect()
      }
      Some(FormField::Category) => {
        self.categories.iter().map(|c| c.name.as_str()).collect()
      }
      _ => Vec::new(),
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    // Filter input mode: all printable keys go into the filter string.
    if self.filter_active {
      self.handle_filter_key(key);
      return Ok(true);
    }

    match self.screen.clone() {
      Screen::Table => self.handle_table_key(key).await,
      Screen::Form => {
        self.handle_form_key(key).await;
        Ok(true)
      }
      Screen::ConfirmDelete(id) => {
        self.handle_confirm_key(key, id).await;
        Ok(true)
      }
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.cursor = 0;
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.cursor = 0;
      }
      _ => {}
    }
  }

  async fn handle_table_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      // Quit
      KeyCode::Char('q') => return Ok(false),

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_tricks().len();
        if len > 0 && self.cursor + 1 < len {
          self.cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.cursor = self.cursor.saturating_sub(1);
      }

      // Filter
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.cursor = 0;
      }
      KeyCode::Esc if !self.filter.is_empty() => {
        self.filter.clear();
        self.cursor = 0;
      }

      // Add / edit / delete
      KeyCode::Char('a') => {
        self.form = Some(EntryForm::for_new());
        self.screen = Screen::Form;
      }
      KeyCode::Enter | KeyCode::Char('e') => {
        if let Some(form) = self.cursor_entry().map(EntryForm::for_edit) {
          self.form = Some(form);
          self.screen = Screen::Form;
        }
      }
      KeyCode::Char('d') => {
        if let Some(id) = self.cursor_entry().map(|e| e.id) {
          self.screen = Screen::ConfirmDelete(id);
        }
      }

      // Reload
      KeyCode::Char('r') => {
        // Failures are already shown in the status bar.
        let _ = self.load().await;
      }

      _ => {}
    }
    Ok(true)
  }

  async fn handle_form_key(&mut self, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
      self.submit().await;
      return;
    }

    let (available, highlighted) = {
      let names = self.suggestion_names();
      match self.form.as_ref() {
        Some(f) => {
          let hits = f.suggestions(&names);
          let picked = f.suggestion.and_then(|i| hits.get(i)).map(|s| s.to_string());
          (hits.len(), picked)
        }
        None => (0, None),
      }
    };

    let Some(form) = self.form.as_mut() else {
      self.screen = Screen::Table;
      return;
    };

    match key.code {
      KeyCode::Esc => {
        self.form = None;
        self.screen = Screen::Table;
        self.status_msg = "Cancelled".into();
      }
      KeyCode::Tab => form.focus_next(),
      KeyCode::BackTab => form.focus_prev(),
      KeyCode::Down => form.suggestion_down(available),
      KeyCode::Up => form.suggestion_up(),
      KeyCode::Enter => match highlighted {
        Some(name) => form.accept(&name),
        None if form.focus() == FormField::Remark => self.submit().await,
        None => form.focus_next(),
      },
      KeyCode::Backspace => form.backspace(),
      KeyCode::Char(c) if plain_or_shifted(key.modifiers) => form.push(c),
      _ => {}
    }
  }

  /// Validate the open form locally, then send it. The form stays open on
  /// any failure so nothing typed is lost.
  async fn submit(&mut self) {
    let Some(form) = self.form.as_mut() else {
      return;
    };
    let entry = form.to_new_entry();

    if let Err(e) = validate(&entry) {
      form.focus_on(e.field().into());
      self.status_msg = e.to_string();
      return;
    }

    let result = match form.editing {
      None => self
        .client
        .add_entry(&entry)
        .await
        .map(|view| format!("Added #{}", view.id)),
      Some(id) => self.client.update_entry(id, &entry).await.map(|found| {
        if found {
          format!("Updated #{id}")
        } else {
          format!("Entry #{id} no longer exists")
        }
      }),
    };

    match result {
      Ok(message) => {
        self.form = None;
        self.screen = Screen::Table;
        self.reload_with(message).await;
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  async fn handle_confirm_key(&mut self, key: KeyEvent, id: i64) {
    self.screen = Screen::Table;
    if key.code != KeyCode::Char('y') {
      self.status_msg = "Delete cancelled".into();
      return;
    }
    match self.client.delete_entry(id).await {
      Ok(true) => self.reload_with(format!("Deleted #{id}")).await,
      Ok(false) => self.reload_with(format!("Entry #{id} was already gone")).await,
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }
}

/// Whether a character key should be typed as text rather than treated as a
/// chord like Ctrl-A or Alt-X.
fn plain_or_shifted(modifiers: KeyModifiers) -> bool {
  modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

  use super::*;
  use crate::client::ApiConfig;

  fn app() -> App {
    // Nothing in these tests reaches the network.
    let client = ApiClient::new(ApiConfig {
      base_url: "http://127.0.0.1:9".into(),
    })
    .unwrap();
    let mut app = App::new(client);
    app.tricks = vec![
      view(2, "Python", "Strings", "Use f-strings"),
      view(1, "JavaScript", "Arrays", "Use flatMap to map+flatten"),
    ];
    app.subjects = vec![
      Subject { id: 1, name: "JavaScript".into() },
      Subject { id: 2, name: "Python".into() },
    ];
    app
  }

  fn view(id: i64, subject: &str, category: &str, item: &str) -> EntryView {
    EntryView {
      id,
      subject: subject.into(),
      category: category.into(),
      item: item.into(),
      remark: String::new(),
      created_at: Utc::now(),
    }
  }

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  async fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
      app.handle_key(key(KeyCode::Char(c))).await.unwrap();
    }
  }

  #[tokio::test]
  async fn filter_narrows_table() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('/'))).await.unwrap();
    type_str(&mut app, "flatmap").await;
    app.handle_key(key(KeyCode::Enter)).await.unwrap();

    assert!(!app.filter_active);
    let ids: Vec<_> = app.filtered_tricks().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![1]);
    assert_eq!(app.cursor_entry().map(|e| e.id), Some(1));

    app.handle_key(key(KeyCode::Esc)).await.unwrap();
    assert_eq!(app.filtered_tricks().len(), 2);
  }

  #[tokio::test]
  async fn quit_keys_stop_the_loop() {
    let mut app = app();
    assert!(!app.handle_key(key(KeyCode::Char('q'))).await.unwrap());
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(!app.handle_key(ctrl_c).await.unwrap());
  }

  #[tokio::test]
  async fn empty_form_is_rejected_before_any_request() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('a'))).await.unwrap();
    assert_eq!(app.screen, Screen::Form);

    type_str(&mut app, "Rust").await;
    let save = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL);
    app.handle_key(save).await.unwrap();

    assert_eq!(app.status_msg, "Category is required");
    assert_eq!(app.screen, Screen::Form);
    let form = app.form.as_ref().unwrap();
    assert_eq!(form.subject, "Rust");
    assert_eq!(form.focus(), FormField::Category);
  }

  #[tokio::test]
  async fn edit_opens_prefilled_form() {
    let mut app = app();
    app.handle_key(key(KeyCode::Down)).await.unwrap();
    app.handle_key(key(KeyCode::Char('e'))).await.unwrap();

    let form = app.form.as_ref().unwrap();
    assert_eq!(form.editing, Some(1));
    assert_eq!(form.subject, "JavaScript");
    assert_eq!(form.item, "Use flatMap to map+flatten");
  }

  #[tokio::test]
  async fn suggestion_is_picked_with_arrow_and_enter() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('a'))).await.unwrap();
    type_str(&mut app, "py").await;
    app.handle_key(key(KeyCode::Down)).await.unwrap();
    app.handle_key(key(KeyCode::Enter)).await.unwrap();

    let form = app.form.as_ref().unwrap();
    assert_eq!(form.subject, "Python");
    assert_eq!(form.focus(), FormField::Category);
  }

  #[tokio::test]
  async fn delete_needs_confirmation() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('d'))).await.unwrap();
    assert_eq!(app.screen, Screen::ConfirmDelete(2));

    app.handle_key(key(KeyCode::Char('n'))).await.unwrap();
    assert_eq!(app.screen, Screen::Table);
    assert_eq!(app.status_msg, "Delete cancelled");
    assert_eq!(app.tricks.len(), 2);
  }

  #[tokio::test]
  async fn escape_cancels_form() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('a'))).await.unwrap();
    app.handle_key(key(KeyCode::Esc)).await.unwrap();
    assert_eq!(app.screen, Screen::Table);
    assert!(app.form.is_none());
  }

  #[tokio::test]
  async fn modified_chars_are_not_typed_into_the_form() {
    let mut app = app();
    app.handle_key(key(KeyCode::Char('a'))).await.unwrap();

    app
      .handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL))
      .await
      .unwrap();
    app
      .handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT))
      .await
      .unwrap();
    app
      .handle_key(KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT))
      .await
      .unwrap();
    type_str(&mut app, "ust").await;

    assert_eq!(app.form.as_ref().unwrap().subject, "Rust");
  }
}
