//! Add/edit form state.

use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use tricks_core::{
  entry::{EntryView, NewEntry},
  validate::EntryField,
};

/// Maximum number of suggestions shown under a subject/category input.
const MAX_SUGGESTIONS: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
  #[default]
  Subject,
  Category,
  Item,
  Remark,
}

impl FormField {
  pub const ALL: [FormField; 4] =
    [Self::Subject, Self::Category, Self::Item, Self::Remark];

  pub fn label(self) -> &'static str {
    match self {
      Self::Subject => "Subject",
      Self::Category => "Category",
      Self::Item => "Trick/Hack",
      Self::Remark => "Remark (optional)",
    }
  }

  fn next(self) -> Self {
    match self {
      Self::Subject => Self::Category,
      Self::Category => Self::Item,
      Self::Item => Self::Remark,
      Self::Remark => Self::Subject,
    }
  }

  fn prev(self) -> Self {
    match self {
      Self::Subject => Self::Remark,
      Self::Category => Self::Subject,
      Self::Item => Self::Category,
      Self::Remark => Self::Item,
    }
  }

  /// Whether the field picks from existing reference names.
  pub fn has_suggestions(self) -> bool {
    matches!(self, Self::Subject | Self::Category)
  }
}

impl From<EntryField> for FormField {
  fn from(f: EntryField) -> Self {
    match f {
      EntryField::Subject => Self::Subject,
      EntryField::Category => Self::Category,
      EntryField::Item => Self::Item,
    }
  }
}

/// The form being filled in, either for a new entry or for editing one.
#[derive(Debug, Clone, Default)]
pub struct EntryForm {
  /// `Some(id)` when editing an existing entry.
  pub editing:    Option<i64>,
  pub subject:    String,
  pub category:   String,
  pub item:       String,
  pub remark:     String,
  pub focus:      FormField,
  /// Highlighted suggestion under the focused input, if any.
  pub suggestion: Option<usize>,
}

impl EntryForm {
  pub fn for_new() -> Self { Self::default() }

  pub fn for_edit(view: &EntryView) -> Self {
    Self {
      editing: Some(view.id),
      subject: view.subject.clone(),
      category: view.category.clone(),
      item: view.item.clone(),
      remark: view.remark.clone(),
      ..Self::default()
    }
  }

  pub fn focus(&self) -> FormField { self.focus }

  pub fn value(&self, field: FormField) -> &str {
    match field {
      FormField::Subject => &self.subject,
      FormField::Category => &self.category,
      FormField::Item => &self.item,
      FormField::Remark => &self.remark,
    }
  }

  fn value_mut(&mut self, field: FormField) -> &mut String {
    match field {
      FormField::Subject => &mut self.subject,
      FormField::Category => &mut self.category,
      FormField::Item => &mut self.item,
      FormField::Remark => &mut self.remark,
    }
  }

  // ── Editing ───────────────────────────────────────────────────────────────

  pub fn push(&mut self, c: char) {
    let field = self.focus();
    self.value_mut(field).push(c);
    self.suggestion = None;
  }

  pub fn backspace(&mut self) {
    let field = self.focus();
    self.value_mut(field).pop();
    self.suggestion = None;
  }

  pub fn focus_next(&mut self) {
    self.focus = self.focus.next();
    self.suggestion = None;
  }

  pub fn focus_prev(&mut self) {
    self.focus = self.focus.prev();
    self.suggestion = None;
  }

  pub fn focus_on(&mut self, field: FormField) {
    self.focus = field;
    self.suggestion = None;
  }

  // ── Suggestions ───────────────────────────────────────────────────────────

  /// Known names matching the focused input, best match first.
  ///
  /// Empty input lists every name. A name identical to the input is not
  /// suggested; when nothing matches, the typed value is created on save.
  pub fn suggestions<'a>(&self, names: &[&'a str]) -> Vec<&'a str> {
    let field = self.focus();
    if !field.has_suggestions() {
      return Vec::new();
    }
    let input = self.value(field);
    if input.is_empty() {
      return names.iter().take(MAX_SUGGESTIONS).copied().collect();
    }

    let matcher = SkimMatcherV2::default().ignore_case();
    let mut scored: Vec<(i64, &'a str)> = names
      .iter()
      .filter(|n| **n != input)
      .filter_map(|n| matcher.fuzzy_match(n, input).map(|score| (score, *n)))
      .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
      .into_iter()
      .take(MAX_SUGGESTIONS)
      .map(|(_, n)| n)
      .collect()
  }

  pub fn suggestion_down(&mut self, available: usize) {
    if available == 0 {
      self.suggestion = None;
      return;
    }
    self.suggestion = Some(match self.suggestion {
      Some(i) if i + 1 < available => i + 1,
      Some(i) => i,
      None => 0,
    });
  }

  pub fn suggestion_up(&mut self) {
    self.suggestion = match self.suggestion {
      Some(0) | None => None,
      Some(i) => Some(i - 1),
    };
  }

  /// Replace the focused input with `name` and move on.
  pub fn accept(&mut self, name: &str) {
    let field = self.focus();
    *self.value_mut(field) = name.to_string();
    self.focus_next();
  }

  // ── Submission ────────────────────────────────────────────────────────────

  pub fn to_new_entry(&self) -> NewEntry {
    NewEntry {
      subject:  self.subject.clone(),
      category: self.category.clone(),
      item:     self.item.clone(),
      remark:   Some(self.remark.clone()),
    }
  }
}
