//! Client-side text filter over the full list of entries.
//!
//! The store never filters; callers fetch every row and narrow it here.

use crate::entry::EntryView;

/// A parsed search string. Every whitespace-separated term must appear
/// (case-insensitively) in at least one of subject, category, item, or remark.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
  terms: Vec<String>,
}

impl EntryFilter {
  pub fn parse(text: &str) -> Self {
    Self {
      terms: text.split_whitespace().map(str::to_lowercase).collect(),
    }
  }

  pub fn is_empty(&self) -> bool { self.terms.is_empty() }

  pub fn matches(&self, entry: &EntryView) -> bool {
    if self.terms.is_empty() {
      return true;
    }
    let haystack = [
      entry.subject.as_str(),
      entry.category.as_str(),
      entry.item.as_str(),
      entry.remark.as_str(),
    ]
    .map(str::to_lowercase);
    self
      .terms
      .iter()
      .all(|t| haystack.iter().any(|field| field.contains(t.as_str())))
  }

  /// The entries that match, in their original order.
  pub fn apply<'a>(&self, entries: &'a [EntryView]) -> Vec<&'a EntryView> {
    entries.iter().filter(|e| self.matches(e)).collect()
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;

  fn view(id: i64, subject: &str, category: &str, item: &str, remark: &str) -> EntryView {
    EntryView {
      id,
      subject: subject.into(),
      category: category.into(),
      item: item.into(),
      remark: remark.into(),
      created_at: Utc::now(),
    }
  }

  #[test]
  fn empty_filter_keeps_everything() {
    let rows = vec![view(1, "Rust", "Errors", "use ?", "")];
    assert_eq!(EntryFilter::parse("   ").apply(&rows).len(), 1);
  }

  #[test]
  fn matches_any_field_case_insensitively() {
    let rows = vec![
      view(1, "JavaScript", "Arrays", "Use flatMap", ""),
      view(2, "Python", "Strings", "f-strings", "needs 3.6"),
    ];
    let hits = EntryFilter::parse("FLATMAP").apply(&rows);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, 1);

    let hits = EntryFilter::parse("3.6").apply(&rows);
    assert_eq!(hits[0].id, 2);
  }

  #[test]
  fn all_terms_must_match() {
    let rows = vec![
      view(1, "JavaScript", "Arrays", "Use flatMap", ""),
      view(2, "JavaScript", "Strings", "padStart", ""),
    ];
    let hits = EntryFilter::parse("javascript strings").apply(&rows);
    assert_eq!(hits.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2]);
  }
}
