//! Field checks applied to every [`NewEntry`] before anything is written.

use strum::Display;
use thiserror::Error;

use crate::entry::NewEntry;

/// A required field of an entry, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EntryField {
  Subject,
  Category,
  Item,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("{0} is required")]
  Required(EntryField),
}

impl ValidationError {
  /// The first field that failed.
  pub fn field(&self) -> EntryField {
    match self {
      Self::Required(f) => *f,
    }
  }
}

/// Check that subject, category, and item are non-blank.
///
/// Stops at the first failing field. The remark is optional and may be empty.
pub fn validate(input: &NewEntry) -> Result<(), ValidationError> {
  let required = [
    (EntryField::Subject, &input.subject),
    (EntryField::Category, &input.category),
    (EntryField::Item, &input.item),
  ];
  match required.into_iter().find(|(_, v)| v.trim().is_empty()) {
    Some((field, _)) => Err(ValidationError::Required(field)),
    None => Ok(()),
  }
}
