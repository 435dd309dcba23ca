//! Error type for `tricks-store-sqlite`.

use thiserror::Error;
use tricks_core::validate::ValidationError;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] tricks_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),
}

impl From<ValidationError> for Error {
  fn from(e: ValidationError) -> Self { Self::Core(e.into()) }
}

impl Error {
  /// The validation failure behind this error, if that is what it is.
  pub fn as_validation(&self) -> Option<&ValidationError> {
    match self {
      Self::Core(tricks_core::Error::Validation(v)) => Some(v),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
