//! Core types and trait definitions for TricksVault.
//!
//! Entries, their subject/category references, the validator, and the
//! [`store::TricksStore`] trait. No HTTP or database code lives here.

pub mod entry;
pub mod error;
pub mod filter;
pub mod reference;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
