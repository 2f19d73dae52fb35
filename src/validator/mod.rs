//! Validator module
//!
//! Checks mandatory-filter selectors against the vocabulary of their filter kind.

mod error;
mod validate;

pub use error::ValidationError;
pub use validate::{validate_selector, validate_selectors};
