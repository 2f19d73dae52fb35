//! Selector validation for mandatory filters

use std::str::FromStr;

use crate::field_model::{InclusionSelector, SelectorKind, TIME_SELECTORS};
use super::error::ValidationError;

/// Check `candidate` against the selector vocabulary of `kind`.
///
/// Matching is case-insensitive; the candidate is returned as given.
pub fn validate_selector<'a>(kind: SelectorKind, candidate: &'a str) -> Result<&'a str, ValidationError> {
    let valid = match kind {
        SelectorKind::Time => {
            let upper = candidate.trim().to_uppercase();
            TIME_SELECTORS.contains(&upper.as_str())
        }
        SelectorKind::Inclusion => InclusionSelector::from_str(candidate).is_ok(),
    };

    if valid {
        Ok(candidate)
    } else {
        Err(ValidationError::InvalidSelector {
            kind,
            selector: candidate.to_string(),
        })
    }
}

/// Validate a whole selector list, failing on the first invalid entry
pub fn validate_selectors<S: AsRef<str>>(
    kind: SelectorKind,
    candidates: &[S],
) -> Result<Vec<String>, ValidationError> {
    candidates
        .iter()
        .map(|c| validate_selector(kind, c.as_ref()).map(str::to_string))
        .collect()
}
