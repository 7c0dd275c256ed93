//! Parsing of the raw text the user typed into the console inputs.

use crate::console::error::ValidationError;
use crate::entities::{DistributionName, InvalidationId, StringIdentifierError};
use std::str::FromStr;

const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Removes one layer of surrounding double quotes.
///
/// Only a single-line value wrapped in a matching pair is unquoted; anything else is
/// returned unchanged.
pub fn strip_surrounding_quotes(s: &str) -> &str {
    match s.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
        Some(inner) if !inner.contains(&LINE_TERMINATORS[..]) => inner,
        _ => s,
    }
}

/// Splits comma-separated paths, trimming and unquoting every entry.
///
/// Empty entries are dropped. Input without any path is rejected.
pub fn parse_paths(raw: &str) -> Result<Vec<String>, ValidationError> {
    let paths = raw
        .split(',')
        .map(|item| strip_surrounding_quotes(item.trim()))
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect::<Vec<_>>();

    if paths.is_empty() {
        return Err(ValidationError::EmptyPaths);
    }

    Ok(paths)
}

pub fn parse_invalidation_id(raw: &str) -> Result<InvalidationId, ValidationError> {
    let id = strip_surrounding_quotes(raw.trim());

    InvalidationId::from_str(id).map_err(|e| match e {
        StringIdentifierError::Empty => ValidationError::EmptyInvalidationId,
        e => ValidationError::BadInvalidationId(e),
    })
}

pub fn parse_distribution(raw: &str) -> Result<DistributionName, ValidationError> {
    DistributionName::from_str(raw.trim()).map_err(|e| match e {
        StringIdentifierError::Empty => ValidationError::EmptyDistribution,
        e => ValidationError::BadDistribution(e),
    })
}
