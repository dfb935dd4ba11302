//! Parsing of the `--extras "k1:v1, k2:v2"` option.

use std::collections::BTreeMap;

use tracing::error;

use crate::domain::errors::{CurriculumError, CurriculumResult};

/// Parse `k1:v1, k2:v2` into a map. Whitespace is ignored and an empty
/// string yields an empty map.
pub fn parse_extra_args(args: &str) -> CurriculumResult<BTreeMap<String, String>> {
    let mut extras = BTreeMap::new();
    if args.is_empty() {
        return Ok(extras);
    }

    for candidate in args.split(',') {
        let token: String = candidate.chars().filter(|c| !c.is_whitespace()).collect();
        let mut parts = token.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) => {
                extras.insert(key.to_string(), value.to_string());
            }
            _ => {
                error!(
                    "Invalid extra argument: {token}. Parameters must be in the form of 'k1:v1, k2:v2'"
                );
                return Err(CurriculumError::InvalidArgument(token));
            }
        }
    }
    Ok(extras)
}
