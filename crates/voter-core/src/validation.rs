//! Identifier validation for values arriving as text

use crate::error::{Result, VoterError};

/// Parse a path identifier as an unsigned 32-bit integer.
///
/// Only plain ASCII digits are accepted: no sign, no whitespace.
pub fn parse_id(field: &'static str, raw: &str) -> Result<u32> {
    let invalid = || VoterError::InvalidId {
        field,
        value: raw.to_string(),
    };

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<u32>().map_err(|_| invalid())
}
