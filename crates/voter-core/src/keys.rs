//! Store key derivation
//!
//! Every voter lives under `voter:<id>`. Listing enumerates the prefix.

use crate::VoterId;

/// Namespace prefix shared by all voter documents
pub const VOTER_KEY_PREFIX: &str = "voter:";

pub fn voter_key(id: VoterId) -> String {
    format!("{}{}", VOTER_KEY_PREFIX, id)
}

/// Glob pattern matching every voter key
pub fn voter_key_pattern() -> String {
    format!("{}*", VOTER_KEY_PREFIX)
}

/// Inverse of [`voter_key`]; `None` for keys outside the namespace
pub fn parse_voter_key(key: &str) -> Option<VoterId> {
    key.strip_prefix(VOTER_KEY_PREFIX)?.parse().ok()
}
