//! Voter Core Library
//!
//! Domain errors, key derivation, identifier validation and the storage
//! port used by the voter record store.

// Re-export pure types from voter-types
pub use voter_types::*;

pub mod error;
pub mod keys;
pub mod ports;
pub mod validation;

pub use error::{ErrorKind, Result, VoterError};
pub use keys::{parse_voter_key, voter_key, voter_key_pattern, VOTER_KEY_PREFIX};
pub use ports::DocumentStore;
pub use validation::parse_id;
