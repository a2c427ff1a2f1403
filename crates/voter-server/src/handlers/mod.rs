//! HTTP handlers

pub mod error;
pub mod health;
pub mod polls;
pub mod voters;

pub use error::ApiError;
pub use health::health;

use serde::Serialize;

/// Confirmation payload returned by mutating endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
