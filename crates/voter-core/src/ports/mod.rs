//! Port traits (interfaces) for dependency injection

pub mod document;

pub use document::DocumentStore;
