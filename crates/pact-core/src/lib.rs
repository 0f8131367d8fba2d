//! # pact-core
//!
//! Collaborator primitives for the PACT association protocol.
//!
//! This crate provides:
//! - The `key:value` line-oriented wire codec (kvform)
//! - Namespace-scoped protocol messages

pub mod error;
pub mod kvform;
pub mod message;

pub use error::Error;
pub use message::Message;

/// Result type for pact-core operations.
pub type Result<T> = std::result::Result<T, Error>;
