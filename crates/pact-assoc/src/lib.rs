//! # pact-assoc
//!
//! Shared-secret association core for the PACT handshake protocol.
//!
//! This crate provides:
//! - The [`Association`] entity with its versioned wire form
//! - HMAC signing and verification of protocol messages
//! - Capability negotiation over (association type, session type) pairs

pub mod association;
pub mod error;
pub mod negotiation;
pub mod signature;

pub use association::{AssocType, Association};
pub use error::Error;
pub use negotiation::{Negotiator, SessionType};

/// Result type for pact-assoc operations.
pub type Result<T> = std::result::Result<T, Error>;
