//! # PACT
//!
//! Shared-secret associations for an authentication handshake protocol.
//!
//! ## Quick Start
//!
//! ```rust
//! use pact::{Association, AssocType};
//!
//! // Establish a signing context valid for an hour
//! let assoc = Association::generate("handle-1", 3600, AssocType::HmacSha256);
//! let wire = assoc.serialize().unwrap();
//! assert_eq!(Association::deserialize(&wire).unwrap(), assoc);
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Wire codec and message primitives
//! - [`assoc`] - Associations, signing, and capability negotiation
//!
//! ## Re-exports
//!
//! Common types are re-exported at the crate root for convenience.

pub use pact_assoc as assoc;
pub use pact_core as core;

// Re-export common types at root
pub use pact_assoc::{AssocType, Association, Error, Negotiator, Result, SessionType};
pub use pact_core::message::PROTOCOL_NS;
pub use pact_core::Message;
