//! Error types for the association core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("association wire form does not match the schema: {0}")]
    Format(String),

    #[error("unsupported association wire version: {0}")]
    Version(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("unsupported association type: {0}")]
    UnsupportedAlgorithm(String),

    #[error("unknown session type: {0}")]
    UnknownSessionType(String),

    #[error("session type {session} is not valid for {assoc}")]
    InvalidCapability { assoc: String, session: String },

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("codec error: {0}")]
    Codec(#[from] pact_core::Error),
}
