//! Error types for pact-core.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("value cannot be represented in key-value form: {0}")]
    Encoding(String),

    #[error("malformed key-value form: {0}")]
    Format(String),
}
