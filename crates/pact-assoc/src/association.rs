//! Shared-secret associations and their versioned wire form.
//!
//! Wire format (field order is fixed, kvform strict encoding):
//!
//! ```text
//! version:2
//! handle:<opaque string>
//! secret:<base64 of raw secret bytes>
//! issued:<decimal integer, epoch seconds>
//! lifetime:<decimal integer, seconds>
//! assoc_type:<HMAC-SHA1 | HMAC-SHA256>
//! ```

use crate::{Error, Result};
use chrono::{DateTime, Utc};
use pact_core::kvform;
use std::fmt;
use std::str::FromStr;

/// The current association wire-format version.
pub const WIRE_VERSION: &str = "2";

/// Exact field sequence of the wire form.
const FIELD_ORDER: [&str; 6] = [
    "version",
    "handle",
    "secret",
    "issued",
    "lifetime",
    "assoc_type",
];

/// Signing algorithm for an association.
///
/// Closed set: the tag picks the HMAC hash function for every signing
/// operation on the association and never changes after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssocType {
    HmacSha1,
    HmacSha256,
}

impl AssocType {
    /// The wire tag for this algorithm.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HmacSha1 => "HMAC-SHA1",
            Self::HmacSha256 => "HMAC-SHA256",
        }
    }

    /// Digest (and recommended secret) length in bytes.
    pub const fn digest_len(self) -> usize {
        match self {
            Self::HmacSha1 => 20,
            Self::HmacSha256 => 32,
        }
    }
}

impl fmt::Display for AssocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssocType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "HMAC-SHA1" => Ok(Self::HmacSha1),
            "HMAC-SHA256" => Ok(Self::HmacSha256),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// A shared-secret signing context between two parties.
///
/// Immutable once constructed; renewing or re-keying means constructing a
/// new association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Association {
    handle: String,
    secret: Vec<u8>,
    issued: i64,
    lifetime: i64,
    assoc_type: AssocType,
}

impl Association {
    /// Create an association from explicit fields.
    ///
    /// `issued` is epoch seconds; `lifetime` is seconds from `issued`.
    pub fn new(
        handle: impl Into<String>,
        secret: Vec<u8>,
        issued: i64,
        lifetime: i64,
        assoc_type: AssocType,
    ) -> Self {
        Self {
            handle: handle.into(),
            secret,
            issued,
            lifetime,
            assoc_type,
        }
    }

    /// Create an association issued now, valid for `lifetime` seconds.
    pub fn from_expires_in(
        lifetime: i64,
        handle: impl Into<String>,
        secret: Vec<u8>,
        assoc_type: AssocType,
    ) -> Self {
        Self::new(handle, secret, Utc::now().timestamp(), lifetime, assoc_type)
    }

    /// Create an association issued now with a fresh random secret sized to
    /// the algorithm's digest length.
    pub fn generate(handle: impl Into<String>, lifetime: i64, assoc_type: AssocType) -> Self {
        let mut secret = vec![0u8; assoc_type.digest_len()];
        getrandom::fill(&mut secret).expect("Failed to generate random secret");
        Self::from_expires_in(lifetime, handle, secret, assoc_type)
    }

    /// Opaque identifier chosen by the issuing party.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    /// Raw shared secret bytes.
    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Creation time, epoch seconds.
    pub fn issued(&self) -> i64 {
        self.issued
    }

    /// Validity window in seconds from `issued`.
    pub fn lifetime(&self) -> i64 {
        self.lifetime
    }

    /// Signing algorithm for this association.
    pub fn assoc_type(&self) -> AssocType {
        self.assoc_type
    }

    /// Seconds until expiry; negative once expired.
    pub fn expires_in(&self) -> i64 {
        self.expires_in_at(Utc::now())
    }

    /// Seconds until expiry relative to `now`.
    pub fn expires_in_at(&self, now: DateTime<Utc>) -> i64 {
        self.issued + self.lifetime - now.timestamp()
    }

    /// Serialize to the versioned wire form.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        let secret_b64 =
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &self.secret);

        let pairs = vec![
            ("version".to_string(), WIRE_VERSION.to_string()),
            ("handle".to_string(), self.handle.clone()),
            ("secret".to_string(), secret_b64),
            ("issued".to_string(), self.issued.to_string()),
            ("lifetime".to_string(), self.lifetime.to_string()),
            ("assoc_type".to_string(), self.assoc_type.to_string()),
        ];

        Ok(kvform::encode(&pairs, true)?)
    }

    /// Reconstruct an association from its wire form.
    ///
    /// The decoded key sequence must match the canonical schema exactly and
    /// in order; extra, missing, or reordered fields are rejected.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        let pairs = kvform::decode(bytes)?;

        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        if keys != FIELD_ORDER {
            return Err(Error::Format(format!(
                "expected fields {FIELD_ORDER:?}, got {keys:?}"
            )));
        }

        let version = pairs[0].1.as_str();
        if version != WIRE_VERSION {
            return Err(Error::Version(version.to_string()));
        }

        let secret =
            base64::Engine::decode(&base64::engine::general_purpose::STANDARD, &pairs[2].1)?;
        let issued = parse_seconds("issued", &pairs[3].1)?;
        let lifetime = parse_seconds("lifetime", &pairs[4].1)?;
        let assoc_type = pairs[5].1.parse()?;

        Ok(Self::new(
            pairs[1].1.clone(),
            secret,
            issued,
            lifetime,
            assoc_type,
        ))
    }
}

/// Parse a decimal seconds field, failing fast on malformed text.
fn parse_seconds(field: &str, value: &str) -> Result<i64> {
    value
        .parse()
        .map_err(|_| Error::Format(format!("field {field} is not an integer: {value:?}")))
}
