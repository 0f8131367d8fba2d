//! Capability negotiation over (association type, session type) pairs.
//!
//! Before an association exists, the two parties agree on a signing
//! algorithm and a key-establishment method from a fixed table of valid
//! combinations. The negotiator holds the pairs a party will accept, in
//! preference order.

use crate::association::AssocType;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Key-establishment method used to transmit the shared secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionType {
    DhSha1,
    DhSha256,
    NoEncryption,
}

impl SessionType {
    /// The wire tag for this session type.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DhSha1 => "DH-SHA1",
            Self::DhSha256 => "DH-SHA256",
            Self::NoEncryption => "no-encryption",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "DH-SHA1" => Ok(Self::DhSha1),
            "DH-SHA256" => Ok(Self::DhSha256),
            "no-encryption" => Ok(Self::NoEncryption),
            other => Err(Error::UnknownSessionType(other.to_string())),
        }
    }
}

impl AssocType {
    /// The session types valid for this association type.
    pub const fn session_types(self) -> &'static [SessionType] {
        match self {
            Self::HmacSha1 => &[SessionType::DhSha1, SessionType::NoEncryption],
            Self::HmacSha256 => &[SessionType::DhSha256, SessionType::NoEncryption],
        }
    }
}

/// Fail unless `session_type` is valid for `assoc_type`.
pub fn check_session_type(assoc_type: AssocType, session_type: SessionType) -> Result<()> {
    if assoc_type.session_types().contains(&session_type) {
        Ok(())
    } else {
        Err(Error::InvalidCapability {
            assoc: assoc_type.to_string(),
            session: session_type.to_string(),
        })
    }
}

/// The (association type, session type) pairs a party will accept.
///
/// Order is preference order and duplicates are kept as given; cloning
/// yields an independent catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Negotiator {
    allowed: Vec<(AssocType, SessionType)>,
}

impl Negotiator {
    /// Build a negotiator from explicit pairs.
    ///
    /// Every pair is validated first; one invalid pair rejects the whole
    /// input.
    pub fn new(allowed: &[(AssocType, SessionType)]) -> Result<Self> {
        let mut negotiator = Self {
            allowed: Vec::new(),
        };
        negotiator.set_allowed(allowed)?;
        Ok(negotiator)
    }

    /// An empty negotiator accepting nothing.
    pub fn empty() -> Self {
        Self {
            allowed: Vec::new(),
        }
    }

    /// Both HMAC types, each with its DH session type and no-encryption.
    pub fn default_catalog() -> Self {
        Self {
            allowed: vec![
                (AssocType::HmacSha1, SessionType::DhSha1),
                (AssocType::HmacSha1, SessionType::NoEncryption),
                (AssocType::HmacSha256, SessionType::DhSha256),
                (AssocType::HmacSha256, SessionType::NoEncryption),
            ],
        }
    }

    /// Both HMAC types, DH session types only.
    pub fn encrypted() -> Self {
        Self {
            allowed: vec![
                (AssocType::HmacSha1, SessionType::DhSha1),
                (AssocType::HmacSha256, SessionType::DhSha256),
            ],
        }
    }

    /// Replace the allowed pairs, all-or-nothing.
    ///
    /// On error the existing pairs are left untouched.
    pub fn set_allowed(&mut self, allowed: &[(AssocType, SessionType)]) -> Result<()> {
        for &(assoc_type, session_type) in allowed {
            check_session_type(assoc_type, session_type)?;
        }
        self.allowed = allowed.to_vec();
        Ok(())
    }

    /// Append one pair, or every valid session type for `assoc_type` when
    /// `session_type` is `None`. Appending does not deduplicate.
    pub fn add_allowed_type(
        &mut self,
        assoc_type: AssocType,
        session_type: Option<SessionType>,
    ) -> Result<()> {
        match session_type {
            Some(session_type) => {
                check_session_type(assoc_type, session_type)?;
                self.allowed.push((assoc_type, session_type));
            }
            None => {
                for &session_type in assoc_type.session_types() {
                    self.allowed.push((assoc_type, session_type));
                }
            }
        }
        Ok(())
    }

    /// Whether the exact pair is present.
    pub fn is_allowed(&self, assoc_type: AssocType, session_type: SessionType) -> bool {
        self.allowed.contains(&(assoc_type, session_type))
    }

    /// The first pair in preference order, or `None` when empty.
    pub fn first_allowed(&self) -> Option<(AssocType, SessionType)> {
        self.allowed.first().copied()
    }

    /// The allowed pairs in preference order.
    pub fn allowed(&self) -> &[(AssocType, SessionType)] {
        &self.allowed
    }
}

impl Default for Negotiator {
    fn default() -> Self {
        Self::default_catalog()
    }
}
