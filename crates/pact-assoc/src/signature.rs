//! HMAC signing and verification of protocol messages.
//!
//! A message declares which of its fields are covered by the signature in a
//! comma-separated `signed` list; the signature itself travels in `sig` as
//! base64. The association's type picks the HMAC hash function.

use crate::association::{AssocType, Association};
use crate::{Error, Result};
use hmac::{Hmac, Mac};
use pact_core::message::PROTOCOL_NS;
use pact_core::{kvform, Message};
use sha1::Sha1;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// Message field naming the signed fields, in order.
pub const SIGNED_FIELD: &str = "signed";

/// Message field carrying the base64 signature.
pub const SIG_FIELD: &str = "sig";

impl Association {
    /// Extract the ordered (field, value) pairs covered by the signature.
    ///
    /// The order is exactly the order of the `signed` list, empty entries
    /// included. A field listed in `signed` but absent from the message
    /// contributes an empty value rather than an error.
    pub fn make_pairs(&self, message: &Message) -> Result<Vec<(String, String)>> {
        let signed = message
            .get_arg(PROTOCOL_NS, SIGNED_FIELD)
            .ok_or_else(|| Error::MissingField(SIGNED_FIELD.to_string()))?;

        let pairs = signed
            .split(',')
            .map(|field| {
                let value = message.get_arg(PROTOCOL_NS, field).unwrap_or("");
                (field.to_string(), value.to_string())
            })
            .collect();

        Ok(pairs)
    }

    /// HMAC the kvform encoding of `pairs` with this association's secret.
    ///
    /// Returns the raw digest: 20 bytes for HMAC-SHA1, 32 for HMAC-SHA256.
    pub fn sign(&self, pairs: &[(String, String)]) -> Result<Vec<u8>> {
        let data = kvform::encode(pairs, false)?;

        let digest = match self.assoc_type() {
            AssocType::HmacSha1 => {
                let mut mac = HmacSha1::new_from_slice(self.secret())
                    .expect("HMAC can take key of any size");
                mac.update(&data);
                mac.finalize().into_bytes().to_vec()
            }
            AssocType::HmacSha256 => {
                let mut mac = HmacSha256::new_from_slice(self.secret())
                    .expect("HMAC can take key of any size");
                mac.update(&data);
                mac.finalize().into_bytes().to_vec()
            }
        };

        Ok(digest)
    }

    /// Compute the raw signature over a message's signed fields.
    pub fn get_message_signature(&self, message: &Message) -> Result<Vec<u8>> {
        let pairs = self.make_pairs(message)?;
        self.sign(&pairs)
    }

    /// Return a copy of `message` with its `sig` field set.
    pub fn sign_message(&self, message: &Message) -> Result<Message> {
        let digest = self.get_message_signature(message)?;
        let sig_b64 =
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, digest);

        let mut signed = message.clone();
        signed.set_arg(PROTOCOL_NS, SIG_FIELD, sig_b64);
        Ok(signed)
    }

    /// Verify a message's `sig` field against its signed fields.
    ///
    /// The comparison is constant-time.
    pub fn check_message_signature(&self, message: &Message) -> Result<bool> {
        let sig = message
            .get_arg(PROTOCOL_NS, SIG_FIELD)
            .ok_or_else(|| Error::MissingField(SIG_FIELD.to_string()))?;

        let supplied =
            base64::Engine::decode(&base64::engine::general_purpose::STANDARD, sig)?;
        let expected = self.get_message_signature(message)?;

        Ok(expected.ct_eq(&supplied).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assoc(assoc_type: AssocType) -> Association {
        Association::new("h1", b"0123456789".to_vec(), 1_700_000_000, 3600, assoc_type)
    }

    fn sample_message() -> Message {
        Message::new()
            .with_arg(PROTOCOL_NS, "signed", "mode,handle,return_to")
            .with_arg(PROTOCOL_NS, "mode", "id_res")
            .with_arg(PROTOCOL_NS, "handle", "h1")
            .with_arg(PROTOCOL_NS, "return_to", "https://example.com/return")
    }

    #[test]
    fn test_make_pairs_preserves_signed_order() {
        let pairs = assoc(AssocType::HmacSha1)
            .make_pairs(&sample_message())
            .unwrap();

        let keys: Vec<&str> = pairs.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["mode", "handle", "return_to"]);
    }

    #[test]
    fn test_make_pairs_substitutes_empty_for_absent_field() {
        let message = Message::new()
            .with_arg(PROTOCOL_NS, "signed", "a,b")
            .with_arg(PROTOCOL_NS, "a", "1");

        let pairs = assoc(AssocType::HmacSha1).make_pairs(&message).unwrap();
        assert_eq!(
            pairs,
            vec![("a".to_string(), "1".to_string()), ("b".to_string(), String::new())]
        );
    }

    #[test]
    fn test_make_pairs_preserves_empty_entries() {
        let message = Message::new().with_arg(PROTOCOL_NS, "signed", "a,,b");
        let pairs = assoc(AssocType::HmacSha1).make_pairs(&message).unwrap();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[1].0, "");
    }

    #[test]
    fn test_make_pairs_requires_signed_field() {
        let message = Message::new().with_arg(PROTOCOL_NS, "mode", "id_res");
        let result = assoc(AssocType::HmacSha1).make_pairs(&message);
        assert!(matches!(result, Err(Error::MissingField(f)) if f == "signed"));
    }

    #[test]
    fn test_signature_lengths() {
        let message = sample_message();
        let sha1_sig = assoc(AssocType::HmacSha1)
            .get_message_signature(&message)
            .unwrap();
        let sha256_sig = assoc(AssocType::HmacSha256)
            .get_message_signature(&message)
            .unwrap();

        assert_eq!(sha1_sig.len(), 20);
        assert_eq!(sha256_sig.len(), 32);
    }

    #[test]
    fn test_sign_and_check_roundtrip() {
        let a = assoc(AssocType::HmacSha256);
        let signed = a.sign_message(&sample_message()).unwrap();
        assert!(a.check_message_signature(&signed).unwrap());
    }

    #[test]
    fn test_check_rejects_tampered_field() {
        let a = assoc(AssocType::HmacSha256);
        let mut signed = a.sign_message(&sample_message()).unwrap();
        signed.set_arg(PROTOCOL_NS, "mode", "cancel");

        assert!(!a.check_message_signature(&signed).unwrap());
    }

    #[test]
    fn test_check_rejects_wrong_secret() {
        let a = assoc(AssocType::HmacSha256);
        let signed = a.sign_message(&sample_message()).unwrap();

        let other = Association::new(
            "h1",
            b"different secret".to_vec(),
            1_700_000_000,
            3600,
            AssocType::HmacSha256,
        );
        assert!(!other.check_message_signature(&signed).unwrap());
    }

    #[test]
    fn test_check_rejects_mutated_signature() {
        let a = assoc(AssocType::HmacSha1);
        let signed = a.sign_message(&sample_message()).unwrap();

        let mut digest = a.get_message_signature(&signed).unwrap();
        digest[0] ^= 0x01;
        let mut tampered = signed.clone();
        tampered.set_arg(
            PROTOCOL_NS,
            SIG_FIELD,
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, digest),
        );

        assert!(!a.check_message_signature(&tampered).unwrap());
    }

    #[test]
    fn test_check_requires_sig_field() {
        let a = assoc(AssocType::HmacSha1);
        let result = a.check_message_signature(&sample_message());
        assert!(matches!(result, Err(Error::MissingField(f)) if f == "sig"));
    }
}
