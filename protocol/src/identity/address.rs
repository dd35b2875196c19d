//! # Account Addresses
//!
//! An address is the human-facing form of an account's Ed25519 public key:
//!
//! ```text
//! public_key (32 bytes)
//!     -> checksum = SHA-512/256(public_key)[28..32]
//!     -> base32(public_key || checksum), unpadded -> 58 characters
//! ```
//!
//! The checksum catches typos when users paste addresses into payment
//! forms. Decoding recomputes it and refuses anything that does not match.
//!
//! The all-zero address is the protocol's "nobody": optional address fields
//! holding it are omitted from the canonical encoding.

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{ADDRESS_CHECKSUM_LENGTH, PUBLIC_KEY_LENGTH};
use crate::crypto::hash::checksum;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur while decoding a text address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The input string was empty. Distinct from malformed input so that
    /// callers can tell "not supplied" from "supplied wrong".
    #[error("address is empty")]
    Empty,

    /// The input is not valid unpadded base32.
    #[error("base32 decode error: {0}")]
    Base32(String),

    /// The decoded payload has an unexpected length.
    #[error("invalid address data length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// Expected number of bytes (key plus checksum).
        expected: usize,
        /// Actual number of bytes.
        got: usize,
    },

    /// The embedded checksum does not match the key bytes.
    #[error("address checksum mismatch")]
    ChecksumMismatch,
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 32-byte account identifier.
///
/// # Examples
///
/// ```
/// use algotx::identity::Address;
///
/// let addr = Address::from_public_key([9u8; 32]);
/// let text = addr.to_string();
/// assert_eq!(text.len(), 58);
/// assert_eq!(text.parse::<Address>().unwrap(), addr);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; PUBLIC_KEY_LENGTH]);

impl Address {
    /// The zero address, meaning "no account".
    pub const ZERO: Address = Address([0u8; PUBLIC_KEY_LENGTH]);

    /// Wrap raw public key bytes.
    pub const fn from_public_key(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Decode a checksummed text address.
    ///
    /// Fails with [`AddressError::Empty`] on an empty string, and otherwise
    /// validates the base32 alphabet, the decoded length and the checksum.
    pub fn from_string(text: &str) -> Result<Self, AddressError> {
        if text.is_empty() {
            return Err(AddressError::Empty);
        }

        let decoded = BASE32_NOPAD
            .decode(text.as_bytes())
            .map_err(|e| AddressError::Base32(e.to_string()))?;

        let expected = PUBLIC_KEY_LENGTH + ADDRESS_CHECKSUM_LENGTH;
        if decoded.len() != expected {
            return Err(AddressError::InvalidLength {
                expected,
                got: decoded.len(),
            });
        }

        let (key, sum) = decoded.split_at(PUBLIC_KEY_LENGTH);
        if checksum(key) != sum {
            return Err(AddressError::ChecksumMismatch);
        }

        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        bytes.copy_from_slice(key);
        Ok(Self(bytes))
    }

    /// Encode as the 58-character checksummed text form.
    pub fn encode(&self) -> String {
        let mut payload = Vec::with_capacity(PUBLIC_KEY_LENGTH + ADDRESS_CHECKSUM_LENGTH);
        payload.extend_from_slice(&self.0);
        payload.extend_from_slice(&checksum(&self.0));
        BASE32_NOPAD.encode(&payload)
    }

    /// The raw public key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Returns `true` for the zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; PUBLIC_KEY_LENGTH]
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.encode())
    }
}

impl Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.encode())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Address::from_string(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <Vec<u8>>::deserialize(deserializer)?;
            let key: [u8; PUBLIC_KEY_LENGTH] = bytes.as_slice().try_into().map_err(|_| {
                serde::de::Error::custom(format!(
                    "expected {}-byte public key, got {}",
                    PUBLIC_KEY_LENGTH,
                    bytes.len()
                ))
            })?;
            Ok(Address(key))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;

    #[test]
    fn address_roundtrip() {
        let kp = Keypair::generate();
        let addr = kp.address();
        let recovered = Address::from_string(&addr.encode()).unwrap();
        assert_eq!(addr, recovered);
    }

    #[test]
    fn address_text_is_58_uppercase_chars() {
        let addr = Address::from_public_key([0xAB; 32]);
        let text = addr.encode();
        assert_eq!(text.len(), 58);
        assert!(text
            .chars()
            .all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c)));
    }

    #[test]
    fn zero_address_roundtrips() {
        let text = Address::ZERO.encode();
        assert_eq!(text, "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAY5HFKQ");
        let recovered = Address::from_string(&text).unwrap();
        assert!(recovered.is_zero());
    }

    #[test]
    fn empty_string_is_distinct_error() {
        assert_eq!(Address::from_string(""), Err(AddressError::Empty));
    }

    #[test]
    fn altered_checksum_rejected() {
        // Recompute the base32 with one checksum byte flipped so the
        // alphabet and length stay valid and only the checksum is wrong.
        let key = [0x11u8; 32];
        let mut payload = key.to_vec();
        let mut sum = checksum(&key);
        sum[0] ^= 0x01;
        payload.extend_from_slice(&sum);
        let text = BASE32_NOPAD.encode(&payload);
        assert_eq!(
            Address::from_string(&text),
            Err(AddressError::ChecksumMismatch)
        );
    }

    #[test]
    fn altered_key_byte_rejected() {
        let addr = Address::from_public_key([0x42; 32]);
        let mut text = addr.encode().into_bytes();
        text[3] = if text[3] == b'A' { b'B' } else { b'A' };
        let text = String::from_utf8(text).unwrap();
        assert!(Address::from_string(&text).is_err());
    }

    #[test]
    fn wrong_length_rejected() {
        let text = BASE32_NOPAD.encode(&[0u8; 40]);
        assert!(matches!(
            Address::from_string(&text),
            Err(AddressError::InvalidLength {
                expected: 36,
                got: 40
            })
        ));
    }

    #[test]
    fn lowercase_rejected() {
        let text = Address::from_public_key([3u8; 32]).encode().to_lowercase();
        assert!(matches!(
            Address::from_string(&text),
            Err(AddressError::Base32(_))
        ));
    }

    #[test]
    fn address_serde_json_roundtrip() {
        let addr = Keypair::generate().address();
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, format!("\"{}\"", addr));
        let recovered: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(addr, recovered);
    }

    #[test]
    fn from_str_matches_from_string() {
        let addr = Address::from_public_key([5u8; 32]);
        assert_eq!(addr.to_string().parse::<Address>().unwrap(), addr);
    }
}
