//! # Hashing Utilities
//!
//! The ledger hashes everything with SHA-512/256: address checksums,
//! transaction ids, multisig address derivation. SHA-512/256 is SHA-512
//! with a distinct IV, truncated to 32 bytes; it is faster than SHA-256 on
//! 64-bit hardware and immune to length extension.
//!
//! Anything hashed for identity purposes is domain separated with a short
//! ASCII prefix (`"TX"`, `"MultisigAddr"`) so that bytes valid in one
//! context can never collide with another.

use sha2::{Digest as _, Sha512_256};

use crate::config::{ADDRESS_CHECKSUM_LENGTH, DIGEST_LENGTH};

/// Compute the SHA-512/256 hash of the input data.
///
/// # Example
///
/// ```
/// use algotx::crypto::sha512_256;
///
/// let hash = sha512_256(b"algotx");
/// assert_eq!(hash.len(), 32);
/// ```
pub fn sha512_256(data: &[u8]) -> [u8; DIGEST_LENGTH] {
    let mut hasher = Sha512_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute SHA-512/256 over `prefix || data` without concatenating into a
/// temporary buffer.
pub fn sha512_256_with_prefix(prefix: &[u8], data: &[u8]) -> [u8; DIGEST_LENGTH] {
    let mut hasher = Sha512_256::new();
    hasher.update(prefix);
    hasher.update(data);
    hasher.finalize().into()
}

/// The address checksum: the trailing four bytes of SHA-512/256(key).
pub fn checksum(key: &[u8]) -> [u8; ADDRESS_CHECKSUM_LENGTH] {
    let hash = sha512_256(key);
    let mut out = [0u8; ADDRESS_CHECKSUM_LENGTH];
    out.copy_from_slice(&hash[DIGEST_LENGTH - ADDRESS_CHECKSUM_LENGTH..]);
    out
}
