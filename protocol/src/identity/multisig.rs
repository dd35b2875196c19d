//! Multisig account preimages.
//!
//! A multisig account is identified by an address derived from its full
//! preimage (version, threshold, ordered public keys). The ordering of
//! keys is significant: the same keys in a different order are a different
//! account.

use thiserror::Error;

use super::address::Address;
use crate::config::{MULTISIG_ADDR_PREFIX, MULTISIG_VERSION};
use crate::crypto::hash::sha512_256_with_prefix;

/// Errors raised while constructing a multisig preimage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MultisigError {
    #[error("unsupported multisig version {0}")]
    UnsupportedVersion(u8),

    #[error("multisig account needs at least one public key")]
    NoPublicKeys,

    #[error("invalid threshold {threshold} for {keys} public keys")]
    InvalidThreshold { threshold: u8, keys: usize },
}

/// The preimage of a multisig account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigAccount {
    version: u8,
    threshold: u8,
    public_keys: Vec<Address>,
}

impl MultisigAccount {
    /// Validate and build a preimage. The version must be 1 and the
    /// threshold must lie in `1..=public_keys.len()`.
    pub fn new(version: u8, threshold: u8, public_keys: Vec<Address>) -> Result<Self, MultisigError> {
        if version != MULTISIG_VERSION {
            return Err(MultisigError::UnsupportedVersion(version));
        }
        if public_keys.is_empty() {
            return Err(MultisigError::NoPublicKeys);
        }
        if threshold == 0 || threshold as usize > public_keys.len() {
            return Err(MultisigError::InvalidThreshold {
                threshold,
                keys: public_keys.len(),
            });
        }
        Ok(Self {
            version,
            threshold,
            public_keys,
        })
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn public_keys(&self) -> &[Address] {
        &self.public_keys
    }

    /// The account address: SHA-512/256 of
    /// `"MultisigAddr" || version || threshold || pk_1 || ... || pk_n`.
    pub fn address(&self) -> Address {
        let mut preimage = Vec::with_capacity(2 + 32 * self.public_keys.len());
        preimage.push(self.version);
        preimage.push(self.threshold);
        for pk in &self.public_keys {
            preimage.extend_from_slice(pk.as_bytes());
        }
        Address::from_public_key(sha512_256_with_prefix(MULTISIG_ADDR_PREFIX, &preimage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(n: u8) -> Vec<Address> {
        (1..=n).map(|i| Address::from_public_key([i; 32])).collect()
    }

    #[test]
    fn valid_preimage_accepted() {
        let msig = MultisigAccount::new(1, 2, keys(3)).unwrap();
        assert_eq!(msig.threshold(), 2);
        assert_eq!(msig.public_keys().len(), 3);
    }

    #[test]
    fn bad_version_rejected() {
        assert_eq!(
            MultisigAccount::new(2, 1, keys(2)),
            Err(MultisigError::UnsupportedVersion(2))
        );
    }

    #[test]
    fn threshold_bounds_enforced() {
        assert!(matches!(
            MultisigAccount::new(1, 0, keys(2)),
            Err(MultisigError::InvalidThreshold { .. })
        ));
        assert!(matches!(
            MultisigAccount::new(1, 3, keys(2)),
            Err(MultisigError::InvalidThreshold { threshold: 3, keys: 2 })
        ));
    }

    #[test]
    fn empty_keys_rejected() {
        assert_eq!(
            MultisigAccount::new(1, 1, Vec::new()),
            Err(MultisigError::NoPublicKeys)
        );
    }

    #[test]
    fn key_order_changes_address() {
        let forward = MultisigAccount::new(1, 1, keys(2)).unwrap();
        let mut reversed_keys = keys(2);
        reversed_keys.reverse();
        let reversed = MultisigAccount::new(1, 1, reversed_keys).unwrap();
        assert_ne!(forward.address(), reversed.address());
    }

    #[test]
    fn threshold_changes_address() {
        let one = MultisigAccount::new(1, 1, keys(2)).unwrap();
        let two = MultisigAccount::new(1, 2, keys(2)).unwrap();
        assert_ne!(one.address(), two.address());
    }
}
