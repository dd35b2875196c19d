//! The header shared by every transaction type.
//!
//! [`assemble_header`] binds a transaction to a network (genesis id and
//! hash) and a validity window taken from [`SuggestedParams`]. It copies the
//! suggested fee into the header as a placeholder; the real fee is written
//! later by the fee estimator, once the type-specific fields are in place.

use serde::{Deserialize, Serialize};

use super::error::TransactionError;
use super::types::{Byte32, MicroAlgos, Round, SuggestedParams};
use crate::config::DIGEST_LENGTH;
use crate::encoding::{b64, CanonicalMap, EncodeError};
use crate::identity::Address;

/// Fields common to all transaction types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub sender: Address,
    pub fee: MicroAlgos,
    pub first_valid: Round,
    pub last_valid: Round,
    #[serde(with = "b64", default)]
    pub note: Vec<u8>,
    pub genesis_id: String,
    pub genesis_hash: Byte32,
    /// Group id; zero unless the transaction is part of an atomic group.
    #[serde(default)]
    pub group: Byte32,
    /// Mutual-exclusion lease; zero when unused.
    #[serde(default)]
    pub lease: Byte32,
    /// Account that will control the sender's keys after this transaction.
    #[serde(default)]
    pub rekey_to: Address,
}

/// Optional header fields that most builders leave empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderExtras {
    pub group: Byte32,
    pub lease: Byte32,
    pub rekey_to: Address,
}

/// Validate the genesis hash carried by `params`.
pub(crate) fn genesis_hash(params: &SuggestedParams) -> Result<Byte32, TransactionError> {
    if params.genesis_hash.is_empty() {
        return Err(TransactionError::MissingGenesisHash);
    }
    Byte32::try_from_slice(&params.genesis_hash).ok_or(TransactionError::MalformedGenesisHash {
        expected: DIGEST_LENGTH,
        got: params.genesis_hash.len(),
    })
}

/// Build a header for `sender` from the suggested params.
///
/// Fails with [`TransactionError::MissingGenesisHash`] if the params carry
/// no genesis hash. The fee is set to `params.fee` as a placeholder.
pub fn assemble_header(
    params: &SuggestedParams,
    sender: Address,
    note: &[u8],
) -> Result<Header, TransactionError> {
    let genesis_hash = genesis_hash(params)?;
    Ok(Header {
        sender,
        fee: params.fee,
        first_valid: params.first_round_valid,
        last_valid: params.last_round_valid,
        note: note.to_vec(),
        genesis_id: params.genesis_id.clone(),
        genesis_hash,
        group: Byte32::ZERO,
        lease: Byte32::ZERO,
        rekey_to: Address::ZERO,
    })
}

impl Header {
    /// Copy the optional group, lease and rekey fields into this header.
    pub fn apply(&mut self, extras: HeaderExtras) {
        self.group = extras.group;
        self.lease = extras.lease;
        self.rekey_to = extras.rekey_to;
    }

    pub(crate) fn write_canonical(&self, map: &mut CanonicalMap) -> Result<(), EncodeError> {
        map.uint("fee", self.fee)?
            .uint("fv", self.first_valid)?
            .text("gen", &self.genesis_id)?
            .fixed("gh", self.genesis_hash.as_bytes())?
            .fixed("grp", self.group.as_bytes())?
            .uint("lv", self.last_valid)?
            .fixed("lx", self.lease.as_bytes())?
            .bytes("note", &self.note)?
            .address("rekey", &self.rekey_to)?
            .address("snd", &self.sender)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::test_support::{address, params};

    #[test]
    fn header_copies_params() {
        let p = params(10, false);
        let header = assemble_header(&p, address(1), b"memo").unwrap();
        assert_eq!(header.sender, address(1));
        assert_eq!(header.fee, 10);
        assert_eq!(header.first_valid, p.first_round_valid);
        assert_eq!(header.last_valid, p.last_round_valid);
        assert_eq!(header.genesis_id, p.genesis_id);
        assert_eq!(header.genesis_hash.as_bytes().as_slice(), p.genesis_hash.as_slice());
        assert_eq!(header.note, b"memo");
        assert!(header.group.is_zero());
        assert!(header.rekey_to.is_zero());
    }

    #[test]
    fn missing_genesis_hash_rejected() {
        let mut p = params(10, false);
        p.genesis_hash.clear();
        assert!(matches!(
            assemble_header(&p, address(1), &[]),
            Err(TransactionError::MissingGenesisHash)
        ));
    }

    #[test]
    fn short_genesis_hash_rejected() {
        let mut p = params(10, false);
        p.genesis_hash.truncate(16);
        assert!(matches!(
            assemble_header(&p, address(1), &[]),
            Err(TransactionError::MalformedGenesisHash {
                expected: 32,
                got: 16
            })
        ));
    }

    #[test]
    fn extras_are_applied() {
        let p = params(10, false);
        let mut header = assemble_header(&p, address(1), &[]).unwrap();
        header.apply(HeaderExtras {
            group: Byte32([9u8; 32]),
            lease: Byte32([8u8; 32]),
            rekey_to: address(7),
        });
        assert_eq!(header.group, Byte32([9u8; 32]));
        assert_eq!(header.lease, Byte32([8u8; 32]));
        assert_eq!(header.rekey_to, address(7));
    }

    #[test]
    fn canonical_header_omits_empty_fields() {
        let p = params(0, false);
        let header = assemble_header(&p, address(1), &[]).unwrap();
        let mut map = CanonicalMap::new();
        header.write_canonical(&mut map).unwrap();
        assert!(map.contains("snd"));
        assert!(map.contains("gh"));
        assert!(!map.contains("fee"));
        assert!(!map.contains("note"));
        assert!(!map.contains("grp"));
        assert!(!map.contains("lx"));
        assert!(!map.contains("rekey"));
    }
}
