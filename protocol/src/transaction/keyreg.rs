//! Key registration transactions.
//!
//! Registers a participation key so that the account can take part in
//! consensus. The vote and selection keys arrive base64 encoded, as the
//! participation key tooling prints them.

use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::{Deserialize, Serialize};

use super::builder::{Transaction, TransactionBuilder, TransactionFields};
use super::error::TransactionError;
use super::header::genesis_hash;
use super::params::decode_address;
use super::types::{Byte32, Round, SuggestedParams};
use crate::config::PARTICIPATION_KEY_LENGTH;
use crate::encoding::{CanonicalMap, EncodeError};

/// Fields of a key registration transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRegistrationFields {
    pub vote_key: Byte32,
    pub selection_key: Byte32,
    pub vote_first: Round,
    pub vote_last: Round,
    pub vote_key_dilution: u64,
}

impl KeyRegistrationFields {
    pub(crate) fn write_canonical(&self, map: &mut CanonicalMap) -> Result<(), EncodeError> {
        map.fixed("selkey", self.selection_key.as_bytes())?
            .uint("votefst", self.vote_first)?
            .uint("votekd", self.vote_key_dilution)?
            .fixed("votekey", self.vote_key.as_bytes())?
            .uint("votelst", self.vote_last)?;
        Ok(())
    }
}

fn participation_key(field: &'static str, text: &str) -> Result<Byte32, TransactionError> {
    let bytes = BASE64_STANDARD
        .decode(text)
        .map_err(|e| TransactionError::InvalidKeyMaterial {
            field,
            reason: e.to_string(),
        })?;
    Byte32::try_from_slice(&bytes).ok_or_else(|| TransactionError::InvalidKeyMaterial {
        field,
        reason: format!(
            "expected {} bytes, got {}",
            PARTICIPATION_KEY_LENGTH,
            bytes.len()
        ),
    })
}

/// Build a key registration for `account`.
#[allow(clippy::too_many_arguments)]
pub fn make_key_reg_txn(
    account: &str,
    note: &[u8],
    params: &SuggestedParams,
    vote_key: &str,
    selection_key: &str,
    vote_first: Round,
    vote_last: Round,
    vote_key_dilution: u64,
) -> Result<Transaction, TransactionError> {
    let sender = decode_address("account", account)?;
    genesis_hash(params)?;
    let vote_key = participation_key("vote key", vote_key)?;
    let selection_key = participation_key("selection key", selection_key)?;

    TransactionBuilder::new(params, sender)
        .note(note)
        .build(TransactionFields::KeyRegistration(KeyRegistrationFields {
            vote_key,
            selection_key,
            vote_first,
            vote_last,
            vote_key_dilution,
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_TXN_FEE;
    use crate::encoding::CanonicalEncode;
    use crate::transaction::test_support::{address_text, params};
    use crate::transaction::types::TransactionType;

    fn key(byte: u8) -> String {
        BASE64_STANDARD.encode([byte; 32])
    }

    #[test]
    fn keyreg_populates_fields() {
        let p = params(1, false);
        let tx = make_key_reg_txn(&address_text(1), &[], &p, &key(1), &key(2), 10, 1_000_000, 10_000)
            .unwrap();
        assert_eq!(tx.tx_type(), TransactionType::KeyRegistration);
        assert!(tx.fee() >= MIN_TXN_FEE);
        match &tx.fields {
            TransactionFields::KeyRegistration(f) => {
                assert_eq!(f.vote_key, Byte32([1u8; 32]));
                assert_eq!(f.selection_key, Byte32([2u8; 32]));
                assert_eq!(f.vote_first, 10);
                assert_eq!(f.vote_last, 1_000_000);
                assert_eq!(f.vote_key_dilution, 10_000);
            }
            other => panic!("unexpected fields {other:?}"),
        }
        let map = tx.to_canonical_map().unwrap();
        for key in ["selkey", "votefst", "votekd", "votekey", "votelst"] {
            assert!(map.contains(key), "missing {key}");
        }
    }

    #[test]
    fn short_vote_key_is_rejected() {
        let p = params(1, false);
        let short = BASE64_STANDARD.encode([1u8; 31]);
        let err = make_key_reg_txn(&address_text(1), &[], &p, &short, &key(2), 1, 2, 3).unwrap_err();
        assert!(matches!(
            err,
            TransactionError::InvalidKeyMaterial { field: "vote key", .. }
        ));
    }

    #[test]
    fn non_base64_selection_key_is_rejected() {
        let p = params(1, false);
        let err = make_key_reg_txn(&address_text(1), &[], &p, &key(1), "not base64!", 1, 2, 3)
            .unwrap_err();
        assert!(matches!(
            err,
            TransactionError::InvalidKeyMaterial { field: "selection key", .. }
        ));
    }

    #[test]
    fn missing_genesis_hash_is_reported_before_bad_keys() {
        let mut p = params(1, false);
        p.genesis_hash.clear();
        let err = make_key_reg_txn(&address_text(1), &[], &p, "bad", "bad", 1, 2, 3).unwrap_err();
        assert!(matches!(err, TransactionError::MissingGenesisHash));
    }

    #[test]
    fn bad_account_is_rejected_first() {
        let p = params(1, false);
        let err = make_key_reg_txn("", &[], &p, "bad", "bad", 1, 2, 3).unwrap_err();
        assert!(matches!(err, TransactionError::InvalidAddress { .. }));
    }
}
