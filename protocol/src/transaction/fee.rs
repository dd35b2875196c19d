//! Fee estimation.
//!
//! A size-based fee is `params.fee` per byte of the *signed* transaction.
//! The signature is not known at build time, so the size is estimated as
//! the length of the unsigned canonical encoding plus a fixed allowance
//! for the signature envelope.
//!
//! The encoding is taken once, while the fee field still holds the
//! placeholder copied from the params. Writing the computed fee may change
//! the encoded length by a byte or two; that drift is accepted and the fee
//! is not re-estimated.

use tracing::{debug, trace};

use super::builder::{Transaction, TransactionFields};
use super::error::TransactionError;
use super::types::{MicroAlgos, SuggestedParams};
use crate::config::{MIN_TXN_FEE, NUM_ADDITIONAL_BYTES_AFTER_SIGNING};

/// How `params.fee` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeMode {
    /// `params.fee` is the whole fee.
    Flat,
    /// `params.fee` is a per-byte rate.
    SizeBased,
}

impl FeeMode {
    pub fn from_params(params: &SuggestedParams) -> Self {
        if params.flat_fee {
            FeeMode::Flat
        } else {
            FeeMode::SizeBased
        }
    }

    /// The mode a builder uses for `fields`. Asset transfers are always
    /// priced by size, whatever the params say.
    pub fn for_fields(fields: &TransactionFields, params: &SuggestedParams) -> Self {
        match fields {
            TransactionFields::AssetTransfer(_) => FeeMode::SizeBased,
            _ => FeeMode::from_params(params),
        }
    }
}

/// Estimated length in bytes of `tx` once signed.
pub fn estimate_size(tx: &Transaction) -> Result<u64, TransactionError> {
    let encoded = tx.encode()?;
    trace!(encoded_len = encoded.len(), "estimated transaction size");
    Ok(encoded.len() as u64 + NUM_ADDITIONAL_BYTES_AFTER_SIGNING)
}

/// Compute the fee for `tx` under `mode` and write it into the header.
///
/// The result is never below [`MIN_TXN_FEE`].
pub fn assign_fee(
    tx: &mut Transaction,
    params: &SuggestedParams,
    mode: FeeMode,
) -> Result<MicroAlgos, TransactionError> {
    let fee = match mode {
        FeeMode::Flat => params.fee,
        FeeMode::SizeBased => estimate_size(tx)?.saturating_mul(params.fee),
    };
    let fee = fee.max(MIN_TXN_FEE);
    tx.header.fee = fee;
    debug!(tx_type = %tx.tx_type(), ?mode, fee, "assigned transaction fee");
    Ok(fee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::header::assemble_header;
    use crate::transaction::payment::PaymentFields;
    use crate::transaction::test_support::{address, params};

    fn payment(params: &SuggestedParams, note: &[u8]) -> Transaction {
        Transaction {
            header: assemble_header(params, address(1), note).unwrap(),
            fields: TransactionFields::Payment(PaymentFields {
                receiver: address(2),
                amount: 1_000_000,
                close_remainder_to: Default::default(),
            }),
        }
    }

    #[test]
    fn mode_follows_flat_flag() {
        assert_eq!(FeeMode::from_params(&params(1, true)), FeeMode::Flat);
        assert_eq!(FeeMode::from_params(&params(1, false)), FeeMode::SizeBased);
    }

    #[test]
    fn estimate_adds_signature_allowance() {
        let p = params(1, false);
        let tx = payment(&p, &[]);
        let len = tx.encode().unwrap().len() as u64;
        assert_eq!(estimate_size(&tx).unwrap(), len + 75);
    }

    #[test]
    fn size_based_fee_is_clamped_to_minimum() {
        let p = params(1, false);
        let mut tx = payment(&p, &[]);
        let fee = assign_fee(&mut tx, &p, FeeMode::SizeBased).unwrap();
        assert_eq!(fee, MIN_TXN_FEE);
        assert_eq!(tx.fee(), MIN_TXN_FEE);
    }

    #[test]
    fn size_based_fee_uses_pre_write_encoding() {
        let p = params(10, false);
        let mut tx = payment(&p, &[0xAB; 200]);
        let expected = (tx.encode().unwrap().len() as u64 + 75) * 10;
        let fee = assign_fee(&mut tx, &p, FeeMode::SizeBased).unwrap();
        assert!(expected > MIN_TXN_FEE);
        assert_eq!(fee, expected);
    }

    #[test]
    fn flat_fee_is_taken_verbatim_above_minimum() {
        let p = params(4_321, true);
        let mut tx = payment(&p, &[0xAB; 200]);
        assert_eq!(assign_fee(&mut tx, &p, FeeMode::Flat).unwrap(), 4_321);
    }

    #[test]
    fn flat_fee_is_clamped_to_minimum() {
        let p = params(0, true);
        let mut tx = payment(&p, &[]);
        assert_eq!(assign_fee(&mut tx, &p, FeeMode::Flat).unwrap(), MIN_TXN_FEE);
    }

    #[test]
    fn huge_rate_saturates() {
        let p = params(u64::MAX, false);
        let mut tx = payment(&p, &[]);
        assert_eq!(assign_fee(&mut tx, &p, FeeMode::SizeBased).unwrap(), u64::MAX);
    }
}
