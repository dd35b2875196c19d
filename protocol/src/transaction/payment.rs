//! Payment transactions.

use serde::{Deserialize, Serialize};

use super::builder::{Transaction, TransactionBuilder, TransactionFields};
use super::error::TransactionError;
use super::params::{decode_address, decode_optional_address};
use super::types::{MicroAlgos, SuggestedParams};
use crate::encoding::{CanonicalMap, EncodeError};
use crate::identity::Address;

/// Fields of a payment transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFields {
    pub receiver: Address,
    pub amount: MicroAlgos,
    /// If set, the sender's remaining balance is sent here and the sender
    /// account is closed.
    #[serde(default)]
    pub close_remainder_to: Address,
}

impl PaymentFields {
    pub(crate) fn write_canonical(&self, map: &mut CanonicalMap) -> Result<(), EncodeError> {
        map.uint("amt", self.amount)?
            .address("close", &self.close_remainder_to)?
            .address("rcv", &self.receiver)?;
        Ok(())
    }
}

/// Build a payment of `amount` microalgos from `from` to `to`.
///
/// `close_remainder_to` may be empty, meaning the account stays open.
pub fn make_payment_txn(
    from: &str,
    to: &str,
    amount: MicroAlgos,
    note: &[u8],
    close_remainder_to: &str,
    params: &SuggestedParams,
) -> Result<Transaction, TransactionError> {
    let sender = decode_address("sender", from)?;
    let receiver = decode_address("receiver", to)?;
    let close_remainder_to = decode_optional_address("close_remainder_to", close_remainder_to)?;

    TransactionBuilder::new(params, sender)
        .note(note)
        .build(TransactionFields::Payment(PaymentFields {
            receiver,
            amount,
            close_remainder_to,
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_TXN_FEE;
    use crate::identity::AddressError;
    use crate::transaction::header::assemble_header;
    use crate::transaction::test_support::{address, address_text, params};
    use crate::transaction::types::TransactionType;

    #[test]
    fn payment_with_minimum_fee() {
        let p = params(1, false);
        let tx = make_payment_txn(&address_text(1), &address_text(2), 1_000, &[], "", &p).unwrap();
        assert_eq!(tx.tx_type(), TransactionType::Payment);
        assert_eq!(tx.fee(), MIN_TXN_FEE);
        match &tx.fields {
            TransactionFields::Payment(f) => {
                assert_eq!(f.receiver, address(2));
                assert_eq!(f.amount, 1_000);
                assert!(f.close_remainder_to.is_zero());
            }
            other => panic!("unexpected fields {other:?}"),
        }
    }

    #[test]
    fn fee_matches_pre_write_size() {
        let p = params(1, false);
        let note = vec![7u8; 1_200];
        let tx = make_payment_txn(&address_text(1), &address_text(2), 1_000, &note, "", &p).unwrap();

        let mut unpriced = Transaction {
            header: assemble_header(&p, address(1), &note).unwrap(),
            fields: tx.fields.clone(),
        };
        unpriced.header.fee = p.fee;
        let expected = (unpriced.encode().unwrap().len() as u64 + 75).max(MIN_TXN_FEE);
        assert_eq!(tx.fee(), expected);
        assert!(tx.fee() > MIN_TXN_FEE);
    }

    #[test]
    fn close_to_is_decoded_when_present() {
        let p = params(1, false);
        let tx = make_payment_txn(
            &address_text(1),
            &address_text(2),
            0,
            &[],
            &address_text(3),
            &p,
        )
        .unwrap();
        match tx.fields {
            TransactionFields::Payment(f) => assert_eq!(f.close_remainder_to, address(3)),
            other => panic!("unexpected fields {other:?}"),
        }
    }

    #[test]
    fn empty_receiver_is_rejected() {
        let p = params(1, false);
        let err = make_payment_txn(&address_text(1), "", 1, &[], "", &p).unwrap_err();
        match err {
            TransactionError::InvalidAddress { field, source, .. } => {
                assert_eq!(field, "receiver");
                assert_eq!(source, AddressError::Empty);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn bad_close_to_is_rejected() {
        let p = params(1, false);
        let err = make_payment_txn(&address_text(1), &address_text(2), 1, &[], "NOTANADDRESS", &p)
            .unwrap_err();
        assert!(matches!(
            err,
            TransactionError::InvalidAddress { ref field, .. } if field == "close_remainder_to"
        ));
    }

    #[test]
    fn flat_fee_payment() {
        let p = params(2_500, true);
        let tx = make_payment_txn(&address_text(1), &address_text(2), 1, &[], "", &p).unwrap();
        assert_eq!(tx.fee(), 2_500);
    }
}
