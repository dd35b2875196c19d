//! The [`Transaction`] value and the shared construction flow.
//!
//! Every type-specific builder follows the same steps: decode and validate
//! its own arguments, then hand a populated [`TransactionFields`] variant to
//! [`TransactionBuilder::build`], which assembles the header and writes the
//! fee. The builder does not sign; that happens in [`super::signing`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::application::ApplicationCallFields;
use super::asset::{AssetConfigFields, AssetFreezeFields, AssetTransferFields};
use super::error::TransactionError;
use super::fee::{assign_fee, FeeMode};
use super::header::{assemble_header, Header, HeaderExtras};
use super::keyreg::KeyRegistrationFields;
use super::payment::PaymentFields;
use super::types::{Byte32, MicroAlgos, SuggestedParams, TransactionType};
use crate::config::{DIGEST_LENGTH, TX_ID_PREFIX};
use crate::crypto::hash::sha512_256_with_prefix;
use crate::encoding::{CanonicalEncode, CanonicalMap, EncodeError};
use crate::identity::Address;

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// Type-specific transaction fields. The variant determines the type tag,
/// so a transaction can never carry fields of two kinds at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransactionFields {
    #[serde(rename = "pay")]
    Payment(PaymentFields),
    #[serde(rename = "keyreg")]
    KeyRegistration(KeyRegistrationFields),
    #[serde(rename = "acfg")]
    AssetConfig(AssetConfigFields),
    #[serde(rename = "axfer")]
    AssetTransfer(AssetTransferFields),
    #[serde(rename = "afrz")]
    AssetFreeze(AssetFreezeFields),
    #[serde(rename = "appl")]
    ApplicationCall(ApplicationCallFields),
}

impl TransactionFields {
    pub fn tx_type(&self) -> TransactionType {
        match self {
            TransactionFields::Payment(_) => TransactionType::Payment,
            TransactionFields::KeyRegistration(_) => TransactionType::KeyRegistration,
            TransactionFields::AssetConfig(_) => TransactionType::AssetConfig,
            TransactionFields::AssetTransfer(_) => TransactionType::AssetTransfer,
            TransactionFields::AssetFreeze(_) => TransactionType::AssetFreeze,
            TransactionFields::ApplicationCall(_) => TransactionType::ApplicationCall,
        }
    }

    fn write_canonical(&self, map: &mut CanonicalMap) -> Result<(), EncodeError> {
        match self {
            TransactionFields::Payment(f) => f.write_canonical(map),
            TransactionFields::KeyRegistration(f) => f.write_canonical(map),
            TransactionFields::AssetConfig(f) => f.write_canonical(map),
            TransactionFields::AssetTransfer(f) => f.write_canonical(map),
            TransactionFields::AssetFreeze(f) => f.write_canonical(map),
            TransactionFields::ApplicationCall(f) => f.write_canonical(map),
        }
    }
}

/// An unsigned transaction.
///
/// The id is not stored: it is a pure function of the canonical encoding
/// (see [`Transaction::id`]) and changes whenever any field does, the fee
/// included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub header: Header,
    pub fields: TransactionFields,
}

impl Transaction {
    pub fn tx_type(&self) -> TransactionType {
        self.fields.tx_type()
    }

    pub fn sender(&self) -> &Address {
        &self.header.sender
    }

    pub fn fee(&self) -> MicroAlgos {
        self.header.fee
    }

    /// Canonical msgpack encoding of the transaction.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        self.to_canonical_bytes()
    }

    /// The exact bytes a signer signs: `"TX" || encode(tx)`.
    pub fn bytes_to_sign(&self) -> Result<Vec<u8>, EncodeError> {
        let encoded = self.encode()?;
        let mut out = Vec::with_capacity(TX_ID_PREFIX.len() + encoded.len());
        out.extend_from_slice(TX_ID_PREFIX);
        out.extend_from_slice(&encoded);
        Ok(out)
    }

    /// `SHA-512/256("TX" || encode(tx))`.
    pub fn raw_id(&self) -> Result<[u8; DIGEST_LENGTH], EncodeError> {
        Ok(sha512_256_with_prefix(TX_ID_PREFIX, &self.encode()?))
    }

    /// The transaction id in its 52-character base32 text form.
    pub fn id(&self) -> Result<String, EncodeError> {
        Ok(data_encoding::BASE32_NOPAD.encode(&self.raw_id()?))
    }

    /// Replace the header with a freshly assembled one and recompute the fee.
    ///
    /// Used to attach a group id, lease or rekey target after the fact, or to
    /// rebind a transaction to new params.
    pub fn set_header_fields(
        &mut self,
        params: &SuggestedParams,
        sender: Address,
        note: &[u8],
        extras: HeaderExtras,
    ) -> Result<(), TransactionError> {
        let mut header = assemble_header(params, sender, note)?;
        header.apply(extras);
        self.header = header;
        assign_fee(self, params, FeeMode::for_fields(&self.fields, params))?;
        Ok(())
    }

    /// Set the group id. The fee is left untouched; group ids are assigned
    /// after every member has been priced.
    pub fn assign_group(&mut self, group: Byte32) {
        self.header.group = group;
    }
}

impl CanonicalEncode for Transaction {
    fn to_canonical_map(&self) -> Result<CanonicalMap, EncodeError> {
        let mut map = CanonicalMap::new();
        self.header.write_canonical(&mut map)?;
        map.text("type", self.tx_type().as_str())?;
        self.fields.write_canonical(&mut map)?;
        Ok(map)
    }
}

// ---------------------------------------------------------------------------
// TransactionBuilder
// ---------------------------------------------------------------------------

/// Fluent builder that turns populated [`TransactionFields`] into a priced
/// [`Transaction`].
///
/// ```rust,no_run
/// use algotx::transaction::{PaymentFields, SuggestedParams, TransactionBuilder, TransactionFields};
/// use algotx::identity::Address;
///
/// # fn demo(params: &SuggestedParams, from: Address, to: Address) -> Result<(), algotx::transaction::TransactionError> {
/// let tx = TransactionBuilder::new(params, from)
///     .note(b"rent")
///     .build(TransactionFields::Payment(PaymentFields {
///         receiver: to,
///         amount: 5_000_000,
///         close_remainder_to: Address::ZERO,
///     }))?;
/// # Ok(()) }
/// ```
pub struct TransactionBuilder<'p> {
    params: &'p SuggestedParams,
    sender: Address,
    note: Vec<u8>,
    extras: HeaderExtras,
    fee_mode: Option<FeeMode>,
}

impl<'p> TransactionBuilder<'p> {
    pub fn new(params: &'p SuggestedParams, sender: Address) -> Self {
        Self {
            params,
            sender,
            note: Vec::new(),
            extras: HeaderExtras::default(),
            fee_mode: None,
        }
    }

    pub fn note(mut self, note: &[u8]) -> Self {
        self.note = note.to_vec();
        self
    }

    pub fn extras(mut self, extras: HeaderExtras) -> Self {
        self.extras = extras;
        self
    }

    pub fn group(mut self, group: Byte32) -> Self {
        self.extras.group = group;
        self
    }

    pub fn lease(mut self, lease: Byte32) -> Self {
        self.extras.lease = lease;
        self
    }

    pub fn rekey_to(mut self, rekey_to: Address) -> Self {
        self.extras.rekey_to = rekey_to;
        self
    }

    /// Override the fee mode. By default it is derived from the params and
    /// the transaction kind via [`FeeMode::for_fields`].
    pub fn fee_mode(mut self, mode: FeeMode) -> Self {
        self.fee_mode = Some(mode);
        self
    }

    /// Assemble the header, attach `fields` and write the fee.
    pub fn build(self, fields: TransactionFields) -> Result<Transaction, TransactionError> {
        let mut header = assemble_header(self.params, self.sender, &self.note)?;
        header.apply(self.extras);

        let mode = self
            .fee_mode
            .unwrap_or_else(|| FeeMode::for_fields(&fields, self.params));
        let mut tx = Transaction { header, fields };
        assign_fee(&mut tx, self.params, mode)?;

        debug!(
            tx_type = %tx.tx_type(),
            sender = %tx.header.sender,
            fee = tx.header.fee,
            "built transaction"
        );
        Ok(tx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MIN_TXN_FEE;
    use crate::transaction::asset::AssetTransferFields;
    use crate::transaction::test_support::{address, address_text, params};

    fn payment_fields() -> TransactionFields {
        TransactionFields::Payment(PaymentFields {
            receiver: address(2),
            amount: 1_000,
            close_remainder_to: Address::ZERO,
        })
    }

    fn sample_tx() -> Transaction {
        TransactionBuilder::new(&params(1, false), address(1))
            .note(b"hello")
            .build(payment_fields())
            .unwrap()
    }

    #[test]
    fn builder_is_deterministic() {
        let a = sample_tx();
        let b = sample_tx();
        assert_eq!(a, b);
        assert_eq!(a.encode().unwrap(), b.encode().unwrap());
        assert_eq!(a.id().unwrap(), b.id().unwrap());
    }

    #[test]
    fn every_builder_is_deterministic() {
        use crate::transaction::{
            make_application_call_txn, make_asset_freeze_txn, make_key_reg_txn,
            make_payment_txn, OnCompletion, StateSchema,
        };
        use base64::prelude::{Engine as _, BASE64_STANDARD};

        let builders: [(&str, fn() -> Result<Transaction, TransactionError>); 4] = [
            ("pay", || {
                make_payment_txn(&address_text(1), &address_text(2), 5, b"n", "", &params(1, false))
            }),
            ("keyreg", || {
                let key = BASE64_STANDARD.encode([3u8; 32]);
                make_key_reg_txn(&address_text(1), &[], &params(1, false), &key, &key, 1, 100, 10)
            }),
            ("afrz", || {
                make_asset_freeze_txn(&address_text(1), &[], &params(1, false), 9, &address_text(4), true)
            }),
            ("appl", || {
                let account = address_text(5);
                make_application_call_txn(
                    &address_text(1),
                    b"call",
                    &params(1, false),
                    0,
                    &[b"arg".to_vec()],
                    &[account.as_str()],
                    &[7],
                    OnCompletion::OptIn,
                    b"approve",
                    b"clear",
                    StateSchema::new(1, 1),
                    StateSchema::new(2, 0),
                )
            }),
        ];

        for (name, build) in builders {
            let first = build().unwrap();
            let second = build().unwrap();
            assert_eq!(first.encode().unwrap(), second.encode().unwrap(), "{name}");
            assert_eq!(first.id().unwrap(), second.id().unwrap(), "{name}");
        }
    }

    #[test]
    fn id_is_52_base32_chars() {
        let id = sample_tx().id().unwrap();
        assert_eq!(id.len(), 52);
        assert!(id.chars().all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c)));
    }

    #[test]
    fn bytes_to_sign_are_prefixed() {
        let tx = sample_tx();
        let signable = tx.bytes_to_sign().unwrap();
        assert_eq!(&signable[..2], b"TX");
        assert_eq!(&signable[2..], tx.encode().unwrap().as_slice());
    }

    #[test]
    fn encoding_carries_type_tag() {
        let map = sample_tx().to_canonical_map().unwrap();
        assert!(map.contains("type"));
        assert!(map.contains("rcv"));
        assert!(map.contains("amt"));
        assert!(!map.contains("close"));
        assert!(!map.contains("xaid"));
    }

    #[test]
    fn note_changes_id() {
        let p = params(1, false);
        let a = TransactionBuilder::new(&p, address(1)).build(payment_fields()).unwrap();
        let b = TransactionBuilder::new(&p, address(1))
            .note(b"x")
            .build(payment_fields())
            .unwrap();
        assert_ne!(a.id().unwrap(), b.id().unwrap());
    }

    #[test]
    fn extras_land_in_header() {
        let tx = TransactionBuilder::new(&params(1, false), address(1))
            .group(Byte32([1u8; 32]))
            .lease(Byte32([2u8; 32]))
            .rekey_to(address(9))
            .build(payment_fields())
            .unwrap();
        assert_eq!(tx.header.group, Byte32([1u8; 32]));
        assert_eq!(tx.header.lease, Byte32([2u8; 32]));
        assert_eq!(tx.header.rekey_to, address(9));
        let map = tx.to_canonical_map().unwrap();
        assert!(map.contains("grp"));
        assert!(map.contains("lx"));
        assert!(map.contains("rekey"));
    }

    #[test]
    fn asset_transfer_ignores_flat_fee() {
        let p = params(50, true);
        let tx = TransactionBuilder::new(&p, address(1))
            .build(TransactionFields::AssetTransfer(AssetTransferFields {
                asset_id: 7,
                amount: 1,
                asset_sender: Address::ZERO,
                receiver: address(2),
                close_to: Address::ZERO,
            }))
            .unwrap();
        assert!(tx.fee() > 50);
        assert_eq!(tx.fee() % 50, 0);
    }

    #[test]
    fn explicit_fee_mode_overrides_params() {
        let p = params(2_000, false);
        let tx = TransactionBuilder::new(&p, address(1))
            .fee_mode(FeeMode::Flat)
            .build(payment_fields())
            .unwrap();
        assert_eq!(tx.fee(), 2_000);
    }

    #[test]
    fn set_header_fields_reprices() {
        let mut tx = sample_tx();
        assert_eq!(tx.fee(), MIN_TXN_FEE);
        let p = params(10, false);
        tx.set_header_fields(
            &p,
            address(3),
            b"new note",
            HeaderExtras {
                rekey_to: address(4),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(tx.header.sender, address(3));
        assert_eq!(tx.header.note, b"new note");
        assert_eq!(tx.header.rekey_to, address(4));
        assert!(tx.fee() > MIN_TXN_FEE);
        assert_eq!(tx.fee() % 10, 0);
    }

    #[test]
    fn set_header_fields_requires_genesis_hash() {
        let mut tx = sample_tx();
        let mut p = params(1, false);
        p.genesis_hash.clear();
        assert!(matches!(
            tx.set_header_fields(&p, address(1), &[], HeaderExtras::default()),
            Err(TransactionError::MissingGenesisHash)
        ));
    }

    #[test]
    fn assign_group_keeps_fee() {
        let mut tx = sample_tx();
        let fee = tx.fee();
        tx.assign_group(Byte32([5u8; 32]));
        assert_eq!(tx.fee(), fee);
        assert_eq!(tx.header.group, Byte32([5u8; 32]));
    }

    #[test]
    fn transaction_json_roundtrip() {
        let tx = sample_tx();
        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"type\":\"pay\""));
        let recovered: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, recovered);
    }
}
