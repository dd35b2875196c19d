//! # Transaction Module
//!
//! Construction, pricing and signing of ledger transactions. Every payment,
//! key registration, asset operation and application call is represented as
//! a [`Transaction`]: a common [`Header`] plus one [`TransactionFields`]
//! variant.
//!
//! ## Architecture
//!
//! ```text
//! types.rs       — Value types (SuggestedParams, Byte32, OnCompletion, StateSchema)
//! header.rs      — Header assembly from suggested params
//! builder.rs     — Transaction, TransactionFields and the shared TransactionBuilder
//! fee.rs         — Size-based and flat fee estimation
//! params.rs      — Address and foreign-app list parsing
//! payment.rs     — Payments
//! keyreg.rs      — Participation key registration
//! asset.rs       — Asset create/config/destroy/transfer/opt-in/revoke/freeze
//! application.rs — Application calls
//! signing.rs     — Signer capability, multisig aggregates, signed envelopes
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build**: call a `make_*_txn` function with text addresses and the
//!    node's [`SuggestedParams`]. Arguments are validated and the fee is
//!    written before the value is returned.
//! 2. **Group** (optional): [`Transaction::set_header_fields`] or
//!    [`Transaction::assign_group`] attach a group id, lease or rekey target.
//! 3. **Sign**: [`sign_transaction`] with any [`TransactionSigner`].
//! 4. **Submit**: [`SignedTransaction::encode`] yields the wire bytes.
//!
//! ## Design Decisions
//!
//! - Transaction ids are base32 of SHA-512/256 over `"TX" || encode(tx)`. The
//!   domain prefix keeps a transaction signature from being valid for any
//!   other signed object.
//! - All amounts are `u64` in the smallest unit. Fee arithmetic saturates.
//! - The fee is estimated from the encoding taken before the fee is
//!   written, so it may be a byte or two short of exact.

pub mod application;
pub mod asset;
pub mod builder;
pub mod error;
pub mod fee;
pub mod header;
pub mod keyreg;
pub mod params;
pub mod payment;
pub mod signing;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use application::{
    make_application_call_txn, make_application_clear_state_txn, make_application_close_out_txn,
    make_application_create_txn, make_application_delete_txn, make_application_no_op_txn,
    make_application_opt_in_txn, make_application_update_txn, ApplicationCallFields,
};
pub use asset::{
    make_asset_acceptance_txn, make_asset_config_txn, make_asset_create_txn,
    make_asset_destroy_txn, make_asset_freeze_txn, make_asset_revocation_txn,
    make_asset_transfer_txn, AssetConfigFields, AssetFreezeFields, AssetParams,
    AssetTransferFields,
};
pub use builder::{Transaction, TransactionBuilder, TransactionFields};
pub use error::TransactionError;
pub use fee::{assign_fee, estimate_size, FeeMode};
pub use header::{assemble_header, Header, HeaderExtras};
pub use keyreg::{make_key_reg_txn, KeyRegistrationFields};
pub use params::{parse_accounts, parse_foreign_apps};
pub use payment::{make_payment_txn, PaymentFields};
pub use signing::{
    sign_multisig_transaction, sign_transaction, MultisigSig, MultisigSubsig, SignedTransaction,
    SignerError, TransactionSigner,
};
pub use types::{
    AppIndex, AssetIndex, Byte32, MicroAlgos, OnCompletion, Round, StateSchema, SuggestedParams,
    TransactionType,
};
