// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # algotx — Core Library
//!
//! Transaction construction for an Algorand-style ledger: turn user intent
//! (pay, register a participation key, create or move an asset, call an
//! application) into a fully populated transaction whose canonical encoding
//! fixes both its fee and, once signed, its identity.
//!
//! ## Architecture
//!
//! - **config** — Protocol constants and limits.
//! - **crypto** — SHA-512/256 digests and Ed25519 keys.
//! - **identity** — Checksummed addresses and multisig accounts.
//! - **encoding** — The canonical msgpack writer every hash and fee depends on.
//! - **transaction** — Builders, fee estimation and signing.
//!
//! The library performs no I/O. Suggested params come from the caller, and
//! signing goes through the [`transaction::TransactionSigner`] trait so that
//! keys can live anywhere.
//!
//! ## Example
//!
//! ```rust,no_run
//! use algotx::crypto::Keypair;
//! use algotx::transaction::{make_payment_txn, sign_transaction, SuggestedParams};
//!
//! # fn demo(params: &SuggestedParams) -> Result<(), Box<dyn std::error::Error>> {
//! let alice = Keypair::generate();
//! let bob = Keypair::generate();
//! let tx = make_payment_txn(
//!     &alice.address().to_string(),
//!     &bob.address().to_string(),
//!     1_000_000,
//!     b"lunch",
//!     "",
//!     params,
//! )?;
//! let signed = sign_transaction(tx, &alice, &alice.address())?;
//! let wire = signed.encode()?;
//! # let _ = wire;
//! # Ok(()) }
//! ```

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod identity;
pub mod transaction;
