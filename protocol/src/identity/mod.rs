//! # Identity Module
//!
//! Account identities as the ledger sees them. A single-key account is an
//! Ed25519 public key; a multisig account is the hash of its preimage.
//! Both are represented by the same 32-byte [`Address`] type, which carries
//! a checksummed base32 text form for humans.
//!
//! 1. **Address** — the codec between raw keys and text addresses.
//! 2. **Multisig** — preimages and their derived addresses.

pub mod address;
pub mod multisig;

pub use address::{Address, AddressError};
pub use multisig::{MultisigAccount, MultisigError};
