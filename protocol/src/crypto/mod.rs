//! # Cryptographic Primitives
//!
//! Thin, type-safe wrappers around audited implementations: SHA-512/256
//! from `sha2` for every identity hash, Ed25519 from `ed25519-dalek` for
//! keys and signatures. Nothing here is hand rolled.

pub mod hash;
pub mod keys;

pub use hash::{checksum, sha512_256, sha512_256_with_prefix};
pub use keys::{KeyError, Keypair, Signature};
