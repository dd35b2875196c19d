//! # Canonical Encoding
//!
//! The ledger identifies and charges transactions by their canonical
//! msgpack encoding. This module owns that encoding and nothing else; the
//! transaction types describe their own field layout by implementing
//! [`CanonicalEncode`].

pub mod b64;
pub mod canonical;

pub use canonical::{CanonicalEncode, CanonicalMap, EncodeError};
