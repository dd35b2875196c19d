//! Errors raised while building a transaction.
//!
//! Every variant is a local, synchronous input error. Builders stop at the
//! first failure and return no transaction; callers should surface these to
//! the user rather than retry.

use thiserror::Error;

use crate::encoding::EncodeError;
use crate::identity::AddressError;

/// Errors that can occur while building a transaction.
#[derive(Debug, Error)]
pub enum TransactionError {
    /// An address argument is empty where one is required, malformed, or
    /// fails its checksum.
    #[error("invalid {field} address '{address}': {source}")]
    InvalidAddress {
        /// Which argument was rejected, e.g. `receiver` or `accounts[2]`.
        field: String,
        /// The text that was supplied.
        address: String,
        #[source]
        source: AddressError,
    },

    /// The suggested params carry no genesis hash.
    #[error("transaction must contain a genesis hash")]
    MissingGenesisHash,

    /// The suggested params carry a genesis hash of the wrong size.
    #[error("genesis hash must be {expected} bytes, got {got}")]
    MalformedGenesisHash { expected: usize, got: usize },

    /// A string field exceeds its protocol maximum.
    #[error("{field} too long: {len} > {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// Participation key material is not valid base64 of exactly 32 bytes.
    #[error("invalid {field}: {reason}")]
    InvalidKeyMaterial { field: &'static str, reason: String },

    /// Strict empty-address checking was requested and a management
    /// address was left blank.
    #[error("strict empty address checking requested but empty address supplied to {field}")]
    StrictCheckViolation { field: &'static str },

    /// Asset decimal precision exceeds the protocol maximum.
    #[error("cannot create an asset with number of decimals {decimals} (more than maximum {max})")]
    DecimalsOutOfRange { decimals: u32, max: u32 },

    /// The canonical encoder failed while sizing the transaction.
    #[error("failed to encode transaction: {0}")]
    Encoding(#[from] EncodeError),
}

impl TransactionError {
    pub(crate) fn invalid_address(
        field: impl Into<String>,
        address: &str,
        source: AddressError,
    ) -> Self {
        Self::InvalidAddress {
            field: field.into(),
            address: address.to_string(),
            source,
        }
    }
}
