//! Core type definitions for ledger transactions.
//!
//! These types form the vocabulary of every transaction. They are kept
//! small and `Copy` where possible; the only heap data in a transaction is
//! notes, names, programs and argument lists.

use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::DIGEST_LENGTH;

/// A round number on the ledger.
pub type Round = u64;

/// An amount of the native currency, in microAlgos.
pub type MicroAlgos = u64;

/// The id of an asset. Zero in an asset config transaction means "create".
pub type AssetIndex = u64;

/// The id of an application. Zero in an application call means "create".
pub type AppIndex = u64;

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// Discriminant for the operation a transaction represents.
///
/// Every transaction falls into exactly one of these categories; the wire
/// tag written under the `type` key is [`TransactionType::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionType {
    /// Native currency transfer.
    Payment,
    /// Participation key registration.
    KeyRegistration,
    /// Asset creation, reconfiguration or destruction.
    AssetConfig,
    /// Asset transfer, opt-in or clawback.
    AssetTransfer,
    /// Freezing or unfreezing an account's asset holding.
    AssetFreeze,
    /// Smart-contract application call.
    ApplicationCall,
}

impl TransactionType {
    /// The wire tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "pay",
            Self::KeyRegistration => "keyreg",
            Self::AssetConfig => "acfg",
            Self::AssetTransfer => "axfer",
            Self::AssetFreeze => "afrz",
            Self::ApplicationCall => "appl",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OnCompletion
// ---------------------------------------------------------------------------

/// What happens to the application and the sender's local state once an
/// application call succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OnCompletion {
    /// Only run the approval program.
    #[default]
    NoOp,
    /// Allocate local state for the sender.
    OptIn,
    /// Deallocate the sender's local state, subject to approval.
    CloseOut,
    /// Deallocate the sender's local state unconditionally.
    ClearState,
    /// Replace the approval and clear programs.
    UpdateApplication,
    /// Delete the application.
    DeleteApplication,
}

impl OnCompletion {
    /// The integer written under the `apan` key.
    pub fn as_u64(&self) -> u64 {
        match self {
            Self::NoOp => 0,
            Self::OptIn => 1,
            Self::CloseOut => 2,
            Self::ClearState => 3,
            Self::UpdateApplication => 4,
            Self::DeleteApplication => 5,
        }
    }
}

// ---------------------------------------------------------------------------
// StateSchema
// ---------------------------------------------------------------------------

/// Upper bound on the number of values an application may store, either
/// globally or per opted-in account. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StateSchema {
    pub num_uint: u64,
    pub num_byte_slice: u64,
}

impl StateSchema {
    pub const EMPTY: StateSchema = StateSchema {
        num_uint: 0,
        num_byte_slice: 0,
    };

    pub fn new(num_uint: u64, num_byte_slice: u64) -> Self {
        Self {
            num_uint,
            num_byte_slice,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

// ---------------------------------------------------------------------------
// Byte32
// ---------------------------------------------------------------------------

/// A fixed 32-byte value: genesis hash, group id, lease, metadata hash,
/// participation keys. All-zero means "absent" and is omitted from the
/// canonical encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Byte32(pub [u8; DIGEST_LENGTH]);

impl Byte32 {
    pub const ZERO: Byte32 = Byte32([0u8; DIGEST_LENGTH]);

    /// Copy a slice of exactly 32 bytes.
    pub fn try_from_slice(slice: &[u8]) -> Option<Self> {
        slice.try_into().ok().map(Self)
    }

    /// Copy up to 32 bytes, zero padding the remainder.
    pub fn zero_padded(slice: &[u8]) -> Self {
        let mut out = [0u8; DIGEST_LENGTH];
        let n = slice.len().min(DIGEST_LENGTH);
        out[..n].copy_from_slice(&slice[..n]);
        Self(out)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; DIGEST_LENGTH]
    }

    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(self.0)
    }
}

impl fmt::Debug for Byte32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Byte32({})", hex::encode(self.0))
    }
}

impl Serialize for Byte32 {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::encoding::b64::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Byte32 {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = crate::encoding::b64::deserialize(deserializer)?;
        Byte32::try_from_slice(&bytes).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "expected {} bytes, got {}",
                DIGEST_LENGTH,
                bytes.len()
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// SuggestedParams
// ---------------------------------------------------------------------------

/// Network parameters a node suggests for new transactions.
///
/// Produced by the node's REST client and consumed read-only by every
/// builder. `fee` is a per-byte rate unless `flat_fee` is set, in which case
/// it is the exact fee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedParams {
    /// Fee per byte, or the flat fee when `flat_fee` is true.
    pub fee: MicroAlgos,
    /// First round the transaction may be confirmed in.
    pub first_round_valid: Round,
    /// Last round the transaction may be confirmed in.
    pub last_round_valid: Round,
    /// Human-readable network name, e.g. `testnet-v1.0`.
    #[serde(default)]
    pub genesis_id: String,
    /// Hash of the network's genesis block. Must be 32 bytes.
    #[serde(with = "crate::encoding::b64")]
    pub genesis_hash: Vec<u8>,
    /// Use `fee` verbatim instead of as a per-byte rate.
    #[serde(default)]
    pub flat_fee: bool,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
