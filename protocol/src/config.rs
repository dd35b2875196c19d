//! # Protocol Configuration & Constants
//!
//! Every consensus-derived number the builders rely on lives here. These
//! values mirror the network's consensus parameters; a transaction built
//! with a different value is either rejected or mis-charged by the network,
//! so they are not tunable at runtime.

// ---------------------------------------------------------------------------
// Fee Parameters
// ---------------------------------------------------------------------------

/// Minimum transaction fee in microAlgos. Any computed fee below this is
/// clamped up to it.
pub const MIN_TXN_FEE: u64 = 1_000;

/// Number of bytes a signature envelope adds to an unsigned transaction
/// once it is signed. Size-based fees are charged on the signed size, so
/// the estimator adds this to the unsigned encoding length.
pub const NUM_ADDITIONAL_BYTES_AFTER_SIGNING: u64 = 75;

// ---------------------------------------------------------------------------
// Asset Limits
// ---------------------------------------------------------------------------

/// Maximum number of decimal places an asset may declare.
pub const ASSET_MAX_NUMBER_OF_DECIMALS: u32 = 19;

/// Maximum length in bytes of an asset unit name.
pub const ASSET_UNIT_NAME_MAX_LEN: usize = 8;

/// Maximum length in bytes of an asset name.
pub const ASSET_NAME_MAX_LEN: usize = 32;

/// Maximum length in bytes of an asset URL.
pub const ASSET_URL_MAX_LEN: usize = 32;

/// Length in bytes of the asset metadata hash slot. Shorter values are
/// zero padded.
pub const ASSET_METADATA_HASH_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Key & Address Parameters
// ---------------------------------------------------------------------------

/// Public key length in bytes. Addresses wrap exactly one public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// Digest length for SHA-512/256 outputs (genesis hash, group id, txid).
pub const DIGEST_LENGTH: usize = 32;

/// Number of trailing SHA-512/256 bytes appended to a public key to form
/// the address checksum.
pub const ADDRESS_CHECKSUM_LENGTH: usize = 4;

/// Length of a text address: base32 of 36 bytes, unpadded.
pub const ADDRESS_TEXT_LENGTH: usize = 58;

/// Participation vote and VRF selection keys are both 32 bytes.
pub const PARTICIPATION_KEY_LENGTH: usize = 32;

/// Lease slot length.
pub const LEASE_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Domain Separation
// ---------------------------------------------------------------------------

/// Prefix hashed in front of encoded transactions for ids and signatures.
pub const TX_ID_PREFIX: &[u8] = b"TX";

/// Prefix hashed in front of multisig preimages to derive their address.
pub const MULTISIG_ADDR_PREFIX: &[u8] = b"MultisigAddr";

/// The only multisig version the network understands.
pub const MULTISIG_VERSION: u8 = 1;
