//! Fixtures shared by the transaction unit tests.

use crate::identity::Address;
use crate::transaction::types::SuggestedParams;

/// A testnet genesis hash.
pub const GENESIS_HASH_B64: &str = "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=";

/// Deterministic address whose public key is `[byte; 32]`.
pub fn address(byte: u8) -> Address {
    Address::from_public_key([byte; 32])
}

pub fn address_text(byte: u8) -> String {
    address(byte).to_string()
}

pub fn params(fee: u64, flat_fee: bool) -> SuggestedParams {
    use base64::Engine;
    SuggestedParams {
        fee,
        first_round_valid: 1_000,
        last_round_valid: 2_000,
        genesis_id: "testnet-v1.0".to_string(),
        genesis_hash: base64::engine::general_purpose::STANDARD
            .decode(GENESIS_HASH_B64)
            .unwrap(),
        flat_fee,
    }
}
