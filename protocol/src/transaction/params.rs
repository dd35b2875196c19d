//! Parsing of caller-supplied address and id lists.
//!
//! Builders accept addresses as checksummed text. These helpers turn that
//! text into typed values and attach the argument name to any failure, so
//! an error reads `invalid accounts[2] address ...` rather than a bare
//! checksum complaint.

use super::error::TransactionError;
use super::types::AppIndex;
use crate::identity::Address;

/// Decode a required address argument. An empty string is an error.
pub(crate) fn decode_address(field: &str, text: &str) -> Result<Address, TransactionError> {
    Address::from_string(text).map_err(|e| TransactionError::invalid_address(field, text, e))
}

/// Decode an optional address argument. An empty string means the field is
/// intentionally absent and yields the zero address.
pub(crate) fn decode_optional_address(field: &str, text: &str) -> Result<Address, TransactionError> {
    if text.is_empty() {
        return Ok(Address::ZERO);
    }
    decode_address(field, text)
}

/// Decode a list of account addresses, preserving order.
///
/// Fails on the first undecodable element; the error names it by index
/// (`accounts[i]`).
pub fn parse_accounts<S: AsRef<str>>(accounts: &[S]) -> Result<Vec<Address>, TransactionError> {
    accounts
        .iter()
        .enumerate()
        .map(|(i, text)| decode_address(&format!("accounts[{i}]"), text.as_ref()))
        .collect()
}

/// Narrow raw ids to application indices. Never fails.
pub fn parse_foreign_apps(foreign_apps: &[u64]) -> Vec<AppIndex> {
    foreign_apps.to_vec()
}
