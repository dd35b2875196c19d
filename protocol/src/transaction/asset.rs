//! Asset transactions: creation, reconfiguration, destruction, transfer,
//! opt-in, revocation and freezing.
//!
//! Three wire kinds cover all seven operations. Acceptance (opt-in) and
//! revocation are transfers with particular arguments, and destruction is a
//! reconfiguration that clears every management address.
//!
//! A blank management address is never "leave unchanged". It encodes as
//! absent, and on a reconfiguration that permanently removes the role from
//! the asset. Pass `strict_empty_address_checking` to reject blanks instead.

use serde::{Deserialize, Serialize};

use super::builder::{Transaction, TransactionBuilder, TransactionFields};
use super::error::TransactionError;
use super::header::genesis_hash;
use super::params::{decode_address, decode_optional_address};
use super::types::{AssetIndex, Byte32, SuggestedParams};
use crate::config::{
    ASSET_MAX_NUMBER_OF_DECIMALS, ASSET_METADATA_HASH_LEN, ASSET_NAME_MAX_LEN,
    ASSET_UNIT_NAME_MAX_LEN, ASSET_URL_MAX_LEN,
};
use crate::encoding::{CanonicalMap, EncodeError};
use crate::identity::Address;

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Parameters of an asset. On a reconfiguration only the four management
/// addresses are meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetParams {
    pub total: u64,
    pub decimals: u32,
    pub default_frozen: bool,
    pub unit_name: String,
    pub asset_name: String,
    pub url: String,
    pub metadata_hash: Byte32,
    pub manager: Address,
    pub reserve: Address,
    pub freeze: Address,
    pub clawback: Address,
}

impl AssetParams {
    fn to_canonical_map(&self) -> Result<CanonicalMap, EncodeError> {
        let mut map = CanonicalMap::new();
        map.fixed("am", self.metadata_hash.as_bytes())?
            .text("an", &self.asset_name)?
            .text("au", &self.url)?
            .address("c", &self.clawback)?
            .uint("dc", u64::from(self.decimals))?
            .flag("df", self.default_frozen)?
            .address("f", &self.freeze)?
            .address("m", &self.manager)?
            .address("r", &self.reserve)?
            .uint("t", self.total)?
            .text("un", &self.unit_name)?;
        Ok(map)
    }
}

/// Fields of an asset configuration. `asset_id == 0` creates a new asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetConfigFields {
    pub asset_id: AssetIndex,
    pub params: AssetParams,
}

impl AssetConfigFields {
    pub(crate) fn write_canonical(&self, map: &mut CanonicalMap) -> Result<(), EncodeError> {
        map.map("apar", self.params.to_canonical_map()?)?
            .uint("caid", self.asset_id)?;
        Ok(())
    }
}

/// Fields of an asset transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTransferFields {
    pub asset_id: AssetIndex,
    pub amount: u64,
    /// Account the assets are clawed back from; zero for ordinary transfers.
    #[serde(default)]
    pub asset_sender: Address,
    pub receiver: Address,
    /// Where the sender's remaining holding goes when it opts out.
    #[serde(default)]
    pub close_to: Address,
}

impl AssetTransferFields {
    pub(crate) fn write_canonical(&self, map: &mut CanonicalMap) -> Result<(), EncodeError> {
        map.uint("aamt", self.amount)?
            .address("aclose", &self.close_to)?
            .address("arcv", &self.receiver)?
            .address("asnd", &self.asset_sender)?
            .uint("xaid", self.asset_id)?;
        Ok(())
    }
}

/// Fields of an asset freeze.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetFreezeFields {
    pub asset_id: AssetIndex,
    pub target: Address,
    pub frozen: bool,
}

impl AssetFreezeFields {
    pub(crate) fn write_canonical(&self, map: &mut CanonicalMap) -> Result<(), EncodeError> {
        map.flag("afrz", self.frozen)?
            .address("fadd", &self.target)?
            .uint("faid", self.asset_id)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

fn check_len(field: &'static str, value: &[u8], max: usize) -> Result<(), TransactionError> {
    if value.len() > max {
        return Err(TransactionError::FieldTooLong {
            field,
            len: value.len(),
            max,
        });
    }
    Ok(())
}

/// Build an asset creation transaction.
///
/// Blank management addresses leave the role unassigned. `metadata_hash`
/// may be shorter than 32 bytes; it is zero padded.
#[allow(clippy::too_many_arguments)]
pub fn make_asset_create_txn(
    account: &str,
    note: &[u8],
    params: &SuggestedParams,
    total: u64,
    decimals: u32,
    default_frozen: bool,
    manager: &str,
    reserve: &str,
    freeze: &str,
    clawback: &str,
    unit_name: &str,
    asset_name: &str,
    url: &str,
    metadata_hash: &[u8],
) -> Result<Transaction, TransactionError> {
    if decimals > ASSET_MAX_NUMBER_OF_DECIMALS {
        return Err(TransactionError::DecimalsOutOfRange {
            decimals,
            max: ASSET_MAX_NUMBER_OF_DECIMALS,
        });
    }

    let manager = decode_optional_address("manager", manager)?;
    let reserve = decode_optional_address("reserve", reserve)?;
    let freeze = decode_optional_address("freeze", freeze)?;
    let clawback = decode_optional_address("clawback", clawback)?;

    check_len("asset name", asset_name.as_bytes(), ASSET_NAME_MAX_LEN)?;
    check_len("asset url", url.as_bytes(), ASSET_URL_MAX_LEN)?;
    check_len("asset unit name", unit_name.as_bytes(), ASSET_UNIT_NAME_MAX_LEN)?;
    check_len("asset metadata hash", metadata_hash, ASSET_METADATA_HASH_LEN)?;

    genesis_hash(params)?;
    let sender = decode_address("account", account)?;

    TransactionBuilder::new(params, sender)
        .note(note)
        .build(TransactionFields::AssetConfig(AssetConfigFields {
            asset_id: 0,
            params: AssetParams {
                total,
                decimals,
                default_frozen,
                unit_name: unit_name.to_string(),
                asset_name: asset_name.to_string(),
                url: url.to_string(),
                metadata_hash: Byte32::zero_padded(metadata_hash),
                manager,
                reserve,
                freeze,
                clawback,
            },
        }))
}

/// Build a reconfiguration of asset `index`'s management addresses.
///
/// Every blank address clears that role for good. With
/// `strict_empty_address_checking` a blank address is rejected before any
/// argument is decoded.
#[allow(clippy::too_many_arguments)]
pub fn make_asset_config_txn(
    account: &str,
    note: &[u8],
    params: &SuggestedParams,
    index: AssetIndex,
    manager: &str,
    reserve: &str,
    freeze: &str,
    clawback: &str,
    strict_empty_address_checking: bool,
) -> Result<Transaction, TransactionError> {
    if strict_empty_address_checking {
        let roles = [
            ("manager", manager),
            ("reserve", reserve),
            ("freeze", freeze),
            ("clawback", clawback),
        ];
        if let Some(&(field, _)) = roles.iter().find(|(_, text)| text.is_empty()) {
            return Err(TransactionError::StrictCheckViolation { field });
        }
    }

    let sender = decode_address("account", account)?;
    genesis_hash(params)?;
    let params_update = AssetParams {
        manager: decode_optional_address("manager", manager)?,
        reserve: decode_optional_address("reserve", reserve)?,
        freeze: decode_optional_address("freeze", freeze)?,
        clawback: decode_optional_address("clawback", clawback)?,
        ..Default::default()
    };

    TransactionBuilder::new(params, sender)
        .note(note)
        .build(TransactionFields::AssetConfig(AssetConfigFields {
            asset_id: index,
            params: params_update,
        }))
}

/// Build the destruction of asset `index`. Only the creator can destroy an
/// asset, and only while it holds the entire supply.
pub fn make_asset_destroy_txn(
    account: &str,
    note: &[u8],
    params: &SuggestedParams,
    index: AssetIndex,
) -> Result<Transaction, TransactionError> {
    make_asset_config_txn(account, note, params, index, "", "", "", "", false)
}

#[allow(clippy::too_many_arguments)]
fn transfer_asset(
    account: &str,
    recipient: &str,
    amount: u64,
    note: &[u8],
    params: &SuggestedParams,
    index: AssetIndex,
    close_assets_to: &str,
    revocation_target: Option<&str>,
) -> Result<Transaction, TransactionError> {
    let sender = decode_address("account", account)?;
    genesis_hash(params)?;
    let receiver = decode_address("recipient", recipient)?;
    let close_to = decode_optional_address("close_assets_to", close_assets_to)?;
    let asset_sender = match revocation_target {
        Some(target) => decode_address("target", target)?,
        None => Address::ZERO,
    };

    TransactionBuilder::new(params, sender)
        .note(note)
        .build(TransactionFields::AssetTransfer(AssetTransferFields {
            asset_id: index,
            amount,
            asset_sender,
            receiver,
            close_to,
        }))
}

/// Build a transfer of `amount` units of asset `index`.
///
/// The recipient must already have opted in to the asset. A non-empty
/// `close_assets_to` also opts the sender out, sending what remains there.
/// The fee is always size based.
#[allow(clippy::too_many_arguments)]
pub fn make_asset_transfer_txn(
    account: &str,
    recipient: &str,
    amount: u64,
    note: &[u8],
    params: &SuggestedParams,
    close_assets_to: &str,
    index: AssetIndex,
) -> Result<Transaction, TransactionError> {
    transfer_asset(account, recipient, amount, note, params, index, close_assets_to, None)
}

/// Build an opt-in to asset `index`: a zero-amount transfer to oneself.
pub fn make_asset_acceptance_txn(
    account: &str,
    note: &[u8],
    params: &SuggestedParams,
    index: AssetIndex,
) -> Result<Transaction, TransactionError> {
    transfer_asset(account, account, 0, note, params, index, "", None)
}

/// Build a clawback: `account` (the clawback address) moves `amount` units
/// of asset `index` from `target` to `recipient`. `target` is required.
#[allow(clippy::too_many_arguments)]
pub fn make_asset_revocation_txn(
    account: &str,
    target: &str,
    amount: u64,
    recipient: &str,
    note: &[u8],
    params: &SuggestedParams,
    index: AssetIndex,
) -> Result<Transaction, TransactionError> {
    transfer_asset(account, recipient, amount, note, params, index, "", Some(target))
}

/// Build a freeze (or unfreeze) of `target`'s holding of asset `index`.
pub fn make_asset_freeze_txn(
    account: &str,
    note: &[u8],
    params: &SuggestedParams,
    index: AssetIndex,
    target: &str,
    frozen: bool,
) -> Result<Transaction, TransactionError> {
    let sender = decode_address("account", account)?;
    genesis_hash(params)?;
    let target = decode_address("target", target)?;

    TransactionBuilder::new(params, sender)
        .note(note)
        .build(TransactionFields::AssetFreeze(AssetFreezeFields {
            asset_id: index,
            target,
            frozen,
        }))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
