// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # algotx
//!
//! Entry point for the `algotx` binary. Parses CLI arguments, initializes
//! logging, loads suggested params, runs one library builder and prints a
//! JSON report on stdout.
//!
//! - `pay`, `keyreg`                       — payments and key registration
//! - `asset-*`                             — asset lifecycle
//! - `app-call`                            — application create and calls
//! - `address`                             — address validation

mod cli;
mod logging;
mod report;

use std::path::Path;

use anyhow::{bail, Context, Result};
use base64::prelude::{Engine as _, BASE64_STANDARD};
use clap::Parser;
use serde::Serialize;

use algotx::crypto::Keypair;
use algotx::identity::Address;
use algotx::transaction::{
    make_application_call_txn, make_asset_acceptance_txn, make_asset_config_txn,
    make_asset_create_txn, make_asset_destroy_txn, make_asset_freeze_txn,
    make_asset_revocation_txn, make_asset_transfer_txn, make_key_reg_txn, make_payment_txn,
    StateSchema, SuggestedParams, Transaction,
};

use cli::{AlgotxCli, AppCallArgs, CommonArgs, Commands};
use report::{AddressReport, TransactionReport};

fn main() -> Result<()> {
    let cli = AlgotxCli::parse();
    logging::init_logging(&cli.log, cli.log_format);

    match &cli.command {
        Commands::Address(args) => {
            let address = Address::from_string(&args.address)
                .with_context(|| format!("invalid address '{}'", args.address))?;
            print_json(&AddressReport {
                address: address.to_string(),
                public_key: hex::encode(address.as_bytes()),
            })
        }
        command => {
            let tx = build(command)?;
            let signer = match command.common() {
                Some(common) => load_signer(common)?,
                None => None,
            };
            print_json(&TransactionReport::new(tx, signer.as_ref())?)
        }
    }
}

/// Run the builder selected by `command`.
fn build(command: &Commands) -> Result<Transaction> {
    let tx = match command {
        Commands::Pay(a) => {
            let params = load_params(&a.common.params)?;
            make_payment_txn(
                &a.common.from,
                &a.to,
                a.amount,
                a.common.note.as_bytes(),
                &a.close_to,
                &params,
            )?
        }
        Commands::Keyreg(a) => {
            let params = load_params(&a.common.params)?;
            make_key_reg_txn(
                &a.common.from,
                a.common.note.as_bytes(),
                &params,
                &a.vote_key,
                &a.selection_key,
                a.vote_first,
                a.vote_last,
                a.key_dilution,
            )?
        }
        Commands::AssetCreate(a) => {
            let params = load_params(&a.common.params)?;
            make_asset_create_txn(
                &a.common.from,
                a.common.note.as_bytes(),
                &params,
                a.total,
                a.decimals,
                a.default_frozen,
                &a.manager,
                &a.reserve,
                &a.freeze,
                &a.clawback,
                &a.unit_name,
                &a.asset_name,
                &a.url,
                a.metadata_hash.as_bytes(),
            )?
        }
        Commands::AssetConfig(a) => {
            let params = load_params(&a.common.params)?;
            make_asset_config_txn(
                &a.common.from,
                a.common.note.as_bytes(),
                &params,
                a.asset_id,
                &a.manager,
                &a.reserve,
                &a.freeze,
                &a.clawback,
                a.strict,
            )?
        }
        Commands::AssetDestroy(a) => {
            let params = load_params(&a.common.params)?;
            make_asset_destroy_txn(&a.common.from, a.common.note.as_bytes(), &params, a.asset_id)?
        }
        Commands::AssetSend(a) => {
            let params = load_params(&a.common.params)?;
            make_asset_transfer_txn(
                &a.common.from,
                &a.to,
                a.amount,
                a.common.note.as_bytes(),
                &params,
                &a.close_to,
                a.asset_id,
            )?
        }
        Commands::AssetOptin(a) => {
            let params = load_params(&a.common.params)?;
            make_asset_acceptance_txn(&a.common.from, a.common.note.as_bytes(), &params, a.asset_id)?
        }
        Commands::AssetRevoke(a) => {
            let params = load_params(&a.common.params)?;
            make_asset_revocation_txn(
                &a.common.from,
                &a.target,
                a.amount,
                &a.to,
                a.common.note.as_bytes(),
                &params,
                a.asset_id,
            )?
        }
        Commands::AssetFreeze(a) => {
            let params = load_params(&a.common.params)?;
            make_asset_freeze_txn(
                &a.common.from,
                a.common.note.as_bytes(),
                &params,
                a.asset_id,
                &a.target,
                a.frozen,
            )?
        }
        Commands::AppCall(a) => app_call(a)?,
        Commands::Address(_) => bail!("the address subcommand does not build a transaction"),
    };

    tracing::info!(id = %tx.id()?, fee = tx.fee(), "transaction built");
    Ok(tx)
}

fn app_call(a: &AppCallArgs) -> Result<Transaction> {
    let params = load_params(&a.common.params)?;
    let app_args = a
        .args
        .iter()
        .enumerate()
        .map(|(i, arg)| {
            BASE64_STANDARD
                .decode(arg)
                .with_context(|| format!("application argument {i} is not valid base64"))
        })
        .collect::<Result<Vec<_>>>()?;
    let accounts: Vec<&str> = a.accounts.iter().map(String::as_str).collect();
    let approval = read_program(a.approval.as_deref())?;
    let clear = read_program(a.clear.as_deref())?;

    Ok(make_application_call_txn(
        &a.common.from,
        a.common.note.as_bytes(),
        &params,
        a.app_id,
        &app_args,
        &accounts,
        &a.foreign_apps,
        a.on_complete.into(),
        &approval,
        &clear,
        StateSchema::new(a.global_ints, a.global_bytes),
        StateSchema::new(a.local_ints, a.local_bytes),
    )?)
}

fn read_program(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("failed to read program {}", path.display())),
        None => Ok(Vec::new()),
    }
}

/// Read suggested params from a JSON file.
fn load_params(path: &Path) -> Result<SuggestedParams> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read suggested params {}", path.display()))?;
    let params: SuggestedParams = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse suggested params {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        fee = params.fee,
        flat_fee = params.flat_fee,
        first = params.first_round_valid,
        last = params.last_round_valid,
        "loaded suggested params"
    );
    Ok(params)
}

fn load_signer(common: &CommonArgs) -> Result<Option<Keypair>> {
    common
        .signing_key
        .as_deref()
        .map(|hex_seed| Keypair::from_hex(hex_seed).context("invalid signing key"))
        .transpose()
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    println!("{json}");
    Ok(())
}
