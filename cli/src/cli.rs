//! # CLI Interface
//!
//! Defines the command-line argument structure for `algotx` using `clap`
//! derive. One subcommand per transaction builder, plus `address` for
//! checking a single address.

use std::path::PathBuf;

use algotx::transaction::OnCompletion;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::logging::LogFormat;

/// Build Algorand-style transactions from the command line.
///
/// Every builder subcommand reads suggested params from a JSON file, builds
/// the transaction, and prints a JSON report (transaction, id, fee and
/// base64 canonical bytes) on stdout.
#[derive(Parser, Debug)]
#[command(name = "algotx", about, version, propagate_version = true)]
pub struct AlgotxCli {
    /// Default log filter, used when RUST_LOG is not set.
    #[arg(long, global = true, env = "ALGOTX_LOG", default_value = "warn")]
    pub log: String,

    /// Log output format on stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send microalgos.
    Pay(PayArgs),
    /// Register a participation key.
    Keyreg(KeyregArgs),
    /// Create a new asset.
    AssetCreate(AssetCreateArgs),
    /// Change an asset's management addresses. Blank addresses clear the role.
    AssetConfig(AssetConfigArgs),
    /// Destroy an asset.
    AssetDestroy(AssetIdArgs),
    /// Transfer units of an asset.
    AssetSend(AssetSendArgs),
    /// Opt in to an asset.
    AssetOptin(AssetIdArgs),
    /// Claw back units of an asset from another account.
    AssetRevoke(AssetRevokeArgs),
    /// Freeze or unfreeze an account's holding of an asset.
    AssetFreeze(AssetFreezeArgs),
    /// Create or call an application.
    AppCall(AppCallArgs),
    /// Validate an address and print its public key.
    Address(AddressArgs),
}

impl Commands {
    /// The shared builder arguments; `None` for `address`.
    pub fn common(&self) -> Option<&CommonArgs> {
        match self {
            Commands::Pay(a) => Some(&a.common),
            Commands::Keyreg(a) => Some(&a.common),
            Commands::AssetCreate(a) => Some(&a.common),
            Commands::AssetConfig(a) => Some(&a.common),
            Commands::AssetDestroy(a) | Commands::AssetOptin(a) => Some(&a.common),
            Commands::AssetSend(a) => Some(&a.common),
            Commands::AssetRevoke(a) => Some(&a.common),
            Commands::AssetFreeze(a) => Some(&a.common),
            Commands::AppCall(a) => Some(&a.common),
            Commands::Address(_) => None,
        }
    }
}

/// Arguments shared by every builder subcommand.
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// JSON file holding the node's suggested params.
    #[arg(long, env = "ALGOTX_PARAMS")]
    pub params: PathBuf,

    /// Sending account.
    #[arg(long)]
    pub from: String,

    /// UTF-8 note attached to the transaction.
    #[arg(long, default_value = "")]
    pub note: String,

    /// Hex-encoded Ed25519 seed. When given, the report also carries the
    /// signed transaction.
    #[arg(long, env = "ALGOTX_SIGNING_KEY", hide_env_values = true)]
    pub signing_key: Option<String>,
}

#[derive(Args, Debug)]
pub struct PayArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Receiving account.
    #[arg(long)]
    pub to: String,

    /// Amount in microalgos.
    #[arg(long)]
    pub amount: u64,

    /// Close the sender's account, sending the remainder here.
    #[arg(long, default_value = "")]
    pub close_to: String,
}

#[derive(Args, Debug)]
pub struct KeyregArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Base64 root participation public key.
    #[arg(long)]
    pub vote_key: String,

    /// Base64 VRF public key.
    #[arg(long)]
    pub selection_key: String,

    #[arg(long)]
    pub vote_first: u64,

    #[arg(long)]
    pub vote_last: u64,

    #[arg(long)]
    pub key_dilution: u64,
}

#[derive(Args, Debug)]
pub struct AssetCreateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Total number of base units.
    #[arg(long)]
    pub total: u64,

    #[arg(long, default_value_t = 0)]
    pub decimals: u32,

    /// Holdings start frozen.
    #[arg(long)]
    pub default_frozen: bool,

    #[arg(long, default_value = "")]
    pub manager: String,

    #[arg(long, default_value = "")]
    pub reserve: String,

    #[arg(long, default_value = "")]
    pub freeze: String,

    #[arg(long, default_value = "")]
    pub clawback: String,

    #[arg(long, default_value = "")]
    pub unit_name: String,

    #[arg(long, default_value = "")]
    pub asset_name: String,

    #[arg(long, default_value = "")]
    pub url: String,

    /// Up to 32 bytes of metadata hash, taken verbatim.
    #[arg(long, default_value = "")]
    pub metadata_hash: String,
}

#[derive(Args, Debug)]
pub struct AssetConfigArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long)]
    pub asset_id: u64,

    #[arg(long, default_value = "")]
    pub manager: String,

    #[arg(long, default_value = "")]
    pub reserve: String,

    #[arg(long, default_value = "")]
    pub freeze: String,

    #[arg(long, default_value = "")]
    pub clawback: String,

    /// Refuse blank management addresses instead of clearing the roles.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct AssetIdArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long)]
    pub asset_id: u64,
}

#[derive(Args, Debug)]
pub struct AssetSendArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long)]
    pub asset_id: u64,

    #[arg(long)]
    pub to: String,

    #[arg(long)]
    pub amount: u64,

    /// Opt the sender out, sending what remains here.
    #[arg(long, default_value = "")]
    pub close_to: String,
}

#[derive(Args, Debug)]
pub struct AssetRevokeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long)]
    pub asset_id: u64,

    /// Account the units are taken from.
    #[arg(long)]
    pub target: String,

    /// Account the units are given to.
    #[arg(long)]
    pub to: String,

    #[arg(long)]
    pub amount: u64,
}

#[derive(Args, Debug)]
pub struct AssetFreezeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    #[arg(long)]
    pub asset_id: u64,

    #[arg(long)]
    pub target: String,

    /// New freeze state.
    #[arg(long, action = clap::ArgAction::Set, default_value_t = true)]
    pub frozen: bool,
}

/// On-completion action of an application call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OnCompleteArg {
    Noop,
    Optin,
    Closeout,
    Clearstate,
    Update,
    Delete,
}

impl From<OnCompleteArg> for OnCompletion {
    fn from(arg: OnCompleteArg) -> Self {
        match arg {
            OnCompleteArg::Noop => OnCompletion::NoOp,
            OnCompleteArg::Optin => OnCompletion::OptIn,
            OnCompleteArg::Closeout => OnCompletion::CloseOut,
            OnCompleteArg::Clearstate => OnCompletion::ClearState,
            OnCompleteArg::Update => OnCompletion::UpdateApplication,
            OnCompleteArg::Delete => OnCompletion::DeleteApplication,
        }
    }
}

#[derive(Args, Debug)]
pub struct AppCallArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Application to call; 0 creates a new one.
    #[arg(long, default_value_t = 0)]
    pub app_id: u64,

    #[arg(long, value_enum, default_value_t = OnCompleteArg::Noop)]
    pub on_complete: OnCompleteArg,

    /// Base64 application argument. Repeatable.
    #[arg(long = "arg")]
    pub args: Vec<String>,

    /// Account the program may access. Repeatable.
    #[arg(long = "account")]
    pub accounts: Vec<String>,

    /// Application the program may read. Repeatable.
    #[arg(long = "foreign-app")]
    pub foreign_apps: Vec<u64>,

    /// File holding the compiled approval program.
    #[arg(long)]
    pub approval: Option<PathBuf>,

    /// File holding the compiled clear-state program.
    #[arg(long)]
    pub clear: Option<PathBuf>,

    #[arg(long, default_value_t = 0)]
    pub global_ints: u64,

    #[arg(long, default_value_t = 0)]
    pub global_bytes: u64,

    #[arg(long, default_value_t = 0)]
    pub local_ints: u64,

    #[arg(long, default_value_t = 0)]
    pub local_bytes: u64,
}

#[derive(Args, Debug)]
pub struct AddressArgs {
    /// Address to validate.
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        AlgotxCli::command().debug_assert();
    }

    #[test]
    fn parses_pay() {
        let cli = AlgotxCli::try_parse_from([
            "algotx", "pay", "--params", "sp.json", "--from", "A", "--to", "B", "--amount", "5",
        ])
        .unwrap();
        match cli.command {
            Commands::Pay(args) => {
                assert_eq!(args.common.params, PathBuf::from("sp.json"));
                assert_eq!(args.amount, 5);
                assert!(args.close_to.is_empty());
                assert!(args.common.note.is_empty());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_repeated_app_arguments() {
        let cli = AlgotxCli::try_parse_from([
            "algotx", "app-call", "--params", "sp.json", "--from", "A", "--app-id", "9",
            "--on-complete", "optin", "--account", "X", "--account", "Y", "--foreign-app", "3",
        ])
        .unwrap();
        match cli.command {
            Commands::AppCall(args) => {
                assert_eq!(args.app_id, 9);
                assert_eq!(OnCompletion::from(args.on_complete), OnCompletion::OptIn);
                assert_eq!(args.accounts, vec!["X", "Y"]);
                assert_eq!(args.foreign_apps, vec![3]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn freeze_flag_takes_a_value() {
        let cli = AlgotxCli::try_parse_from([
            "algotx", "asset-freeze", "--params", "sp.json", "--from", "A", "--asset-id", "1",
            "--target", "T", "--frozen", "false",
        ])
        .unwrap();
        match cli.command {
            Commands::AssetFreeze(args) => assert!(!args.frozen),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
