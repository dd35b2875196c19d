//! JSON report printed for every built transaction.

use anyhow::{Context, Result};
use base64::prelude::{Engine as _, BASE64_STANDARD};
use serde::Serialize;

use algotx::crypto::Keypair;
use algotx::transaction::{sign_transaction, Transaction};

#[derive(Debug, Serialize)]
pub struct TransactionReport {
    pub id: String,
    pub fee: u64,
    /// Base64 canonical encoding of the unsigned transaction.
    pub encoded: String,
    /// Base64 canonical encoding of the signed transaction, when a signing
    /// key was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signed: Option<String>,
    pub transaction: Transaction,
}

impl TransactionReport {
    pub fn new(tx: Transaction, signer: Option<&Keypair>) -> Result<Self> {
        let id = tx.id().context("failed to compute transaction id")?;
        let encoded = tx.encode().context("failed to encode transaction")?;

        let signed = match signer {
            Some(keypair) => {
                let signed = sign_transaction(tx.clone(), keypair, &keypair.address())
                    .context("failed to sign transaction")?;
                let bytes = signed.encode().context("failed to encode signed transaction")?;
                Some(BASE64_STANDARD.encode(bytes))
            }
            None => None,
        };

        Ok(Self {
            id,
            fee: tx.fee(),
            encoded: BASE64_STANDARD.encode(encoded),
            signed,
            transaction: tx,
        })
    }
}

/// Output of the `address` subcommand.
#[derive(Debug, Serialize)]
pub struct AddressReport {
    pub address: String,
    pub public_key: String,
}
