//! Transaction signing.
//!
//! Signing is a separate step from building because the key may not be
//! available at construction time (wallet daemon, hardware device, another
//! party of a multisig). [`TransactionSigner`] is the capability the rest of
//! the crate needs; [`Keypair`] is the in-process implementation.
//!
//! Every signature covers [`Transaction::bytes_to_sign`], i.e. the
//! canonical encoding behind the `"TX"` domain prefix.

use thiserror::Error;
use tracing::debug;

use super::builder::Transaction;
use crate::crypto::keys::{self, Keypair, Signature};
use crate::encoding::{CanonicalEncode, CanonicalMap, EncodeError};
use crate::identity::{Address, MultisigAccount, MultisigError};

/// Errors raised while signing.
#[derive(Debug, Error)]
pub enum SignerError {
    /// The signer holds no key for the requested address.
    #[error("signer has no key for {0}")]
    UnknownKey(Address),

    /// The key is not one of the multisig account's public keys.
    #[error("{0} is not a member of the multisig account")]
    KeyNotInMultisig(Address),

    /// Two multisig aggregates describe different accounts.
    #[error("multisig aggregates belong to different accounts")]
    MultisigMismatch,

    #[error("failed to encode transaction: {0}")]
    Encoding(#[from] EncodeError),
}

/// A capability that can sign transactions.
pub trait TransactionSigner {
    /// Sign `tx` with the key identified by `key_ref`.
    fn sign(&self, tx: &Transaction, key_ref: &Address) -> Result<Signature, SignerError>;

    /// Add the signature of `public_key` to a multisig aggregate.
    fn sign_partial(
        &self,
        tx: &Transaction,
        public_key: &Address,
        partial: MultisigSig,
    ) -> Result<MultisigSig, SignerError>;
}

impl TransactionSigner for Keypair {
    fn sign(&self, tx: &Transaction, key_ref: &Address) -> Result<Signature, SignerError> {
        if *key_ref != self.address() {
            return Err(SignerError::UnknownKey(*key_ref));
        }
        Ok(Keypair::sign(self, &tx.bytes_to_sign()?))
    }

    fn sign_partial(
        &self,
        tx: &Transaction,
        public_key: &Address,
        mut partial: MultisigSig,
    ) -> Result<MultisigSig, SignerError> {
        let signature = TransactionSigner::sign(self, tx, public_key)?;
        let slot = partial
            .subsigs
            .iter_mut()
            .find(|s| s.public_key == *public_key)
            .ok_or(SignerError::KeyNotInMultisig(*public_key))?;
        slot.signature = Some(signature);
        Ok(partial)
    }
}

// ---------------------------------------------------------------------------
// Multisig
// ---------------------------------------------------------------------------

/// One slot of a multisig aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigSubsig {
    pub public_key: Address,
    pub signature: Option<Signature>,
}

/// A (possibly partial) multisig signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigSig {
    pub version: u8,
    pub threshold: u8,
    pub subsigs: Vec<MultisigSubsig>,
}

impl MultisigAccount {
    /// An aggregate for this account with every slot unsigned.
    pub fn blank_sig(&self) -> MultisigSig {
        MultisigSig {
            version: self.version(),
            threshold: self.threshold(),
            subsigs: self
                .public_keys()
                .iter()
                .map(|pk| MultisigSubsig {
                    public_key: *pk,
                    signature: None,
                })
                .collect(),
        }
    }
}

impl MultisigSig {
    /// The account this aggregate signs for.
    pub fn account(&self) -> Result<MultisigAccount, MultisigError> {
        MultisigAccount::new(
            self.version,
            self.threshold,
            self.subsigs.iter().map(|s| s.public_key).collect(),
        )
    }

    pub fn signature_count(&self) -> usize {
        self.subsigs.iter().filter(|s| s.signature.is_some()).count()
    }

    /// Returns `true` once at least `threshold` slots are signed.
    pub fn is_complete(&self) -> bool {
        self.signature_count() >= usize::from(self.threshold)
    }

    /// Combine two partial aggregates of the same account.
    ///
    /// Where both carry a signature for a slot, `self`'s is kept.
    pub fn merge(&self, other: &MultisigSig) -> Result<MultisigSig, SignerError> {
        let same_account = self.version == other.version
            && self.threshold == other.threshold
            && self.subsigs.len() == other.subsigs.len()
            && self
                .subsigs
                .iter()
                .zip(&other.subsigs)
                .all(|(a, b)| a.public_key == b.public_key);
        if !same_account {
            return Err(SignerError::MultisigMismatch);
        }

        let subsigs = self
            .subsigs
            .iter()
            .zip(&other.subsigs)
            .map(|(a, b)| MultisigSubsig {
                public_key: a.public_key,
                signature: a.signature.or(b.signature),
            })
            .collect();
        Ok(MultisigSig {
            version: self.version,
            threshold: self.threshold,
            subsigs,
        })
    }

    /// Check that at least `threshold` slots carry a valid signature over
    /// `message`.
    pub fn verify(&self, message: &[u8]) -> bool {
        let valid = self
            .subsigs
            .iter()
            .filter(|s| {
                s.signature
                    .as_ref()
                    .is_some_and(|sig| keys::verify(&s.public_key, message, sig))
            })
            .count();
        valid >= usize::from(self.threshold)
    }
}

impl CanonicalEncode for MultisigSig {
    fn to_canonical_map(&self) -> Result<CanonicalMap, EncodeError> {
        let subsigs = self
            .subsigs
            .iter()
            .map(|s| {
                let mut slot = CanonicalMap::new();
                slot.address("pk", &s.public_key)?;
                if let Some(sig) = &s.signature {
                    slot.bytes("s", sig.as_bytes())?;
                }
                Ok(slot)
            })
            .collect::<Result<Vec<_>, EncodeError>>()?;

        let mut map = CanonicalMap::new();
        map.map_list("subsig", subsigs)?
            .uint("thr", u64::from(self.threshold))?
            .uint("v", u64::from(self.version))?;
        Ok(map)
    }
}

// ---------------------------------------------------------------------------
// SignedTransaction
// ---------------------------------------------------------------------------

/// A transaction together with its authorization, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction {
    pub transaction: Transaction,
    pub signature: Option<Signature>,
    pub multisig: Option<MultisigSig>,
}

impl SignedTransaction {
    pub fn from_signature(transaction: Transaction, signature: Signature) -> Self {
        Self {
            transaction,
            signature: Some(signature),
            multisig: None,
        }
    }

    pub fn from_multisig(transaction: Transaction, multisig: MultisigSig) -> Self {
        Self {
            transaction,
            signature: None,
            multisig: Some(multisig),
        }
    }

    /// The id of the wrapped transaction. Signing does not change it.
    pub fn id(&self) -> Result<String, EncodeError> {
        self.transaction.id()
    }

    /// Canonical submission bytes.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        self.to_canonical_bytes()
    }

    /// Check the authorization against `authorizer`: the sender, or the
    /// account the sender was rekeyed to.
    pub fn verify(&self, authorizer: &Address) -> Result<bool, EncodeError> {
        let message = self.transaction.bytes_to_sign()?;
        if let Some(sig) = &self.signature {
            return Ok(keys::verify(authorizer, &message, sig));
        }
        match &self.multisig {
            Some(msig) => Ok(msig
                .account()
                .is_ok_and(|account| account.address() == *authorizer)
                && msig.verify(&message)),
            None => Ok(false),
        }
    }
}

impl CanonicalEncode for SignedTransaction {
    fn to_canonical_map(&self) -> Result<CanonicalMap, EncodeError> {
        let mut map = CanonicalMap::new();
        if let Some(msig) = &self.multisig {
            map.map("msig", msig.to_canonical_map()?)?;
        }
        if let Some(sig) = &self.signature {
            map.bytes("sig", sig.as_bytes())?;
        }
        map.map("txn", self.transaction.to_canonical_map()?)?;
        Ok(map)
    }
}

/// Sign `tx` with the single key `key_ref`.
pub fn sign_transaction(
    tx: Transaction,
    signer: &impl TransactionSigner,
    key_ref: &Address,
) -> Result<SignedTransaction, SignerError> {
    let signature = signer.sign(&tx, key_ref)?;
    debug!(key = %key_ref, tx_type = %tx.tx_type(), "signed transaction");
    Ok(SignedTransaction::from_signature(tx, signature))
}

/// Start (or continue) a multisig: add `public_key`'s signature to a blank
/// aggregate for `account`.
pub fn sign_multisig_transaction(
    tx: Transaction,
    signer: &impl TransactionSigner,
    account: &MultisigAccount,
    public_key: &Address,
) -> Result<SignedTransaction, SignerError> {
    if !account.public_keys().contains(public_key) {
        return Err(SignerError::KeyNotInMultisig(*public_key));
    }
    let msig = signer.sign_partial(&tx, public_key, account.blank_sig())?;
    debug!(
        key = %public_key,
        signatures = msig.signature_count(),
        threshold = msig.threshold,
        "added multisig signature"
    );
    Ok(SignedTransaction::from_multisig(tx, msig))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
