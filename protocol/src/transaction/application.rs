//! Application call transactions.
//!
//! One general builder, [`make_application_call_txn`], plus a convenience
//! wrapper per on-completion action. State schemas are fixed when an
//! application is created, so only a create call (application id 0) may
//! carry them; on any other call they are dropped.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::builder::{Transaction, TransactionBuilder, TransactionFields};
use super::error::TransactionError;
use super::params::{decode_address, parse_accounts, parse_foreign_apps};
use super::types::{AppIndex, OnCompletion, StateSchema, SuggestedParams};
use crate::encoding::{b64, CanonicalMap, EncodeError};
use crate::identity::Address;

/// Fields of an application call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCallFields {
    /// Zero creates a new application.
    pub app_id: AppIndex,
    pub on_completion: OnCompletion,
    #[serde(with = "b64::list", default)]
    pub args: Vec<Vec<u8>>,
    #[serde(default)]
    pub accounts: Vec<Address>,
    #[serde(default)]
    pub foreign_apps: Vec<AppIndex>,
    #[serde(with = "b64", default)]
    pub approval_program: Vec<u8>,
    #[serde(with = "b64", default)]
    pub clear_program: Vec<u8>,
    #[serde(default)]
    pub global_schema: StateSchema,
    #[serde(default)]
    pub local_schema: StateSchema,
}

fn schema_map(schema: &StateSchema) -> Result<CanonicalMap, EncodeError> {
    let mut map = CanonicalMap::new();
    map.uint("nbs", schema.num_byte_slice)?
        .uint("nui", schema.num_uint)?;
    Ok(map)
}

impl ApplicationCallFields {
    pub(crate) fn write_canonical(&self, map: &mut CanonicalMap) -> Result<(), EncodeError> {
        map.bytes_list("apaa", &self.args)?
            .uint("apan", self.on_completion.as_u64())?
            .bytes("apap", &self.approval_program)?
            .address_list("apat", &self.accounts)?
            .uint_list("apfa", &self.foreign_apps)?
            .map("apgs", schema_map(&self.global_schema)?)?
            .uint("apid", self.app_id)?
            .map("apls", schema_map(&self.local_schema)?)?
            .bytes("apsu", &self.clear_program)?;
        Ok(())
    }
}

/// Build an application call with every field under the caller's control.
///
/// `accounts` are decoded in order; the first bad one fails the call. When
/// `app_id` is non-zero both schemas are replaced by the empty schema.
#[allow(clippy::too_many_arguments)]
pub fn make_application_call_txn(
    sender: &str,
    note: &[u8],
    params: &SuggestedParams,
    app_id: AppIndex,
    app_args: &[Vec<u8>],
    accounts: &[&str],
    foreign_apps: &[u64],
    on_completion: OnCompletion,
    approval_program: &[u8],
    clear_program: &[u8],
    global_schema: StateSchema,
    local_schema: StateSchema,
) -> Result<Transaction, TransactionError> {
    let sender = decode_address("sender", sender)?;
    let accounts = parse_accounts(accounts)?;
    let foreign_apps = parse_foreign_apps(foreign_apps);

    let (global_schema, local_schema) = if app_id == 0 {
        (global_schema, local_schema)
    } else {
        if !global_schema.is_empty() || !local_schema.is_empty() {
            debug!(app_id, "dropping state schemas on call to existing application");
        }
        (StateSchema::EMPTY, StateSchema::EMPTY)
    };

    TransactionBuilder::new(params, sender)
        .note(note)
        .build(TransactionFields::ApplicationCall(ApplicationCallFields {
            app_id,
            on_completion,
            args: app_args.to_vec(),
            accounts,
            foreign_apps,
            approval_program: approval_program.to_vec(),
            clear_program: clear_program.to_vec(),
            global_schema,
            local_schema,
        }))
}

/// Create an application. `on_completion` is usually `NoOp`, or `OptIn` to
/// opt the creator in at the same time.
#[allow(clippy::too_many_arguments)]
pub fn make_application_create_txn(
    sender: &str,
    note: &[u8],
    params: &SuggestedParams,
    on_completion: OnCompletion,
    approval_program: &[u8],
    clear_program: &[u8],
    global_schema: StateSchema,
    local_schema: StateSchema,
    app_args: &[Vec<u8>],
    accounts: &[&str],
    foreign_apps: &[u64],
) -> Result<Transaction, TransactionError> {
    make_application_call_txn(
        sender,
        note,
        params,
        0,
        app_args,
        accounts,
        foreign_apps,
        on_completion,
        approval_program,
        clear_program,
        global_schema,
        local_schema,
    )
}

/// Replace the programs of application `app_id`.
#[allow(clippy::too_many_arguments)]
pub fn make_application_update_txn(
    sender: &str,
    note: &[u8],
    params: &SuggestedParams,
    app_id: AppIndex,
    app_args: &[Vec<u8>],
    accounts: &[&str],
    foreign_apps: &[u64],
    approval_program: &[u8],
    clear_program: &[u8],
) -> Result<Transaction, TransactionError> {
    make_application_call_txn(
        sender,
        note,
        params,
        app_id,
        app_args,
        accounts,
        foreign_apps,
        OnCompletion::UpdateApplication,
        approval_program,
        clear_program,
        StateSchema::EMPTY,
        StateSchema::EMPTY,
    )
}

macro_rules! simple_call {
    ($(#[$doc:meta])* $name:ident, $on_completion:expr) => {
        $(#[$doc])*
        pub fn $name(
            sender: &str,
            note: &[u8],
            params: &SuggestedParams,
            app_id: AppIndex,
            app_args: &[Vec<u8>],
            accounts: &[&str],
            foreign_apps: &[u64],
        ) -> Result<Transaction, TransactionError> {
            make_application_call_txn(
                sender,
                note,
                params,
                app_id,
                app_args,
                accounts,
                foreign_apps,
                $on_completion,
                &[],
                &[],
                StateSchema::EMPTY,
                StateSchema::EMPTY,
            )
        }
    };
}

simple_call!(
    /// Delete application `app_id`.
    make_application_delete_txn,
    OnCompletion::DeleteApplication
);
simple_call!(
    /// Opt in to application `app_id`, allocating the sender's local state.
    make_application_opt_in_txn,
    OnCompletion::OptIn
);
simple_call!(
    /// Close out of application `app_id`, releasing the sender's local state.
    make_application_close_out_txn,
    OnCompletion::CloseOut
);
simple_call!(
    /// Clear the sender's local state for application `app_id`. The
    /// application cannot reject this.
    make_application_clear_state_txn,
    OnCompletion::ClearState
);
simple_call!(
    /// Call application `app_id` without any on-completion side effect.
    make_application_no_op_txn,
    OnCompletion::NoOp
);
