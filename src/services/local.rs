//! Store-backed implementations of the service facades.
//!
//! These simulate the REST backend against a [RecordStore]: records are kept
//! in wire form and pass through [crate::wire] on every operation, so the
//! caller sees the same canonical rows whichever backend is wired up. The
//! account and transaction facades share one store handle, which lets
//! account removal cascade to the account's transactions and lets
//! transaction writes reprice the owning account's balance.

use std::sync::{Arc, Mutex};

use serde_json::{Value, json};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use uuid::Uuid;

use crate::{
    Error,
    models::{Account, AccountDraft, AccountPatch, Transaction, TransactionDraft, TransactionPatch},
    query::{self, Page, TransactionQuery},
    storage::{ACCOUNTS_KEY, RecordStore, TRANSACTIONS_KEY},
    wire,
};

use super::{AccountService, TransactionService};

/// Stores account records in a shared [RecordStore].
#[derive(Debug, Clone)]
pub struct LocalAccountService<S> {
    store: Arc<Mutex<S>>,
}

impl<S: RecordStore> LocalAccountService<S> {
    /// Create a facade over `store`.
    ///
    /// Pass a clone of the same handle to [LocalTransactionService] so that
    /// removing an account also removes its transactions.
    pub fn new(store: Arc<Mutex<S>>) -> Self {
        Self { store }
    }
}

impl<S: RecordStore> AccountService for LocalAccountService<S> {
    async fn list(&self) -> Result<Vec<Account>, Error> {
        let store = self.store.lock().unwrap();
        let records = store.load(ACCOUNTS_KEY)?;

        Ok(wire::account::list_to_canonical(&records))
    }

    async fn create(&mut self, draft: AccountDraft) -> Result<Account, Error> {
        draft.validate()?;

        let mut record = wire::account::draft_to_wire(&draft);
        record["id"] = json!(generate_id("acc"));

        let mut store = self.store.lock().unwrap();
        let mut records = store.load(ACCOUNTS_KEY)?;
        records.push(record.clone());
        store.save(ACCOUNTS_KEY, &records)?;

        tracing::debug!("created account {}", record["id"]);

        canonical_account(&record)
    }

    async fn update(&mut self, id: &str, patch: AccountPatch) -> Result<Account, Error> {
        patch.validate()?;

        let mut store = self.store.lock().unwrap();
        let mut records = store.load(ACCOUNTS_KEY)?;
        let record = records
            .iter_mut()
            .find(|record| wire::account::record_id(record).as_deref() == Some(id))
            .ok_or(Error::UpdateMissingAccount)?;

        merge_patch(record, wire::account::patch_to_wire(&patch));
        let updated = record.clone();
        store.save(ACCOUNTS_KEY, &records)?;

        canonical_account(&updated)
    }

    async fn remove(&mut self, id: &str) -> Result<(), Error> {
        let mut store = self.store.lock().unwrap();
        let mut records = store.load(ACCOUNTS_KEY)?;
        let position = records
            .iter()
            .position(|record| wire::account::record_id(record).as_deref() == Some(id))
            .ok_or(Error::DeleteMissingAccount)?;

        records.remove(position);
        store.save(ACCOUNTS_KEY, &records)?;

        // Cascade: transactions referencing the account go with it.
        let transactions = store.load(TRANSACTIONS_KEY)?;
        let kept: Vec<Value> = transactions
            .into_iter()
            .filter(|record| {
                wire::transaction::account_reference_of(record).as_deref() != Some(id)
            })
            .collect();
        store.save(TRANSACTIONS_KEY, &kept)?;

        tracing::debug!("deleted account {id} and its transactions");

        Ok(())
    }
}

/// Stores transaction records in a shared [RecordStore].
#[derive(Debug, Clone)]
pub struct LocalTransactionService<S> {
    store: Arc<Mutex<S>>,
}

impl<S: RecordStore> LocalTransactionService<S> {
    /// Create a facade over `store`.
    pub fn new(store: Arc<Mutex<S>>) -> Self {
        Self { store }
    }
}

impl<S: RecordStore> TransactionService for LocalTransactionService<S> {
    async fn list(&self, query: &TransactionQuery) -> Result<Page<Transaction>, Error> {
        let store = self.store.lock().unwrap();
        let records = store.load(TRANSACTIONS_KEY)?;
        let rows = wire::transaction::list_to_canonical(&records);

        Ok(query::apply(&rows, query))
    }

    async fn create(&mut self, draft: TransactionDraft) -> Result<Transaction, Error> {
        draft.validate()?;

        let mut store = self.store.lock().unwrap();

        let accounts = store.load(ACCOUNTS_KEY)?;
        if !accounts
            .iter()
            .any(|record| wire::account::record_id(record).as_deref() == Some(draft.account_id.as_str()))
        {
            return Err(Error::Validation("the account does not exist".to_owned()));
        }

        let mut record = wire::transaction::draft_to_wire(&draft);
        record["id"] = json!(generate_id("txn"));
        record["created_at"] = json!(timestamp());

        let mut records = store.load(TRANSACTIONS_KEY)?;
        records.push(record.clone());
        store.save(TRANSACTIONS_KEY, &records)?;

        adjust_account_balance(&mut *store, &draft.account_id, draft.signed_amount())?;

        tracing::debug!("created transaction {}", record["id"]);

        canonical_transaction(&record)
    }

    async fn update(&mut self, id: &str, patch: TransactionPatch) -> Result<Transaction, Error> {
        patch.validate()?;

        let mut store = self.store.lock().unwrap();
        let mut records = store.load(TRANSACTIONS_KEY)?;
        let record = records
            .iter_mut()
            .find(|record| wire::transaction::record_id(record).as_deref() == Some(id))
            .ok_or(Error::UpdateMissingTransaction)?;

        let before = wire::transaction::to_canonical(record);
        merge_patch(record, wire::transaction::patch_to_wire(&patch));
        let updated = canonical_transaction(record)?;

        store.save(TRANSACTIONS_KEY, &records)?;

        // Reprice: revert the old effect on the old account, apply the new
        // effect on the (possibly different) new account.
        if let Some(before) = before {
            adjust_account_balance(&mut *store, &before.account_id, -before.amount)?;
        }
        adjust_account_balance(&mut *store, &updated.account_id, updated.amount)?;

        Ok(updated)
    }

    async fn remove(&mut self, id: &str) -> Result<(), Error> {
        let mut store = self.store.lock().unwrap();
        let mut records = store.load(TRANSACTIONS_KEY)?;
        let position = records
            .iter()
            .position(|record| wire::transaction::record_id(record).as_deref() == Some(id))
            .ok_or(Error::DeleteMissingTransaction)?;

        let removed = records.remove(position);
        store.save(TRANSACTIONS_KEY, &records)?;

        if let Some(removed) = wire::transaction::to_canonical(&removed) {
            adjust_account_balance(&mut *store, &removed.account_id, -removed.amount)?;
        }

        tracing::debug!("deleted transaction {id}");

        Ok(())
    }
}

/// Generate a prefixed identifier for a locally created record.
fn generate_id(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

/// The creation timestamp stamped onto locally created records.
fn timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .expect("formatting the current time as RFC 3339 cannot fail")
}

/// Overlay the supplied patch fields onto a stored wire record.
fn merge_patch(record: &mut Value, patch: Value) {
    if let (Some(record), Value::Object(patch)) = (record.as_object_mut(), patch) {
        for (key, value) in patch {
            record.insert(key, value);
        }
    }
}

/// Add `delta` to the stored balance of `account_id`.
///
/// Transactions may reference accounts that no longer exist; those leave
/// every balance untouched.
fn adjust_account_balance<S: RecordStore>(
    store: &mut S,
    account_id: &str,
    delta: f64,
) -> Result<(), Error> {
    let mut accounts = store.load(ACCOUNTS_KEY)?;
    let Some(record) = accounts
        .iter_mut()
        .find(|record| wire::account::record_id(record).as_deref() == Some(account_id))
    else {
        tracing::debug!("no account {account_id} to reprice");
        return Ok(());
    };

    let balance = record.get("balance").and_then(crate::wire::number).unwrap_or(0.0);
    record["balance"] = json!(balance + delta);
    store.save(ACCOUNTS_KEY, &accounts)?;

    Ok(())
}

fn canonical_account(record: &Value) -> Result<Account, Error> {
    wire::account::to_canonical(record).ok_or_else(|| {
        Error::UnexpectedResponse("the stored account could not be normalized".to_owned())
    })
}

fn canonical_transaction(record: &Value) -> Result<Transaction, Error> {
    wire::transaction::to_canonical(record).ok_or_else(|| {
        Error::UnexpectedResponse("the stored transaction could not be normalized".to_owned())
    })
}
