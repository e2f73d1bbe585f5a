//! The service facades the view layer talks to.
//!
//! Each resource has a trait contract with two implementations: an
//! API-backed one speaking to the REST backend through [crate::transport],
//! and a local one persisting wire-form records through [crate::storage].
//! Every record entering or leaving a facade passes through [crate::wire],
//! and every listing is filtered, sorted and paged by [crate::query].

mod api;
mod local;

pub use api::{ApiAccountService, ApiTransactionService};
pub use local::{LocalAccountService, LocalTransactionService};

use crate::{
    Error,
    models::{Account, AccountDraft, AccountPatch, Transaction, TransactionDraft, TransactionPatch},
    query::{Page, TransactionQuery},
};

/// Handles the listing, creation and editing of accounts.
#[allow(async_fn_in_trait)]
pub trait AccountService {
    /// Retrieve every account. Account listings are small and unpaged.
    async fn list(&self) -> Result<Vec<Account>, Error>;

    /// Create a new account from `draft`.
    async fn create(&mut self, draft: AccountDraft) -> Result<Account, Error>;

    /// Apply `patch` to the account with `id`.
    async fn update(&mut self, id: &str, patch: AccountPatch) -> Result<Account, Error>;

    /// Delete the account with `id`.
    ///
    /// Removing an account that does not exist is an error, never a silent
    /// success.
    async fn remove(&mut self, id: &str) -> Result<(), Error>;
}

/// Handles the listing, creation and editing of transactions.
#[allow(async_fn_in_trait)]
pub trait TransactionService {
    /// Retrieve transactions in the way defined by `query`.
    ///
    /// The whole collection is normalized and then filtered, sorted and
    /// paged in memory; `Page::total` counts the rows that matched the
    /// filters.
    async fn list(&self, query: &TransactionQuery) -> Result<Page<Transaction>, Error>;

    /// Create a new transaction from `draft`.
    async fn create(&mut self, draft: TransactionDraft) -> Result<Transaction, Error>;

    /// Apply `patch` to the transaction with `id`.
    async fn update(&mut self, id: &str, patch: TransactionPatch) -> Result<Transaction, Error>;

    /// Delete the transaction with `id`.
    ///
    /// Removing a transaction that does not exist is an error, never a
    /// silent success.
    async fn remove(&mut self, id: &str) -> Result<(), Error>;
}
