//! REST-backed implementations of the service facades.
//!
//! These are thin: the transport does the talking, [crate::wire] does the
//! reshaping, and [crate::query] does the listing work client-side. After a
//! write the caller is expected to reconcile by listing again; the listing
//! result always wins over whatever was applied locally.

use serde_json::Value;

use crate::{
    Error,
    models::{Account, AccountDraft, AccountPatch, Transaction, TransactionDraft, TransactionPatch},
    query::{self, Page, TransactionQuery},
    transport::{Transport, TransportError, endpoints},
    wire::{self, envelope::ListEnvelope},
};

use super::{AccountService, TransactionService};

/// Talks to the backend's `/api/accounts` endpoints.
#[derive(Debug, Clone)]
pub struct ApiAccountService<C> {
    client: C,
}

impl<C: Transport> ApiAccountService<C> {
    /// Create a facade that dispatches through `client`.
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: Transport> AccountService for ApiAccountService<C> {
    async fn list(&self) -> Result<Vec<Account>, Error> {
        let payload = self.client.get(endpoints::ACCOUNTS).await?;
        let items = wire::envelope::decode_items(payload);

        Ok(wire::account::list_to_canonical(&items))
    }

    async fn create(&mut self, draft: AccountDraft) -> Result<Account, Error> {
        draft.validate()?;

        let response = self
            .client
            .post(endpoints::ACCOUNTS, wire::account::draft_to_wire(&draft))
            .await?;

        canonical_account_echo(&response)
    }

    async fn update(&mut self, id: &str, patch: AccountPatch) -> Result<Account, Error> {
        patch.validate()?;

        let response = self
            .client
            .put(
                &endpoints::item(endpoints::ACCOUNTS, id),
                wire::account::patch_to_wire(&patch),
            )
            .await
            .map_err(|error| missing_on_not_found(error, Error::UpdateMissingAccount))?;

        canonical_account_echo(&response)
    }

    async fn remove(&mut self, id: &str) -> Result<(), Error> {
        self.client
            .delete(&endpoints::item(endpoints::ACCOUNTS, id))
            .await
            .map_err(|error| missing_on_not_found(error, Error::DeleteMissingAccount))?;

        tracing::debug!("deleted account {id}");

        Ok(())
    }
}

/// Talks to the backend's `/api/transactions` endpoints.
#[derive(Debug, Clone)]
pub struct ApiTransactionService<C> {
    client: C,
}

impl<C: Transport> ApiTransactionService<C> {
    /// Create a facade that dispatches through `client`.
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: Transport> TransactionService for ApiTransactionService<C> {
    async fn list(&self, query: &TransactionQuery) -> Result<Page<Transaction>, Error> {
        let payload = self.client.get(endpoints::TRANSACTIONS).await?;

        let rows = match serde_json::from_value::<ListEnvelope>(payload) {
            Ok(list) => {
                if let Some(advertised) = list.advertised_total() {
                    tracing::debug!("server advertised {advertised} transactions");
                }

                wire::transaction::list_to_canonical(&list.into_items())
            }
            Err(error) => {
                tracing::warn!("unrecognized transaction list payload: {error}");
                Vec::new()
            }
        };

        Ok(query::apply(&rows, query))
    }

    async fn create(&mut self, draft: TransactionDraft) -> Result<Transaction, Error> {
        draft.validate()?;

        let response = self
            .client
            .post(
                endpoints::TRANSACTIONS,
                wire::transaction::draft_to_wire(&draft),
            )
            .await?;

        canonical_transaction_echo(&response)
    }

    async fn update(&mut self, id: &str, patch: TransactionPatch) -> Result<Transaction, Error> {
        patch.validate()?;

        let response = self
            .client
            .put(
                &endpoints::item(endpoints::TRANSACTIONS, id),
                wire::transaction::patch_to_wire(&patch),
            )
            .await
            .map_err(|error| missing_on_not_found(error, Error::UpdateMissingTransaction))?;

        canonical_transaction_echo(&response)
    }

    async fn remove(&mut self, id: &str) -> Result<(), Error> {
        self.client
            .delete(&endpoints::item(endpoints::TRANSACTIONS, id))
            .await
            .map_err(|error| missing_on_not_found(error, Error::DeleteMissingTransaction))?;

        tracing::debug!("deleted transaction {id}");

        Ok(())
    }
}

/// Map a 404 onto the operation's missing-resource error; anything else
/// propagates as a transport failure.
fn missing_on_not_found(error: TransportError, missing: Error) -> Error {
    if error.is_not_found() {
        missing
    } else {
        Error::Transport(error)
    }
}

fn canonical_account_echo(response: &Value) -> Result<Account, Error> {
    wire::account::to_canonical(wire::unwrap_entity(response, "account")).ok_or_else(|| {
        Error::UnexpectedResponse("the account write was not echoed back as a record".to_owned())
    })
}

fn canonical_transaction_echo(response: &Value) -> Result<Transaction, Error> {
    wire::transaction::to_canonical(wire::unwrap_entity(response, "transaction")).ok_or_else(|| {
        Error::UnexpectedResponse(
            "the transaction write was not echoed back as a record".to_owned(),
        )
    })
}
