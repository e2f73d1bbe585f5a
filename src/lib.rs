//! Budget Buddy is a web app for tracking personal finances: bank-style
//! accounts, income and expense transactions, and dashboard summaries.
//!
//! This crate is the client-side core underneath the view layer. It
//! normalizes the backend's inconsistent wire shapes into canonical rows,
//! filters, sorts and pages them in memory, and exposes CRUD facades over
//! either a REST transport or a local record store.

#![warn(missing_docs)]

pub mod auth;
pub mod config;
pub mod dashboard;
mod error;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod profile;
pub mod query;
pub mod services;
pub mod storage;
pub mod transport;
pub mod wire;

#[cfg(test)]
mod test_utils;

pub use config::{AppConfig, BackendMode};
pub use error::Error;
pub use models::{
    Account, AccountDraft, AccountPatch, AccountType, Transaction, TransactionDraft,
    TransactionPatch, TransactionType, UserProfile,
};
pub use query::{Page, SortKey, SortOrder, TransactionFilters, TransactionQuery};
pub use services::{AccountService, TransactionService};
