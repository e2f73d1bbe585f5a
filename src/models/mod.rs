//! This module defines the canonical data types shared across the
//! application core.

mod account;
mod transaction;
mod user;

pub use account::{Account, AccountDraft, AccountPatch, AccountType, DEFAULT_ACCOUNT_NAME};
pub use transaction::{
    DEFAULT_CATEGORY, Transaction, TransactionDraft, TransactionPatch, TransactionType,
};
pub use user::{RegisterRequest, UserProfile};
