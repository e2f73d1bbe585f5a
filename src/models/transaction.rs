//! This file defines the type `Transaction`, the core type of the budgeting
//! part of the application, along with the draft and patch shapes used to
//! create and edit transactions.

use time::Date;

use crate::Error;

/// The category given to transactions that arrive without one.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Whether money left or entered an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    /// Money entering the account.
    Income,
    /// Money leaving the account.
    Expense,
}

impl TransactionType {
    /// Parse the wire tag, case-insensitively.
    ///
    /// Anything other than `income`/`expense` (including the view's `All`
    /// sentinel) is `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    /// Infer the type from a signed amount: negative amounts are expenses.
    pub fn from_amount(amount: f64) -> Self {
        if amount < 0.0 { Self::Expense } else { Self::Income }
    }

    /// The lowercase tag used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Apply this type's sign convention to an amount.
    ///
    /// Expenses are negative, income positive, regardless of the sign the
    /// amount arrived with. This is the single place the sign/type agreement
    /// is enforced.
    pub fn signed(self, amount: f64) -> f64 {
        match self {
            Self::Income => amount.abs(),
            Self::Expense => -amount.abs(),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or
/// earned.
///
/// The amount is always signed to agree with `kind`: expenses are negative,
/// income positive. Rows produced by [crate::wire] and the service facades
/// uphold this.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The opaque identifier assigned by the backend.
    pub id: String,
    /// The account this transaction belongs to. Empty when the backend did
    /// not include a reference.
    pub account_id: String,
    /// The amount of money spent or earned. Negative for expenses.
    pub amount: f64,
    /// Whether this transaction is income or an expense.
    pub kind: TransactionType,
    /// A free-form category label.
    pub category: String,
    /// The calendar day the transaction happened. No time-of-day semantics.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
}

/// A user-supplied, not-yet-persisted transaction.
///
/// The amount is a magnitude; direction comes from `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    /// The account to record the transaction against.
    pub account_id: String,
    /// The magnitude of the transaction. Must be non-zero.
    pub amount: f64,
    /// Whether this transaction is income or an expense.
    pub kind: TransactionType,
    /// A free-form category label. Empty defaults to [DEFAULT_CATEGORY].
    pub category: String,
    /// The calendar day the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
}

impl TransactionDraft {
    /// Check the draft has everything required to create a transaction.
    ///
    /// Mirrors what the backend rejects: a missing account reference, an
    /// empty description, and a zero or non-finite amount.
    pub fn validate(&self) -> Result<(), Error> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation("an account is required".to_owned()));
        }

        if self.description.trim().is_empty() {
            return Err(Error::Validation("a description is required".to_owned()));
        }

        if self.amount == 0.0 || !self.amount.is_finite() {
            return Err(Error::Validation("a non-zero amount is required".to_owned()));
        }

        Ok(())
    }

    /// The signed amount this draft produces once canonicalized.
    pub fn signed_amount(&self) -> f64 {
        self.kind.signed(self.amount)
    }
}

/// A partial set of field updates for an existing transaction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    /// Move the transaction to another account.
    pub account_id: Option<String>,
    /// Replace the magnitude.
    pub amount: Option<f64>,
    /// Replace the type.
    pub kind: Option<TransactionType>,
    /// Replace the category label.
    pub category: Option<String>,
    /// Replace the calendar day.
    pub date: Option<Date>,
    /// Replace the description.
    pub description: Option<String>,
}

impl TransactionPatch {
    /// Check the supplied fields are usable.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(amount) = self.amount
            && (amount == 0.0 || !amount.is_finite())
        {
            return Err(Error::Validation("a non-zero amount is required".to_owned()));
        }

        if let Some(account_id) = &self.account_id
            && account_id.trim().is_empty()
        {
            return Err(Error::Validation("an account is required".to_owned()));
        }

        Ok(())
    }
}
