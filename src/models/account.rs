//! This file defines the canonical account row and the draft and patch
//! shapes used to create and edit accounts.

use crate::Error;

/// The name given to accounts created without one.
pub const DEFAULT_ACCOUNT_NAME: &str = "Untitled";

/// The kind of bank account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountType {
    /// An everyday spending account.
    Checking,
    /// A savings account.
    Savings,
    /// A credit card.
    Credit,
    /// Anything else: loans, investments, cash.
    Other,
}

impl AccountType {
    /// Map a display label onto the canonical account type.
    ///
    /// Accepts the labels the views use ("Credit Card", "Investment", ...)
    /// and maps anything unrecognized to [AccountType::Other].
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "checking" => Self::Checking,
            "savings" => Self::Savings,
            "credit" | "credit card" => Self::Credit,
            _ => Self::Other,
        }
    }

    /// The lowercase tag used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Credit => "credit",
            Self::Other => "other",
        }
    }
}

/// A bank-style account that transactions are recorded against.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The opaque identifier assigned by the backend.
    pub id: String,
    /// The display name of the account.
    pub name: String,
    /// The kind of account.
    pub kind: AccountType,
    /// The current balance. Zero and negative balances are valid.
    pub balance: f64,
}

/// A user-supplied, not-yet-persisted account.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountDraft {
    /// The display name of the account.
    pub name: String,
    /// The kind of account.
    pub kind: AccountType,
    /// The opening balance. `None` defaults to zero.
    pub balance: Option<f64>,
}

impl AccountDraft {
    /// Check the draft has everything required to create an account.
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("an account name is required".to_owned()));
        }

        Ok(())
    }
}

/// A partial set of field updates for an existing account.
///
/// `balance: Some(0.0)` is a real update: zero must survive the trip to the
/// wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPatch {
    /// Replace the display name.
    pub name: Option<String>,
    /// Replace the account kind.
    pub kind: Option<AccountType>,
    /// Replace the balance.
    pub balance: Option<f64>,
}

impl AccountPatch {
    /// Check the supplied fields are usable.
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err(Error::Validation("an account name cannot be empty".to_owned()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AccountDraft, AccountPatch, AccountType};
    use crate::Error;

    #[test]
    fn parse_maps_display_labels() {
        assert_eq!(AccountType::parse("Checking"), AccountType::Checking);
        assert_eq!(AccountType::parse("savings"), AccountType::Savings);
        assert_eq!(AccountType::parse("Credit Card"), AccountType::Credit);
        assert_eq!(AccountType::parse("credit"), AccountType::Credit);
    }

    #[test]
    fn parse_maps_unknown_labels_to_other() {
        assert_eq!(AccountType::parse("Investment"), AccountType::Other);
        assert_eq!(AccountType::parse("Loan"), AccountType::Other);
        assert_eq!(AccountType::parse(""), AccountType::Other);
    }

    #[test]
    fn draft_requires_a_name() {
        let draft = AccountDraft {
            name: "   ".to_owned(),
            kind: AccountType::Checking,
            balance: None,
        };

        assert!(matches!(draft.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn patch_allows_balance_of_zero() {
        let patch = AccountPatch {
            balance: Some(0.0),
            ..AccountPatch::default()
        };

        assert_eq!(patch.validate(), Ok(()));
    }

    #[test]
    fn patch_rejects_blank_name() {
        let patch = AccountPatch {
            name: Some(String::new()),
            ..AccountPatch::default()
        };

        assert!(matches!(patch.validate(), Err(Error::Validation(_))));
    }
}
