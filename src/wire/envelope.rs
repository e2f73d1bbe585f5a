//! The list-payload envelope shapes the backends are known to produce.
//!
//! List endpoints variously answer with a bare array, a Spring-style page
//! object, or a wrapper keyed by the resource name. Rather than sniffing
//! shapes field by field, the payload decodes into one [ListEnvelope] value
//! whose variants are each validated independently by serde.

use serde::Deserialize;
use serde_json::Value;

/// A list payload from the backend, in any of its known shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListEnvelope {
    /// A bare JSON array of records.
    Bare(Vec<Value>),
    /// A Spring-style page: `{"content": [...], "totalElements": n}`.
    ///
    /// The server's paging metadata is 0-based and refers to server-side
    /// pages; the core repages client-side, so only the item list and the
    /// advertised total survive decoding.
    Paged {
        /// The records on this server-side page.
        content: Vec<Value>,
        /// The total record count across all server-side pages.
        #[serde(default, rename = "totalElements")]
        total_elements: Option<u64>,
    },
    /// A `{"transactions": [...]}` wrapper.
    Transactions {
        /// The wrapped records.
        transactions: Vec<Value>,
    },
    /// An `{"accounts": [...]}` wrapper.
    Accounts {
        /// The wrapped records.
        accounts: Vec<Value>,
    },
}

impl ListEnvelope {
    /// Extract the item list, discarding envelope metadata.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            ListEnvelope::Bare(items) => items,
            ListEnvelope::Paged { content, .. } => content,
            ListEnvelope::Transactions { transactions } => transactions,
            ListEnvelope::Accounts { accounts } => accounts,
        }
    }

    /// The total the server advertised for a paged envelope, when present.
    pub fn advertised_total(&self) -> Option<u64> {
        match self {
            ListEnvelope::Paged { total_elements, .. } => *total_elements,
            _ => None,
        }
    }
}

/// Decode a list payload of unknown shape into its items.
///
/// An unrecognized payload yields an empty list rather than an error.
pub fn decode_items(payload: Value) -> Vec<Value> {
    match serde_json::from_value::<ListEnvelope>(payload) {
        Ok(envelope) => envelope.into_items(),
        Err(error) => {
            tracing::warn!("unrecognized list payload shape: {error}");
            Vec::new()
        }
    }
}
