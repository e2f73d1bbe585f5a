//! Normalization between wire-form transactions and the canonical
//! [Transaction] row.
//!
//! The REST backend nests the account (`{"account": {"id": ...}}`), sends
//! positive magnitudes with an uppercase type tag, and stamps dates with a
//! midnight time component. The local store uses `account_id`, signed
//! amounts and plain calendar days. Both arrive here and leave as the same
//! canonical row.

use serde_json::{Map, Value, json};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::models::{
    DEFAULT_CATEGORY, Transaction, TransactionDraft, TransactionPatch, TransactionType,
};

use super::{id_string, non_empty_string, number};

/// The calendar-day format used on the wire.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Truncate a date-time string to calendar-day granularity and parse it.
///
/// The REST backend sends `2025-10-01T00:00:00`; the local store sends plain
/// `2025-10-01`. Only the day part carries meaning.
pub fn parse_wire_date(text: &str) -> Option<Date> {
    let day_part = text.get(..10).unwrap_or(text);

    Date::parse(day_part, DATE_FORMAT).ok()
}

/// Format a date the way the backend expects it.
pub fn format_wire_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .expect("formatting a date with the calendar-day format cannot fail")
}

/// Convert one raw backend record into a canonical [Transaction].
///
/// Returns `None` when the record is not an object, has no id, or has no
/// parseable date. The amount's sign is overridden to agree with the type
/// tag; when no tag is present the type is inferred from the amount's sign.
pub fn to_canonical(raw: &Value) -> Option<Transaction> {
    let record = raw.as_object()?;

    let id = record.get("id").and_then(id_string)?;
    let date = record
        .get("date")
        .and_then(Value::as_str)
        .and_then(parse_wire_date)?;

    let amount = record.get("amount").and_then(number).unwrap_or(0.0);
    let kind = record
        .get("type")
        .and_then(Value::as_str)
        .and_then(TransactionType::parse)
        .unwrap_or_else(|| TransactionType::from_amount(amount));

    Some(Transaction {
        id,
        account_id: account_reference(record).unwrap_or_default(),
        amount: kind.signed(amount),
        kind,
        category: record
            .get("category")
            .and_then(non_empty_string)
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_owned()),
        date,
        description: record
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned(),
    })
}

/// Normalize every record in a raw list, dropping the ones that cannot be
/// normalized.
pub fn list_to_canonical(raw: &[Value]) -> Vec<Transaction> {
    let rows: Vec<Transaction> = raw.iter().filter_map(to_canonical).collect();

    if rows.len() < raw.len() {
        tracing::warn!("dropped {} malformed transaction records", raw.len() - rows.len());
    }

    rows
}

/// The id of the record, for matching stored records against a caller's id.
pub(crate) fn record_id(raw: &Value) -> Option<String> {
    raw.get("id").and_then(id_string)
}

/// The account the record belongs to, without normalizing the whole record.
pub(crate) fn account_reference_of(raw: &Value) -> Option<String> {
    raw.as_object().and_then(account_reference)
}

/// Resolve the owning account from any of the spellings the backends use:
/// `accountId`, `account_id`, or a nested `account.id`.
fn account_reference(record: &Map<String, Value>) -> Option<String> {
    record
        .get("accountId")
        .or_else(|| record.get("account_id"))
        .and_then(id_string)
        .or_else(|| {
            record
                .get("account")
                .and_then(|account| account.get("id"))
                .and_then(id_string)
        })
}

/// Encode a draft for dispatch.
///
/// Wire amounts are always a positive magnitude: direction travels in the
/// explicit `type` tag and is never inferred from sign by the receiving
/// side.
pub fn draft_to_wire(draft: &TransactionDraft) -> Value {
    let category = if draft.category.trim().is_empty() {
        DEFAULT_CATEGORY
    } else {
        draft.category.trim()
    };

    json!({
        "accountId": draft.account_id,
        "amount": draft.amount.abs(),
        "type": draft.kind.as_str(),
        "category": category,
        "date": format_wire_date(draft.date),
        "description": draft.description,
    })
}

/// Encode a patch for dispatch. Only the supplied fields are emitted.
pub fn patch_to_wire(patch: &TransactionPatch) -> Value {
    let mut payload = Map::new();

    if let Some(account_id) = &patch.account_id {
        payload.insert("accountId".to_owned(), json!(account_id));
    }
    if let Some(amount) = patch.amount {
        payload.insert("amount".to_owned(), json!(amount.abs()));
    }
    if let Some(kind) = patch.kind {
        payload.insert("type".to_owned(), json!(kind.as_str()));
    }
    if let Some(category) = &patch.category {
        payload.insert("category".to_owned(), json!(category));
    }
    if let Some(date) = patch.date {
        payload.insert("date".to_owned(), json!(format_wire_date(date)));
    }
    if let Some(description) = &patch.description {
        payload.insert("description".to_owned(), json!(description));
    }

    Value::Object(payload)
}
