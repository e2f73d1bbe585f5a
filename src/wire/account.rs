//! Normalization between wire-form accounts and the canonical [Account] row.

use serde_json::{Map, Value, json};

use crate::models::{Account, AccountDraft, AccountPatch, AccountType, DEFAULT_ACCOUNT_NAME};

use super::{id_string, non_empty_string, number};

/// The id field spellings seen across backends, in lookup order.
const ID_KEYS: [&str; 4] = ["id", "accountId", "_id", "uuid"];

/// Convert one raw backend record into a canonical [Account].
///
/// Returns `None` when the record is not an object or carries no id under
/// any known spelling. Every other field has a usable default.
pub fn to_canonical(raw: &Value) -> Option<Account> {
    let record = raw.as_object()?;

    let id = record_id(raw)?;

    Some(Account {
        id,
        name: record
            .get("name")
            .and_then(non_empty_string)
            .unwrap_or_else(|| DEFAULT_ACCOUNT_NAME.to_owned()),
        kind: record
            .get("type")
            .and_then(Value::as_str)
            .map(AccountType::parse)
            .unwrap_or(AccountType::Other),
        balance: record.get("balance").and_then(number).unwrap_or(0.0),
    })
}

/// Normalize every record in a raw list, dropping the ones that cannot be
/// normalized.
pub fn list_to_canonical(raw: &[Value]) -> Vec<Account> {
    let rows: Vec<Account> = raw.iter().filter_map(to_canonical).collect();

    if rows.len() < raw.len() {
        tracing::warn!("dropped {} malformed account records", raw.len() - rows.len());
    }

    rows
}

/// The id of the record under any of its known spellings.
pub(crate) fn record_id(raw: &Value) -> Option<String> {
    ID_KEYS
        .iter()
        .find_map(|key| raw.get(*key).and_then(id_string))
}

/// Encode a draft for dispatch.
pub fn draft_to_wire(draft: &AccountDraft) -> Value {
    json!({
        "name": draft.name.trim(),
        "type": draft.kind.as_str(),
        "balance": draft.balance.unwrap_or(0.0),
    })
}

/// Encode a patch for dispatch. Only the supplied fields are emitted; a
/// balance of zero is a real update and crosses the wire.
pub fn patch_to_wire(patch: &AccountPatch) -> Value {
    let mut payload = Map::new();

    if let Some(name) = &patch.name {
        payload.insert("name".to_owned(), json!(name.trim()));
    }
    if let Some(kind) = patch.kind {
        payload.insert("type".to_owned(), json!(kind.as_str()));
    }
    if let Some(balance) = patch.balance {
        payload.insert("balance".to_owned(), json!(balance));
    }

    Value::Object(payload)
}
