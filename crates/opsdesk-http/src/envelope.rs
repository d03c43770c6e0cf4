//! The backend's response envelope and request bodies.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use opsdesk_core::error::{DomainError, Error, TransportError};
use opsdesk_core::resource::{ListPage, ListShape, QueryState, ResourceDescriptor};
use opsdesk_core::resources::SensitiveWordDraft;

/// Envelope `code` of a successful call.
pub const SUCCESS: i64 = 200;

// ============================================================================
// Endpoint Paths
// ============================================================================

pub const LOGIN: &str = "/auth/login";
pub const LOGOUT: &str = "/auth/logout";
pub const CHANGE_PASSWORD: &str = "/change-password";
pub const ACCOUNTS: &str = "/account/list";
pub const PERMISSIONS: &str = "/permissions/list";
pub const GAME_CONFIG_SYNC: &str = "/game-configs/sync";
pub const GAME_CONFIG_CATEGORY_OPTIONS: &str = "/game-configs/categories";
pub const SENSITIVE_WORD_TEST: &str = "/sensitive-words/test";
pub const SENSITIVE_WORD_REFRESH: &str = "/sensitive-words/refresh-cache";
pub const SENSITIVE_WORD_IMPORT: &str = "/sensitive-words/batch-import";
pub const SENSITIVE_WORD_EXPORT: &str = "/sensitive-words/export";
pub const SENSITIVE_WORD_STATISTICS: &str = "/sensitive-words/statistics";
pub const MUTE_LIST: &str = "/mute/mute-list";
pub const MUTE_LOGS: &str = "/mute/mute-logs";
pub const EMAIL_SEND: &str = "/email/send";
pub const EMAIL_GOODS: &str = "/email/good";
pub const RECHARGE_CHARGE: &str = "/recharge/charge";
pub const RECHARGE_REFUNDS: &str = "/recharge/refunds";
pub const STAT_SUMMARY: &str = "/summary";
pub const PLAYER_RANK: &str = "/player-rank";
pub const SECT_RANK: &str = "/sect-rank";

/// `/roles/{id}/permissions`
pub fn role_permissions(role_id: i64) -> String {
    format!("/roles/{}/permissions", role_id)
}

// ============================================================================
// Envelope
// ============================================================================

/// `{code, data, message}` as sent with every response.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<Message>,
}

/// A message is usually a string; validation failures send a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Text(String),
    Lines(Vec<String>),
}

impl Message {
    pub fn into_text(self) -> Option<String> {
        let text = match self {
            Message::Text(s) => s,
            Message::Lines(lines) => lines.join("; "),
        };
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/// Body of a non-2xx response. Any of it may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<Message>,
}

impl Envelope {
    /// `Ok(data)` when `code` is one of `accepted`.
    pub fn into_data(self, accepted: &[i64]) -> Result<Option<Value>, Error> {
        if accepted.contains(&self.code) {
            Ok(self.data.filter(|d| !d.is_null()))
        } else {
            Err(DomainError::new(self.code, self.message.and_then(Message::into_text)).into())
        }
    }
}

pub(crate) fn decode_error(message: impl ToString) -> Error {
    TransportError::Decode {
        message: message.to_string(),
    }
    .into()
}

/// Deserialize envelope `data`, which must be present.
pub fn required<T: DeserializeOwned>(data: Option<Value>) -> Result<T, Error> {
    let data = data.ok_or_else(|| decode_error("response carried no data"))?;
    serde_json::from_value(data).map_err(decode_error)
}

// ============================================================================
// List Responses
// ============================================================================

/// Normalize list `data` into a [`ListPage`].
///
/// Paged responses carry the records under the resource's items key plus
/// `total`, `page`, `pageSize` (or `limit`) and optionally `totalPages`,
/// either alongside the records or in a nested `pagination` object whose
/// page number is `current`. Unpaged responses are a bare array of every
/// record; wrapped ones hold that array under the items key.
pub fn list_page<T: DeserializeOwned>(
    descriptor: &ResourceDescriptor,
    query: &QueryState,
    data: Option<Value>,
) -> Result<ListPage<T>, Error> {
    let data = data.unwrap_or(Value::Null);

    match descriptor.list {
        ListShape::Unpaged => whole_set(decode_items(data)?),
        ListShape::Wrapped { items_key } => {
            let mut map = object(descriptor, data)?;
            whole_set(decode_items(map.remove(items_key).unwrap_or(Value::Null))?)
        }
        ListShape::Paged { items_key } => {
            let mut map = object(descriptor, data)?;
            let items: Vec<T> = decode_items(map.remove(items_key).unwrap_or(Value::Null))?;

            let counts = match map.remove("pagination") {
                Some(Value::Object(nested)) => nested,
                _ => map,
            };
            let number = |key: &str| counts.get(key).and_then(Value::as_u64);
            let small = |key: &str| number(key).and_then(|n| u32::try_from(n).ok());

            Ok(ListPage {
                total: number("total").unwrap_or(items.len() as u64),
                page: small("page")
                    .or_else(|| small("current"))
                    .unwrap_or(query.page()),
                page_size: small("pageSize")
                    .or_else(|| small("limit"))
                    .unwrap_or(query.page_size()),
                total_pages: small("totalPages"),
                items,
            })
        }
    }
}

fn object(descriptor: &ResourceDescriptor, data: Value) -> Result<Map<String, Value>, Error> {
    match data {
        Value::Object(map) => Ok(map),
        _ => Err(decode_error(format!(
            "expected an object for {}",
            descriptor.name
        ))),
    }
}

fn decode_items<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, Error> {
    match value {
        Value::Null => Ok(Vec::new()),
        other => serde_json::from_value(other).map_err(decode_error),
    }
}

fn whole_set<T>(items: Vec<T>) -> Result<ListPage<T>, Error> {
    Ok(ListPage {
        page: 1,
        page_size: u32::try_from(items.len()).unwrap_or(u32::MAX),
        total: items.len() as u64,
        total_pages: Some(1),
        items,
    })
}

// ============================================================================
// Request Bodies
// ============================================================================

/// Request body for login. Not `Debug`: it holds the password.
#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest<'a> {
    pub id: i64,
    pub new_password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPermissionsRequest<'a> {
    pub permission_codes: &'a [String],
}

#[derive(Debug, Serialize)]
pub struct DetectRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ImportWordsRequest<'a> {
    pub words: &'a [SensitiveWordDraft],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmuteRequest<'a> {
    pub user_ids: &'a [String],
}

/// `{deletedCount}` as returned by a log purge.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedCount {
    #[serde(default)]
    pub deleted_count: u64,
}
