//! Wire types for the eWeLink v2 API.

use serde::{Deserialize, Serialize};

/// Envelope wrapping every eWeLink response body.
///
/// `error` is `0` on success; any other code is a vendor-defined failure
/// explained by `msg`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub error: i64,
    #[serde(default)]
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Token pair returned by the OAuth code exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSet {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at_expired_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rt_expired_time: Option<i64>,
}

/// One page (or the aggregated whole) of the account's device list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThingList {
    pub thing_list: Vec<Thing>,
    pub total: i64,
}

/// Entry in the thing list. `item_type` distinguishes owned devices (1),
/// shared devices (2) and groups (3).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thing {
    pub item_type: i64,
    pub item_data: Device,
}

/// Device payload inside a thing entry.
///
/// `params` and `extra` stay untyped: the portal only ever reads a handful
/// of keys out of them and passes the rest through to its own clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    // The vendor spells this one key in all lowercase.
    #[serde(rename = "deviceid")]
    pub device_id: String,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub params: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
