//! HTTP client for the eWeLink v2 cloud API.
//!
//! Handles region routing, request signing and the `{error, msg, data}`
//! response envelope so callers work with typed payloads. Tokens are not
//! stored here; callers pass the region and access token of the session
//! they act for.

use chrono::Utc;
use serde_json::json;

use crate::signature;
use crate::types::{ApiResponse, ThingList, TokenSet};

/// Hosted OAuth consent page users are redirected to for login.
const OAUTH_PAGE_URL: &str = "https://c2ccdn.coolkit.cc/oauth/index.html";

/// Devices fetched per page of `GET /v2/device/thing`.
const PAGE_SIZE: i64 = 30;

/// Start index the thing API understands as "from the beginning".
const FIRST_PAGE_INDEX: i64 = -9999999;

#[derive(Debug, thiserror::Error)]
pub enum EwelinkError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("eWeLink API returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("eWeLink rejected the request (code {code}): {msg}")]
    Api { code: i64, msg: String },
}

/// Client for one registered eWeLink OAuth app.
#[derive(Clone)]
pub struct EwelinkClient {
    http: reqwest::Client,
    app_id: String,
    app_secret: String,
}

impl EwelinkClient {
    pub fn new(app_id: String, app_secret: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            app_id,
            app_secret,
        }
    }

    /// REST base URL for a login region. Mainland China lives on its own
    /// top-level domain; every other region is a `coolkit.cc` subdomain.
    pub fn api_base(region: &str) -> String {
        if region == "cn" {
            "https://cn-apia.coolkit.cn".to_string()
        } else {
            format!("https://{region}-apia.coolkit.cc")
        }
    }

    /// Builds the signed URL of the hosted login page.
    ///
    /// The page authenticates the app via `authorization`, an HMAC over
    /// `"{appId}_{seq}"`, and sends the user back to `redirect_url` with
    /// `code`, `region` and the echoed `state`.
    pub fn login_url(&self, redirect_url: &str, state: &str) -> String {
        let seq = Utc::now().timestamp_millis().to_string();
        let authorization =
            signature::sign(&self.app_secret, &format!("{}_{}", self.app_id, seq));

        let mut url = reqwest::Url::parse(OAUTH_PAGE_URL).expect("OAuth page URL is valid");
        url.query_pairs_mut()
            .append_pair("clientId", &self.app_id)
            .append_pair("seq", &seq)
            .append_pair("authorization", &authorization)
            .append_pair("redirectUrl", redirect_url)
            .append_pair("grantType", "authorization_code")
            .append_pair("state", state)
            .append_pair("nonce", &signature::nonce());
        url.into()
    }

    /// Exchanges an OAuth authorization code for a token pair.
    ///
    /// The token endpoint authenticates the app itself: the raw JSON body
    /// is signed with the app secret and sent as `Authorization: Sign ...`.
    pub async fn exchange_code(
        &self,
        region: &str,
        code: &str,
        redirect_url: &str,
    ) -> Result<TokenSet, EwelinkError> {
        let body = json!({
            "code": code,
            "redirectUrl": redirect_url,
            "grantType": "authorization_code",
        })
        .to_string();
        let authorization = format!("Sign {}", signature::sign(&self.app_secret, &body));

        let response = self
            .http
            .post(format!("{}/v2/user/oauth/token", Self::api_base(region)))
            .header("Content-Type", "application/json")
            .header("Authorization", authorization)
            .header("X-CK-Appid", &self.app_id)
            .header("X-CK-Nonce", signature::nonce())
            .header("X-CK-Seq", Utc::now().timestamp_millis().to_string())
            .body(body)
            .send()
            .await?;

        Self::parse_envelope(response).await
    }

    /// Fetches every device visible to the session, following the thing
    /// API's pagination until the reported total is reached.
    pub async fn get_all_things(
        &self,
        region: &str,
        access_token: &str,
    ) -> Result<ThingList, EwelinkError> {
        let url = format!("{}/v2/device/thing", Self::api_base(region));
        let mut begin_index = FIRST_PAGE_INDEX;
        let mut things = Vec::new();
        let mut total = 0;

        loop {
            let response = self
                .http
                .get(&url)
                .query(&[
                    ("num", PAGE_SIZE.to_string()),
                    ("beginIndex", begin_index.to_string()),
                ])
                .bearer_auth(access_token)
                .header("X-CK-Appid", &self.app_id)
                .header("X-CK-Nonce", signature::nonce())
                .header("X-CK-Seq", Utc::now().timestamp_millis().to_string())
                .send()
                .await?;

            let page: ThingList = Self::parse_envelope(response).await?;
            total = page.total;
            if page.thing_list.is_empty() {
                break;
            }
            things.extend(page.thing_list);
            tracing::debug!(fetched = things.len(), total, "fetched device page");
            if things.len() as i64 >= total {
                break;
            }
            begin_index = things.len() as i64;
        }

        Ok(ThingList {
            thing_list: things,
            total,
        })
    }

    /// Sends new parameters to a single device.
    ///
    /// The vendor's response envelope is returned as-is, error code
    /// included, so callers can pass vendor failures through to their own
    /// clients.
    pub async fn set_thing_status(
        &self,
        region: &str,
        access_token: &str,
        device_id: &str,
        params: &serde_json::Value,
    ) -> Result<serde_json::Value, EwelinkError> {
        let response = self
            .http
            .post(format!("{}/v2/device/thing/status", Self::api_base(region)))
            .bearer_auth(access_token)
            .header("X-CK-Appid", &self.app_id)
            .header("X-CK-Nonce", signature::nonce())
            .header("X-CK-Seq", Utc::now().timestamp_millis().to_string())
            .json(&json!({
                "type": 1,
                "id": device_id,
                "params": params,
            }))
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Unwraps a successful envelope, mapping vendor error codes to
    /// [`EwelinkError::Api`].
    async fn parse_envelope<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, EwelinkError> {
        let response = Self::ensure_success(response).await?;
        let envelope: ApiResponse<T> = response.json().await?;
        if envelope.error != 0 {
            return Err(EwelinkError::Api {
                code: envelope.error,
                msg: envelope.msg,
            });
        }
        envelope.data.ok_or(EwelinkError::Api {
            code: 0,
            msg: "response envelope carried no data".to_string(),
        })
    }

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, EwelinkError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(EwelinkError::Http {
                status: status.as_u16(),
                body,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
