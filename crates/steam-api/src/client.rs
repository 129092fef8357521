//! Steam API client.
//!
//! Async HTTP client using `reqwest`. Web API calls authenticate with the
//! `key` query parameter; the family-sharing endpoint authenticates with a
//! `steamLoginSecure` cookie; store lookups are anonymous.

use std::time::Duration;

use reqwest::header::COOKIE;
use tracing::{debug, warn};

use crate::ApiError;
use crate::retry::RetryPolicy;
use crate::types::{
    FamilyApp, FamilyEnvelope, OwnedGame, OwnedGamesEnvelope, StoreDetails,
};

const DEFAULT_WEB_BASE: &str = "https://api.steampowered.com";
const DEFAULT_STORE_BASE: &str = "https://store.steampowered.com";

/// Overall request timeout for every call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Tighter bound for the per-title store lookup, raced against the request.
const APP_DETAILS_TIMEOUT: Duration = Duration::from_secs(10);

/// Steam API client.
pub struct Client {
    http: reqwest::Client,
    web_base: String,
    store_base: String,
    api_key: String,
    family_cookie: Option<String>,
    retry: RetryPolicy,
}

impl Client {
    /// Creates a new client with the given Web API key.
    pub fn new(api_key: &str) -> Result<Self, ApiError> {
        if api_key.trim().is_empty() {
            return Err(ApiError::InvalidKey);
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            web_base: DEFAULT_WEB_BASE.to_string(),
            store_base: DEFAULT_STORE_BASE.to_string(),
            api_key: api_key.to_string(),
            family_cookie: None,
            retry: RetryPolicy::default(),
        })
    }

    /// Sets the `steamLoginSecure` cookie used by the family-sharing API.
    pub fn with_family_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.family_cookie = Some(cookie.into());
        self
    }

    /// Overrides the retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Points both endpoints at a custom base URL (for testing).
    #[cfg(test)]
    pub(crate) fn with_base_url(mut self, url: &str) -> Self {
        self.web_base = url.to_string();
        self.store_base = url.to_string();
        self
    }

    /// Returns the user's owned games.
    ///
    /// Retried per the configured policy; once the attempts are exhausted
    /// the final error is propagated.
    pub async fn get_owned_games(&self, steam_id: &str) -> Result<Vec<OwnedGame>, ApiError> {
        let url = format!("{}/IPlayerService/GetOwnedGames/v1/", self.web_base);
        let params = [
            ("key".to_string(), self.api_key.clone()),
            ("steamid".to_string(), steam_id.to_string()),
            ("include_appinfo".to_string(), "1".to_string()),
            ("include_played_free_games".to_string(), "1".to_string()),
            ("format".to_string(), "json".to_string()),
        ];

        let body = self.get_with_retry(&url, &params, None).await?;
        let envelope: OwnedGamesEnvelope = serde_json::from_slice(&body)?;
        Ok(envelope.response.games)
    }

    /// Returns the titles shared with the user through family sharing.
    ///
    /// Requires the `steamLoginSecure` cookie; errors immediately when it
    /// is not configured.
    pub async fn get_family_shared_apps(
        &self,
        steam_id: &str,
    ) -> Result<Vec<FamilyApp>, ApiError> {
        let cookie = self
            .family_cookie
            .as_deref()
            .ok_or(ApiError::MissingCookie)?;

        let url = format!(
            "{}/IFamilyGroupsService/GetSharedLibraryApps/v1/",
            self.web_base
        );
        let params = [
            ("steamid".to_string(), steam_id.to_string()),
            ("include_own".to_string(), "0".to_string()),
            ("format".to_string(), "json".to_string()),
        ];

        let body = self.get_with_retry(&url, &params, Some(cookie)).await?;
        let envelope: FamilyEnvelope = serde_json::from_slice(&body)?;
        Ok(envelope.response.apps)
    }

    /// Returns storefront metadata for one title.
    ///
    /// `Ok(None)` means the store has no entry for the app id (delisted or
    /// region-locked). The lookup is raced against a timeout so one slow
    /// title cannot stall a whole refresh batch.
    pub async fn get_app_details(&self, app_id: u32) -> Result<Option<StoreDetails>, ApiError> {
        let url = format!("{}/api/appdetails", self.store_base);
        let params = [("appids".to_string(), app_id.to_string())];

        let body = tokio::time::timeout(APP_DETAILS_TIMEOUT, self.get_once(&url, &params, None))
            .await
            .map_err(|_| ApiError::Timeout(APP_DETAILS_TIMEOUT))??;

        let payload: serde_json::Value = serde_json::from_slice(&body)?;
        let entry = &payload[app_id.to_string()];
        if !entry["success"].as_bool().unwrap_or(false) {
            debug!(app_id, "store has no entry for app");
            return Ok(None);
        }

        let details: StoreDetails = serde_json::from_value(entry["data"].clone())?;
        Ok(Some(details))
    }

    /// Performs a GET with exponential-backoff retry.
    async fn get_with_retry(
        &self,
        url: &str,
        params: &[(String, String)],
        cookie: Option<&str>,
    ) -> Result<Vec<u8>, ApiError> {
        let mut attempt = 0;
        loop {
            match self.get_once(url, params, cookie).await {
                Ok(body) => return Ok(body),
                Err(e) => {
                    attempt += 1;
                    if attempt >= self.retry.max_attempts {
                        return Err(e);
                    }
                    let delay = self.retry.delay(attempt - 1);
                    warn!(
                        url,
                        attempt,
                        rate_limited = e.is_rate_limited(),
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "request failed, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Performs a single GET request.
    async fn get_once(
        &self,
        url: &str,
        params: &[(String, String)],
        cookie: Option<&str>,
    ) -> Result<Vec<u8>, ApiError> {
        let mut request = self.http.get(url).query(params);
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, format!("steamLoginSecure={cookie}"));
        }

        let resp = request.send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }
}
