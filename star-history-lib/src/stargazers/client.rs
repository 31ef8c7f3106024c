//! GitHub API client
//!
//! Minimal GitHub API client for the stargazer listing and the rate-limit status endpoint.

use crate::Result;
use chrono::{DateTime, Utc};
use core::fmt::{Display, Formatter};
use core::time::Duration;
use ohno::IntoAppError;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

/// Media type that makes GitHub include `starred_at` in stargazer records.
pub const STAR_MEDIA_TYPE: &str = "application/vnd.github.v3.star+json";

/// Quota information for the core REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateLimit {
    #[serde(default)]
    pub limit: u64,
    pub remaining: u64,
    /// Unix timestamp at which the quota is replenished.
    pub reset: i64,
    #[serde(default)]
    pub used: u64,
}

impl RateLimit {
    #[must_use]
    pub fn reset_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.reset, 0)
    }
}

impl Display for RateLimit {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}/{} requests remaining", self.remaining, self.limit)?;
        if let Some(reset_at) = self.reset_at() {
            write!(f, ", resets at {}", reset_at.with_timezone(&chrono::Local).format("%T"))?;
        }
        Ok(())
    }
}

/// Body of `GET /rate_limit`; only the `rate` field is of interest.
#[derive(Debug, Deserialize)]
struct RateLimitResponse {
    rate: RateLimit,
}

/// GitHub API client
#[derive(Debug, Clone)]
#[expect(clippy::struct_field_names, reason = "client field stores the underlying HTTP client")]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a new API client with an optional authentication token.
    pub fn new(token: Option<&str>, base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(STAR_MEDIA_TYPE));

        if let Some(t) = token {
            let mut auth_val = HeaderValue::from_str(&format!("token {t}")).into_app_err("GitHub token contains invalid characters")?;
            auth_val.set_sensitive(true);
            let _ = headers.insert(AUTHORIZATION, auth_val);
        }

        let client = reqwest::Client::builder()
            .user_agent("star-history")
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Issue a GET for `end_point` (relative to the base URL).
    ///
    /// Transport failures and non-success statuses are returned as errors.
    pub async fn get(&self, end_point: &str, query: &[(&str, String)]) -> Result<reqwest::Response> {
        let url = format!("{}{end_point}", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .into_app_err_with(|| format!("sending request to '{url}'"))?;

        resp.error_for_status().into_app_err_with(|| format!("request to '{url}' failed"))
    }

    /// Query the current rate-limit status.
    pub async fn rate_limit(&self) -> Result<RateLimit> {
        let resp = self.get("/rate_limit", &[]).await?;
        let body: RateLimitResponse = resp.json().await.into_app_err("parsing rate limit response")?;
        Ok(body.rate)
    }
}
