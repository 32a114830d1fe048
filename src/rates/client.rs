//! HTTP client for the public exchange-rate APIs.
//!
//! Two sources are consulted in order: exchangerate.host first, then
//! open.er-api.com when the primary fails. Both return a JSON document with a
//! `rates` object keyed by ISO-4217 code.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{CachedRates, RateCache, RateError, RateTable};

// ============================================================================
// Constants
// ============================================================================

/// Primary rate source
const PRIMARY_BASE_URL: &str = "https://api.exchangerate.host";

/// Fallback rate source, consulted when the primary fails
const FALLBACK_BASE_URL: &str = "https://open.er-api.com/v6";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for rate-limited (429) requests.
/// 3 retries with exponential backoff usually succeeds without excessive delay.
const MAX_RATE_LIMIT_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds for rate limiting.
/// 1 second is polite to the server while not making users wait too long.
const INITIAL_BACKOFF_MS: u64 = 1000;

#[derive(Debug, Deserialize)]
struct PrimaryResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    rates: RateTable,
}

#[derive(Debug, Deserialize)]
struct FallbackResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    #[serde(default)]
    rates: RateTable,
}

/// Client for the rate APIs.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct RateClient {
    client: Client,
}

impl RateClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client })
    }

    /// Validate that a string looks like an ISO-4217 currency code.
    fn is_valid_code(s: &str) -> bool {
        s.len() == 3 && s.chars().all(|c| c.is_ascii_uppercase())
    }

    async fn get_text(&self, url: &str, base: &str) -> Result<String> {
        let mut retries = 0;
        let mut backoff_ms = INITIAL_BACKOFF_MS;

        loop {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .map_err(RateError::NetworkError)
                .with_context(|| format!("Failed to send GET request to {}", url))?;

            let status = response.status();
            if status.is_success() {
                return response
                    .text()
                    .await
                    .with_context(|| format!("Failed to read response body from {}", url));
            }

            if status.as_u16() == 429 {
                retries += 1;
                if retries > MAX_RATE_LIMIT_RETRIES {
                    return Err(RateError::RateLimited.into());
                }
                warn!(url, retry = retries, backoff_ms, "Rate limited, backing off");
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms *= 2; // Exponential backoff
                continue;
            }

            let body = response.text().await.unwrap_or_default();
            return Err(RateError::from_status(status, base, &body).into());
        }
    }

    async fn fetch_primary(&self, base: &str) -> Result<RateTable> {
        let url = format!("{}/latest?base={}", PRIMARY_BASE_URL, base);
        let body = self.get_text(&url, base).await?;
        parse_primary(&body)
    }

    async fn fetch_fallback(&self, base: &str) -> Result<RateTable> {
        let url = format!("{}/latest/{}", FALLBACK_BASE_URL, base);
        let body = self.get_text(&url, base).await?;
        parse_fallback(&body)
    }

    /// Fetch a rate table for `base`: primary source first, fallback second.
    pub async fn fetch(&self, base: &str) -> Result<RateTable> {
        let base = base.trim().to_uppercase();
        if !Self::is_valid_code(&base) {
            return Err(RateError::UnknownBase(base).into());
        }

        match self.fetch_primary(&base).await {
            Ok(rates) => {
                debug!(base = %base, rates = rates.len(), "Primary rate source ok");
                Ok(rates)
            }
            Err(primary_err) => {
                warn!(base = %base, error = %primary_err, "Primary rate source failed, trying fallback");
                let rates = self
                    .fetch_fallback(&base)
                    .await
                    .with_context(|| format!("Both rate sources failed (primary: {})", primary_err))?;
                debug!(base = %base, rates = rates.len(), "Fallback rate source ok");
                Ok(rates)
            }
        }
    }

    /// Cached lookup for `base`: a fresh cached table wins, then the remote
    /// sources, then a stale cached table as the offline last resort. Only a
    /// cold cache with both sources down fails.
    pub async fn rates_for(&self, cache: &RateCache, base: &str) -> Result<CachedRates> {
        match cache.load(base) {
            Ok(Some(cached)) if !cached.is_stale() => {
                debug!(base, age = %cached.age_display(), "Serving cached rates");
                return Ok(cached);
            }
            Ok(_) => {}
            Err(e) => warn!(base, error = %e, "Unreadable rate cache, refetching"),
        }

        match self.fetch(base).await {
            Ok(rates) => {
                let cached = CachedRates::new(base, rates);
                if let Err(e) = cache.save(&cached) {
                    warn!(base, error = %e, "Failed to write rate cache");
                }
                Ok(cached)
            }
            Err(fetch_err) => {
                if let Ok(Some(stale)) = cache.load(base) {
                    warn!(base, error = %fetch_err, age = %stale.age_display(),
                        "Rate sources unreachable, serving stale rates");
                    return Ok(stale);
                }
                Err(fetch_err)
            }
        }
    }
}

fn parse_primary(body: &str) -> Result<RateTable> {
    let parsed: PrimaryResponse =
        serde_json::from_str(body).context("Failed to parse primary rate response")?;

    if parsed.success == Some(false) {
        return Err(RateError::InvalidResponse("Primary source reported failure".to_string()).into());
    }
    if parsed.rates.is_empty() {
        return Err(RateError::InvalidResponse("Primary source returned no rates".to_string()).into());
    }
    Ok(parsed.rates)
}

fn parse_fallback(body: &str) -> Result<RateTable> {
    let parsed: FallbackResponse =
        serde_json::from_str(body).context("Failed to parse fallback rate response")?;

    if parsed.result.as_deref() == Some("error") {
        let reason = parsed.error_type.unwrap_or_else(|| "unknown".to_string());
        return Err(RateError::InvalidResponse(format!("Fallback source error: {}", reason)).into());
    }
    if parsed.rates.is_empty() {
        return Err(RateError::InvalidResponse("Fallback source returned no rates".to_string()).into());
    }
    Ok(parsed.rates)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_code() {
        assert!(RateClient::is_valid_code("PLN"));
        assert!(RateClient::is_valid_code("EUR"));
        assert!(!RateClient::is_valid_code("pln"));
        assert!(!RateClient::is_valid_code("EURO"));
        assert!(!RateClient::is_valid_code(""));
    }

    #[test]
    fn test_parse_primary_happy_path() {
        let body = r#"{"success":true,"base":"PLN","rates":{"EUR":0.23,"USD":0.25}}"#;
        let rates = parse_primary(body).unwrap();
        assert_eq!(rates.get("EUR"), Some(&0.23));
        assert_eq!(rates.len(), 2);
    }

    #[test]
    fn test_parse_primary_reported_failure() {
        let body = r#"{"success":false,"error":{"code":104}}"#;
        assert!(parse_primary(body).is_err());
    }

    #[test]
    fn test_parse_primary_empty_rates() {
        let body = r#"{"base":"PLN","rates":{}}"#;
        assert!(parse_primary(body).is_err());
    }

    #[test]
    fn test_parse_fallback_happy_path() {
        let body = r#"{"result":"success","base_code":"PLN","rates":{"CZK":5.8}}"#;
        let rates = parse_fallback(body).unwrap();
        assert_eq!(rates.get("CZK"), Some(&5.8));
    }

    #[test]
    fn test_parse_fallback_error_payload() {
        let body = r#"{"result":"error","error-type":"unsupported-code"}"#;
        let err = parse_fallback(body).unwrap_err();
        assert!(err.to_string().contains("unsupported-code"));
    }
}
