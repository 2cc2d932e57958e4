//! Shared HTTP plumbing for stores
//!
//! Each store builds its own `RequestBuilder` (URL, auth headers, body) and
//! maps its own error bodies; this module sends the request, logs it, and
//! turns transport failures and transient statuses into `StoreError`s.

use std::time::Duration;

use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{StoreError, StoreResult};
use crate::utils::log_sanitizer::truncate_for_log;

/// Build an HTTP client with connect and request timeouts.
pub fn create_http_client(
    connect_timeout: Duration,
    request_timeout: Duration,
) -> StoreResult<Client> {
    Client::builder()
        .connect_timeout(connect_timeout)
        .timeout(request_timeout)
        .build()
        .map_err(|e| StoreError::NetworkError {
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// Map a send failure to `Timeout` or `NetworkError`.
fn transport_error(e: &reqwest::Error) -> StoreError {
    if e.is_timeout() {
        StoreError::Timeout {
            detail: e.to_string(),
        }
    } else {
        StoreError::NetworkError {
            detail: e.to_string(),
        }
    }
}

/// Seconds from a numeric `Retry-After` header.
fn retry_after_secs(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

/// Errors decided by status alone, before any store-specific mapping.
fn transient_status_error(
    status: u16,
    retry_after: Option<u64>,
    body: String,
) -> Option<StoreError> {
    match status {
        429 => Some(StoreError::RateLimited {
            retry_after,
            raw_message: Some(body),
        }),
        502..=504 => Some(StoreError::NetworkError {
            detail: format!("HTTP {status}: {}", truncate_for_log(&body)),
        }),
        _ => None,
    }
}

/// Request helpers shared by HTTP-backed stores
pub struct HttpUtils;

impl HttpUtils {
    /// Send a request and return `(status, body)`.
    ///
    /// `store_name`, `method_name` and `url` only label the log lines.
    ///
    /// # Errors
    /// * `Timeout` / `NetworkError` when the request could not be sent
    /// * `RateLimited` for HTTP 429
    /// * `NetworkError` for HTTP 502-504
    ///
    /// Any other status is returned to the caller for store-specific mapping.
    pub async fn execute_request(
        request_builder: RequestBuilder,
        store_name: &str,
        method_name: &str,
        url: &str,
    ) -> StoreResult<(u16, String)> {
        log::debug!("[{store_name}] {method_name} {url}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| transport_error(&e))?;
        let status = response.status().as_u16();
        let retry_after = retry_after_secs(response.headers());
        log::debug!("[{store_name}] Response Status: {status}");

        let body = response
            .text()
            .await
            .map_err(|e| StoreError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;
        log::debug!("[{store_name}] Response Body: {}", truncate_for_log(&body));

        if let Some(err) = transient_status_error(status, retry_after, body.clone()) {
            log::warn!("[{store_name}] {method_name} {url} failed: {err}");
            return Err(err);
        }

        Ok((status, body))
    }

    /// Parse a JSON response body.
    pub fn parse_json<T>(response_text: &str, store_name: &str) -> StoreResult<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!(
                "[{store_name}] Unexpected response ({e}): {}",
                truncate_for_log(response_text)
            );
            StoreError::ParseError {
                detail: e.to_string(),
            }
        })
    }

    /// [`execute_request`](Self::execute_request) with retries on transient failures.
    ///
    /// Only for idempotent requests: a write that timed out may still have
    /// been applied by the server.
    ///
    /// Retries `NetworkError`, `Timeout` and `RateLimited` up to
    /// `max_retries` times, waiting 100ms, 200ms, 400ms, ... (at most 10s),
    /// or the server's `Retry-After` (at most 30s).
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        store_name: &str,
        method_name: &str,
        url: &str,
        max_retries: u32,
    ) -> StoreResult<(u16, String)> {
        let mut attempt = 0;
        loop {
            // RequestBuilder is single-use; a streaming body cannot be cloned
            let Some(request) = request_builder.try_clone() else {
                log::warn!("[{store_name}] Request body not cloneable, sending without retry");
                return Self::execute_request(request_builder, store_name, method_name, url)
                    .await;
            };

            match Self::execute_request(request, store_name, method_name, url).await {
                Err(e) if attempt < max_retries && e.is_retryable() => {
                    let delay = retry_delay(&e, attempt);
                    attempt += 1;
                    log::warn!(
                        "[{store_name}] Attempt {attempt}/{} failed, retrying in {:.1}s: {e}",
                        max_retries + 1,
                        delay.as_secs_f32()
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }
}

/// Use `retry_after` (capped at 30s) for `RateLimited`, exponential backoff otherwise.
fn retry_delay(error: &StoreError, attempt: u32) -> Duration {
    if let StoreError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// 100ms, 200ms, 400ms, 800ms, 1.6s, ... capped at 10 seconds
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20);
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    Duration::from_millis(delay_ms.min(10_000))
}
