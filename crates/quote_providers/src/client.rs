//! Shared client plumbing: the `ProviderClient` trait, HTTP client
//! construction, and deadline-bounded request dispatch.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use thiserror::Error;

use quote_core::types::{FailureKind, ProviderFailure, ProviderKind, RateQuoteResult};
use quote_core::RateQuoteRequest;

/// Fixed allowance past the deadline for connection teardown.
///
/// A client must never block its caller beyond the supplied deadline plus
/// this allowance.
pub const TEARDOWN_ALLOWANCE: Duration = Duration::from_secs(2);

/// Raw bodies attached to failures are truncated to this length.
const RAW_BODY_LIMIT: usize = 300;

/// Errors building a provider client.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The underlying HTTP client could not be constructed.
    #[error("http client build failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// One pricing provider, behind a uniform fetch contract.
///
/// `fetch` is infallible at the signature level: failures are part of the
/// produced [`RateQuoteResult`], because the orchestrator's merge policy,
/// not the client, decides whether a failure is fatal.
#[async_trait]
pub trait ProviderClient: Send + Sync {
    /// Which provider this client targets.
    fn kind(&self) -> ProviderKind;

    /// Issues one pricing request, honoring `deadline`.
    async fn fetch(&self, request: &RateQuoteRequest, deadline: Duration) -> RateQuoteResult;
}

/// Builds the reqwest client shared by all requests of one provider client.
///
/// Per-request deadlines are applied at dispatch time, so the client itself
/// carries no global timeout.
pub(crate) fn build_http_client(user_agent: &str) -> Result<reqwest::Client, ClientBuildError> {
    let client = reqwest::Client::builder().user_agent(user_agent).build()?;
    Ok(client)
}

/// Outcome of one deadline-bounded POST: the raw body on HTTP success.
pub(crate) struct RawResponse {
    pub body: String,
    pub elapsed_ms: u64,
}

/// Issues a deadline-bounded JSON POST and classifies transport failures.
///
/// The reqwest request carries the deadline itself; the outer timeout at
/// deadline + [`TEARDOWN_ALLOWANCE`] is the hard bound on how long the
/// caller can be blocked.
pub(crate) async fn post_json(
    client: &reqwest::Client,
    url: &str,
    provider: ProviderKind,
    request: &RateQuoteRequest,
    deadline: Duration,
) -> Result<RawResponse, (ProviderFailure, u64)> {
    let started = Instant::now();
    let send = client
        .post(url)
        .timeout(deadline)
        .json(&request.body())
        .send();

    let response = match tokio::time::timeout(deadline + TEARDOWN_ALLOWANCE, send).await {
        Err(_) => {
            return Err((
                timeout_failure(provider, deadline),
                elapsed_ms(started),
            ));
        }
        Ok(Err(err)) if err.is_timeout() => {
            return Err((
                timeout_failure(provider, deadline),
                elapsed_ms(started),
            ));
        }
        Ok(Err(err)) => {
            return Err((
                ProviderFailure {
                    kind: FailureKind::Provider,
                    detail: format!("request failed: {}", err),
                    raw_body: None,
                },
                elapsed_ms(started),
            ));
        }
        Ok(Ok(response)) => response,
    };

    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            return Err((
                ProviderFailure {
                    kind: FailureKind::Provider,
                    detail: format!("failed to read response body: {}", err),
                    raw_body: None,
                },
                elapsed_ms(started),
            ));
        }
    };

    if !status.is_success() {
        return Err((
            ProviderFailure {
                kind: FailureKind::Provider,
                detail: format!("unexpected status {}", status),
                raw_body: Some(truncate_raw(&body)),
            },
            elapsed_ms(started),
        ));
    }

    Ok(RawResponse {
        body,
        elapsed_ms: elapsed_ms(started),
    })
}

/// Classifies a body that failed schema parsing.
pub(crate) fn parse_failure(detail: String, body: &str) -> ProviderFailure {
    ProviderFailure {
        kind: FailureKind::Provider,
        detail,
        raw_body: Some(truncate_raw(body)),
    }
}

fn timeout_failure(provider: ProviderKind, deadline: Duration) -> ProviderFailure {
    ProviderFailure {
        kind: FailureKind::Timeout,
        detail: format!(
            "{} provider did not respond within {}ms",
            provider,
            deadline.as_millis()
        ),
        raw_body: None,
    }
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Builds a failed result and logs it at the client boundary.
pub(crate) fn failed_result(
    provider: ProviderKind,
    failure: ProviderFailure,
    elapsed_ms: u64,
) -> RateQuoteResult {
    tracing::warn!(
        provider = %provider,
        kind = ?failure.kind,
        detail = %failure.detail,
        elapsed_ms,
        "provider call failed"
    );
    RateQuoteResult::failure(provider, failure, elapsed_ms)
}

fn truncate_raw(body: &str) -> String {
    let mut end = body.len().min(RAW_BODY_LIMIT);
    // Back off to a char boundary so truncation never splits a code point.
    while end > 0 && !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}
