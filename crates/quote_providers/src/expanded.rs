//! Expanded-market pricing engine client.
//!
//! The expanded provider wraps its rate list in a `data` envelope and may
//! attach a `debug` object (`rawRateCount`, `mappedValues`,
//! `diag.steps`/`diag.debugRows`) used for operational diagnosis; that
//! object passes through untouched. Its adjustment column is cost-positive,
//! the opposite of the normalized convention, so the sign is flipped during
//! translation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use quote_core::types::{ProviderKind, RateQuote, RateQuoteResult};
use quote_core::RateQuoteRequest;

use crate::client::{self, ClientBuildError, ProviderClient};

/// Program identifier used when the provider omits an attribution.
const UNATTRIBUTED_PROGRAM: &str = "Expanded Market";

/// Client for the best-effort expanded-market pricing engine.
pub struct ExpandedClient {
    base_url: String,
    http: reqwest::Client,
}

/// Wire schema of an expanded provider response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpandedResponse {
    success: bool,
    #[serde(default)]
    data: Option<ExpandedData>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpandedData {
    #[serde(default)]
    rate_options: Vec<ExpandedRate>,
    #[serde(default)]
    debug: Option<serde_json::Value>,
}

/// One row of the expanded provider's rate list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpandedRate {
    rate: f64,
    price: f64,
    /// Cost-positive adjustment total; negated during translation.
    #[serde(default)]
    total_adjustments: f64,
    #[serde(default)]
    program: String,
    #[serde(default)]
    prepay: Option<String>,
}

impl ExpandedClient {
    /// Creates a client for the given provider endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ClientBuildError`] when the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientBuildError> {
        Ok(Self {
            base_url: base_url.into(),
            http: client::build_http_client(concat!("quote-engine/", env!("CARGO_PKG_VERSION")))?,
        })
    }
}

#[async_trait]
impl ProviderClient for ExpandedClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Expanded
    }

    async fn fetch(&self, request: &RateQuoteRequest, deadline: Duration) -> RateQuoteResult {
        let raw = match client::post_json(
            &self.http,
            &self.base_url,
            ProviderKind::Expanded,
            request,
            deadline,
        )
        .await
        {
            Ok(raw) => raw,
            Err((failure, elapsed_ms)) => {
                return client::failed_result(ProviderKind::Expanded, failure, elapsed_ms);
            }
        };

        match parse_expanded(&raw.body) {
            Ok((quotes, debug_payload)) => {
                tracing::debug!(
                    rate_count = quotes.len(),
                    has_debug = debug_payload.is_some(),
                    elapsed_ms = raw.elapsed_ms,
                    "expanded provider responded"
                );
                RateQuoteResult::success(
                    ProviderKind::Expanded,
                    quotes,
                    debug_payload,
                    raw.elapsed_ms,
                )
            }
            Err(failure) => client::failed_result(ProviderKind::Expanded, failure, raw.elapsed_ms),
        }
    }
}

/// Translates an expanded response body into normalized quotes plus the
/// untouched debug payload.
fn parse_expanded(
    body: &str,
) -> Result<(Vec<RateQuote>, Option<serde_json::Value>), quote_core::types::ProviderFailure> {
    let response: ExpandedResponse = serde_json::from_str(body)
        .map_err(|err| client::parse_failure(format!("invalid response body: {}", err), body))?;

    if !response.success {
        let detail = response
            .error
            .unwrap_or_else(|| "provider reported failure".to_string());
        return Err(client::parse_failure(detail, body));
    }

    let Some(data) = response.data else {
        // A success envelope without data carries zero rates.
        return Ok((Vec::new(), None));
    };

    let quotes = data
        .rate_options
        .into_iter()
        .filter(|row| row.rate > 0.0)
        .map(|row| RateQuote {
            program: if row.program.is_empty() {
                UNATTRIBUTED_PROGRAM.to_string()
            } else {
                row.program
            },
            rate: row.rate,
            price: row.price,
            // Normalize to positive = improvement.
            price_adjustment: -row.total_adjustments,
            prepay: row.prepay,
            source: ProviderKind::Expanded,
        })
        .collect();

    Ok((quotes, data.debug))
}
