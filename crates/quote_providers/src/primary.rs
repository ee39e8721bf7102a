//! Primary pricing engine client.
//!
//! The primary provider returns a flat rate sheet: one row per rate/lock
//! combination with a program attributed to an investor. Its price
//! adjustments already follow the normalized convention (positive =
//! improvement) so normalization is a straight projection.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use quote_core::types::{ProviderKind, RateQuote, RateQuoteResult};
use quote_core::RateQuoteRequest;

use crate::client::{self, ClientBuildError, ProviderClient};

/// Client for the required primary pricing engine.
pub struct PrimaryClient {
    base_url: String,
    http: reqwest::Client,
}

/// Wire schema of a primary provider response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrimaryResponse {
    success: bool,
    #[serde(default)]
    rates: Vec<PrimaryRate>,
    #[serde(default)]
    error: Option<String>,
}

/// One row of the primary provider's rate sheet.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PrimaryRate {
    rate: f64,
    price: f64,
    #[serde(default)]
    price_adjustment: f64,
    #[serde(default)]
    product: String,
    #[serde(default)]
    investor: String,
    #[serde(default)]
    prepay: Option<String>,
}

impl PrimaryClient {
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
impl ProviderClient for PrimaryClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Primary
    }

    async fn fetch(&self, request: &RateQuoteRequest, deadline: Duration) -> RateQuoteResult {
        let raw = match client::post_json(
            &self.http,
            &self.base_url,
            ProviderKind::Primary,
            request,
            deadline,
        )
        .await
        {
            Ok(raw) => raw,
            Err((failure, elapsed_ms)) => {
                return client::failed_result(ProviderKind::Primary, failure, elapsed_ms);
            }
        };

        match parse_primary(&raw.body) {
            Ok(quotes) => {
                tracing::debug!(
                    rate_count = quotes.len(),
                    elapsed_ms = raw.elapsed_ms,
                    "primary provider responded"
                );
                RateQuoteResult::success(ProviderKind::Primary, quotes, None, raw.elapsed_ms)
            }
            Err(failure) => client::failed_result(ProviderKind::Primary, failure, raw.elapsed_ms),
        }
    }
}

/// Translates a primary response body into normalized quotes.
///
/// Rows without a positive rate are noise in the provider's sheet and are
/// skipped. The program identifier prefers the investor attribution and
/// falls back to the product name.
fn parse_primary(body: &str) -> Result<Vec<RateQuote>, quote_core::types::ProviderFailure> {
    let response: PrimaryResponse = serde_json::from_str(body)
        .map_err(|err| client::parse_failure(format!("invalid response body: {}", err), body))?;

    if !response.success {
        let detail = response
            .error
            .unwrap_or_else(|| "provider reported failure".to_string());
        return Err(client::parse_failure(detail, body));
    }

    Ok(response
        .rates
        .into_iter()
        .filter(|row| row.rate > 0.0)
        .map(|row| {
            let program = if row.investor.is_empty() {
                row.product
            } else {
                row.investor
            };
            RateQuote {
                program,
                rate: row.rate,
                price: row.price,
                price_adjustment: row.price_adjustment,
                prepay: row.prepay,
                source: ProviderKind::Primary,
            }
        })
        .collect())
}
