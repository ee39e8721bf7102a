//! Normalized provider outputs.
//!
//! This module provides:
//! - `ProviderKind` / `ProviderRole`: provider identity and merge policy tag
//! - `RateQuote`: one normalized rate/price point
//! - `RateQuoteResult`: outcome of a single provider call
//! - `MergedPricingResponse`: fan-in of all provider outcomes
//! - `ProgramGroup`: grouped presentation unit for DSCR runs

use serde::{Deserialize, Serialize};

use super::error::ProviderFailure;

/// Identity of a pricing provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// The primary pricing engine. Required for a successful run.
    Primary,
    /// The expanded-market pricing engine. Strictly best-effort.
    Expanded,
}

impl ProviderKind {
    /// Stable lowercase code used in logs and payloads.
    pub fn code(&self) -> &'static str {
        match self {
            ProviderKind::Primary => "primary",
            ProviderKind::Expanded => "expanded",
        }
    }

    /// The merge-policy role this provider plays.
    pub fn role(&self) -> ProviderRole {
        match self {
            ProviderKind::Primary => ProviderRole::Required,
            ProviderKind::Expanded => ProviderRole::BestEffort,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Merge-policy role of a provider.
///
/// The required/best-effort asymmetry is expressed once here and consumed by
/// a single merge policy in the orchestrator, rather than duplicated
/// conditional logic per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProviderRole {
    /// Failure of this provider fails the whole pricing run.
    Required,
    /// Failure of this provider degrades to a partial result.
    BestEffort,
}

/// One normalized rate/price point.
///
/// # Invariants
/// - `price` is a real number with no inherent bound; range filtering is
///   applied downstream by the processor.
/// - `price_adjustment` uses a single sign convention across providers:
///   positive = rate/price improvement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    /// Loan program identifier, e.g. `"NQM Flex 30yr"`.
    pub program: String,
    /// Note rate in percent.
    pub rate: f64,
    /// Price as a percentage of par (99.5–101.0 typical).
    pub price: f64,
    /// Total price adjustment, positive = improvement.
    pub price_adjustment: f64,
    /// Prepay-period label attached by the provider, when priced with one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepay: Option<String>,
    /// Provider that produced this quote.
    pub source: ProviderKind,
}

impl RateQuote {
    /// True when the program carries a conforming tag (`CONF`).
    ///
    /// Conforming-ineligible applications must never surface these quotes.
    pub fn is_conforming(&self) -> bool {
        self.program
            .split(|c: char| c.is_whitespace() || c == '-' || c == '/')
            .any(|token| token.to_ascii_uppercase().starts_with("CONF"))
    }
}

/// Outcome of one provider call.
///
/// Created by a provider client, consumed once by the orchestrator, never
/// mutated after creation. A failed call carries an error detail and the raw
/// provider body when available; a successful call carries the normalized
/// quote list in provider order.
#[derive(Debug, Clone, PartialEq)]
pub struct RateQuoteResult {
    /// Provider that produced this result.
    pub provider: ProviderKind,
    /// Normalized quotes in provider response order. Empty on failure.
    pub quotes: Vec<RateQuote>,
    /// Failure detail when the call did not succeed.
    pub error: Option<ProviderFailure>,
    /// Raw provider diagnostics, passed through untouched when present.
    pub debug: Option<serde_json::Value>,
    /// Wall time the call took, for observability.
    pub elapsed_ms: u64,
}

impl RateQuoteResult {
    /// Builds a successful result.
    pub fn success(
        provider: ProviderKind,
        quotes: Vec<RateQuote>,
        debug: Option<serde_json::Value>,
        elapsed_ms: u64,
    ) -> Self {
        Self {
            provider,
            quotes,
            error: None,
            debug,
            elapsed_ms,
        }
    }

    /// Builds a failed result.
    pub fn failure(provider: ProviderKind, failure: ProviderFailure, elapsed_ms: u64) -> Self {
        Self {
            provider,
            quotes: Vec::new(),
            error: Some(failure),
            debug: None,
            elapsed_ms,
        }
    }

    /// True when the provider call succeeded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-provider status recorded in the merged response for observability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStatus {
    /// Provider identity.
    pub provider: ProviderKind,
    /// Merge-policy role.
    pub role: ProviderRole,
    /// Whether the call succeeded.
    pub success: bool,
    /// Number of quotes returned before filtering.
    pub rate_count: usize,
    /// Wall time of the call in milliseconds.
    pub elapsed_ms: u64,
    /// Failure detail for unsuccessful calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ProviderFailure>,
}

impl ProviderStatus {
    /// Derives a status record from a provider result.
    pub fn from_result(result: &RateQuoteResult) -> Self {
        Self {
            provider: result.provider,
            role: result.provider.role(),
            success: result.is_success(),
            rate_count: result.quotes.len(),
            elapsed_ms: result.elapsed_ms,
            error: result.error.clone(),
        }
    }
}

/// Fan-in of all provider outcomes for one pricing run.
///
/// Owned exclusively by the orchestrator until handed to the processor;
/// nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedPricingResponse {
    /// Union of all successful providers' quotes, primary first.
    pub quotes: Vec<RateQuote>,
    /// Per-provider status, primary first.
    pub providers: Vec<ProviderStatus>,
    /// Expanded-provider diagnostics, passed through untouched.
    pub debug: Option<serde_json::Value>,
    /// Delta between the two outbound dispatches, in milliseconds.
    ///
    /// Recorded so the parallel-dispatch invariant (effectively simultaneous,
    /// never fire-and-wait-then-fire) stays observable.
    pub dispatch_skew_ms: u64,
}

/// Program identifier plus its ordered quotes, for grouped presentation.
///
/// Created fresh per request; never persisted. Group order across a result is
/// the order in which each program's first qualifying quote appeared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramGroup {
    /// Program identifier.
    pub program: String,
    /// Quotes belonging to the program, sorted by price then rate.
    pub rates: Vec<RateQuote>,
}
