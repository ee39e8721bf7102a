//! Error taxonomy for the quoting pipeline.
//!
//! This module provides:
//! - `MappingError`: bad or missing input fields, raised before dispatch
//! - `ProviderFailure`/`FailureKind`: per-call provider failures
//! - `QuoteError`: the overall pricing-run error
//!
//! All-rates-filtered-out is deliberately not an error: an empty result is a
//! valid success so callers can render a deterministic "no rates" state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::quote::ProviderKind;

/// Field-mapping errors raised before any provider request is dispatched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// A field the target provider requires is absent.
    #[error("missing required field `{field}` for {provider} request")]
    MissingField {
        /// Wire name of the missing field.
        field: &'static str,
        /// Provider whose request could not be built.
        provider: ProviderKind,
    },

    /// A field is present but fails range or coercion checks.
    #[error("field `{field}` rejected: {detail}")]
    InvalidField {
        /// Wire name of the rejected field.
        field: &'static str,
        /// What the check found.
        detail: String,
    },
}

/// Kind of a provider-call failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// The provider did not respond within the deadline.
    #[serde(rename = "timeout")]
    Timeout,
    /// The provider responded with an error or an unparseable body.
    #[serde(rename = "providerError")]
    Provider,
}

/// Detail of one failed provider call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFailure {
    /// Failure classification.
    pub kind: FailureKind,
    /// Human-readable failure detail.
    pub detail: String,
    /// Raw provider body attached for operational diagnosis, truncated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_body: Option<String>,
}

/// Overall pricing-run errors.
///
/// Only required-provider failures and pre-dispatch mapping failures surface
/// here; best-effort provider failures are swallowed into per-provider status
/// inside a successful response.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteError {
    /// Input could not be mapped to a provider request.
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// A required provider exceeded its deadline.
    #[error("{provider} provider timed out after {elapsed_ms}ms")]
    Timeout {
        /// Provider that timed out.
        provider: ProviderKind,
        /// Wall time elapsed before the deadline fired.
        elapsed_ms: u64,
    },

    /// A required provider returned an error or malformed response.
    #[error("{provider} provider error: {detail}")]
    Provider {
        /// Provider that failed.
        provider: ProviderKind,
        /// Failure detail.
        detail: String,
    },
}

impl QuoteError {
    /// Lifts a per-call failure from a required provider into a run error.
    pub fn from_failure(provider: ProviderKind, failure: &ProviderFailure, elapsed_ms: u64) -> Self {
        match failure.kind {
            FailureKind::Timeout => QuoteError::Timeout {
                provider,
                elapsed_ms,
            },
            FailureKind::Provider => QuoteError::Provider {
                provider,
                detail: failure.detail.clone(),
            },
        }
    }

    /// Stable error-kind code for the failure envelope.
    pub fn kind_code(&self) -> &'static str {
        match self {
            QuoteError::Mapping(_) => "mappingError",
            QuoteError::Timeout { .. } => "timeout",
            QuoteError::Provider { .. } => "providerError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_error_display() {
        let err = MappingError::MissingField {
            field: "dscrValue",
            provider: ProviderKind::Expanded,
        };
        assert_eq!(
            err.to_string(),
            "missing required field `dscrValue` for expanded request"
        );

        let err = MappingError::InvalidField {
            field: "creditScore",
            detail: "out of range 300-850".to_string(),
        };
        assert!(err.to_string().contains("creditScore"));
    }

    #[test]
    fn test_quote_error_kind_codes() {
        let mapping: QuoteError = MappingError::MissingField {
            field: "dscrRatio",
            provider: ProviderKind::Primary,
        }
        .into();
        assert_eq!(mapping.kind_code(), "mappingError");

        let timeout = QuoteError::Timeout {
            provider: ProviderKind::Primary,
            elapsed_ms: 90_000,
        };
        assert_eq!(timeout.kind_code(), "timeout");
        assert!(timeout.to_string().contains("90000ms"));

        let provider = QuoteError::Provider {
            provider: ProviderKind::Primary,
            detail: "502 Bad Gateway".to_string(),
        };
        assert_eq!(provider.kind_code(), "providerError");
    }

    #[test]
    fn test_failure_lifts_into_run_error() {
        let failure = ProviderFailure {
            kind: FailureKind::Timeout,
            detail: "deadline elapsed".to_string(),
            raw_body: None,
        };
        let err = QuoteError::from_failure(ProviderKind::Primary, &failure, 1_500);
        assert_eq!(
            err,
            QuoteError::Timeout {
                provider: ProviderKind::Primary,
                elapsed_ms: 1_500
            }
        );

        let failure = ProviderFailure {
            kind: FailureKind::Provider,
            detail: "invalid JSON".to_string(),
            raw_body: Some("<html>".to_string()),
        };
        let err = QuoteError::from_failure(ProviderKind::Primary, &failure, 200);
        assert_eq!(err.kind_code(), "providerError");
    }

    #[test]
    fn test_failure_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&FailureKind::Timeout).unwrap(),
            "\"timeout\""
        );
        assert_eq!(
            serde_json::to_string(&FailureKind::Provider).unwrap(),
            "\"providerError\""
        );
    }
}
