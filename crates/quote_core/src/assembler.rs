//! External payload shaping.
//!
//! Produces the success/failure envelope handed to the external caller.
//! Wire-compatibility rules:
//! - exactly one of `rateOptions` (flat) or `groups` (DSCR) is present
//! - zero surviving rates serialize as an empty array, never null/omitted,
//!   so the caller can render a deterministic "no rates" state
//! - a failed run carries `error` and `errorKind` so "pricing engine
//!   unavailable" is distinguishable from "no eligible rates"

use serde::{Deserialize, Serialize};

use crate::processor::{ProcessedResult, RateListing};
use crate::types::{ProgramGroup, ProviderStatus, QuoteError, RateQuote};

/// Success/failure envelope returned to the external caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPayload {
    /// Overall run outcome.
    pub success: bool,
    /// Shaped result data; present only on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<PayloadData>,
    /// Human-readable error; present only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Stable error-kind code; present only on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
}

/// Result data inside a successful envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayloadData {
    /// Display label for the expanded-market section.
    pub label: String,
    /// Flat rate list; present for non-DSCR runs, possibly empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_options: Option<Vec<RateQuote>>,
    /// Program groups; present for DSCR runs, possibly empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<ProgramGroup>>,
    /// Total surviving rate count across the listing.
    pub total_rates: usize,
    /// Per-provider status for observability.
    pub providers: Vec<ProviderStatus>,
    /// Provider diagnostics passed through untouched, when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<serde_json::Value>,
}

/// Shapes a processed result into the success envelope.
pub fn assemble(processed: ProcessedResult) -> PricingPayload {
    let total_rates = processed.listing.total();
    let (rate_options, groups) = match processed.listing {
        RateListing::Flat(rates) => (Some(rates), None),
        RateListing::Grouped(program_groups) => (None, Some(program_groups)),
    };

    PricingPayload {
        success: true,
        data: Some(PayloadData {
            label: processed.label,
            rate_options,
            groups,
            total_rates,
            providers: processed.providers,
            debug: processed.debug,
        }),
        error: None,
        error_kind: None,
    }
}

/// Shapes a run error into the failure envelope.
pub fn assemble_failure(error: &QuoteError) -> PricingPayload {
    PricingPayload {
        success: false,
        data: None,
        error: Some(error.to_string()),
        error_kind: Some(error.kind_code().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        MappingError, ProviderKind, ProviderRole,
    };

    fn status() -> ProviderStatus {
        ProviderStatus {
            provider: ProviderKind::Primary,
            role: ProviderRole::Required,
            success: true,
            rate_count: 0,
            elapsed_ms: 10,
            error: None,
        }
    }

    #[test]
    fn test_flat_listing_assembles_rate_options() {
        let processed = ProcessedResult {
            label: "Expanded Market Rates".to_string(),
            listing: RateListing::Flat(vec![RateQuote {
                program: "NQM".to_string(),
                rate: 6.0,
                price: 100.0,
                price_adjustment: 0.0,
                prepay: None,
                source: ProviderKind::Primary,
            }]),
            providers: vec![status()],
            debug: None,
        };
        let payload = assemble(processed);
        assert!(payload.success);
        let data = payload.data.unwrap();
        assert_eq!(data.total_rates, 1);
        assert!(data.groups.is_none());
        assert_eq!(data.rate_options.unwrap().len(), 1);
    }

    #[test]
    fn test_empty_flat_listing_serializes_empty_array() {
        let processed = ProcessedResult {
            label: "Expanded Market Rates".to_string(),
            listing: RateListing::Flat(Vec::new()),
            providers: vec![status()],
            debug: None,
        };
        let json = serde_json::to_value(assemble(processed)).unwrap();
        assert_eq!(json["success"], serde_json::json!(true));
        // Empty, never null or absent.
        assert_eq!(json["data"]["rateOptions"], serde_json::json!([]));
        assert_eq!(json["data"]["totalRates"], serde_json::json!(0));
        assert!(json["data"].get("groups").is_none());
    }

    #[test]
    fn test_empty_grouped_listing_serializes_empty_array() {
        let processed = ProcessedResult {
            label: "Expanded Market Rates - 36 Month Prepay".to_string(),
            listing: RateListing::Grouped(Vec::new()),
            providers: vec![status()],
            debug: None,
        };
        let json = serde_json::to_value(assemble(processed)).unwrap();
        assert_eq!(json["data"]["groups"], serde_json::json!([]));
        assert!(json["data"].get("rateOptions").is_none());
        assert_eq!(
            json["data"]["label"],
            serde_json::json!("Expanded Market Rates - 36 Month Prepay")
        );
    }

    #[test]
    fn test_debug_passes_through_untouched() {
        let debug = serde_json::json!({
            "rawRateCount": 42,
            "mappedValues": {"fico": "740"},
            "diag": {"steps": ["form_filled"], "debugRows": []}
        });
        let processed = ProcessedResult {
            label: "Expanded Market Rates".to_string(),
            listing: RateListing::Flat(Vec::new()),
            providers: vec![status()],
            debug: Some(debug.clone()),
        };
        let json = serde_json::to_value(assemble(processed)).unwrap();
        assert_eq!(json["data"]["debug"], debug);
    }

    #[test]
    fn test_failure_envelope_distinguishes_kinds() {
        let timeout = QuoteError::Timeout {
            provider: ProviderKind::Primary,
            elapsed_ms: 90_000,
        };
        let payload = assemble_failure(&timeout);
        assert!(!payload.success);
        assert!(payload.data.is_none());
        assert_eq!(payload.error_kind.as_deref(), Some("timeout"));

        let mapping: QuoteError = MappingError::MissingField {
            field: "dscrValue",
            provider: ProviderKind::Expanded,
        }
        .into();
        let payload = assemble_failure(&mapping);
        assert_eq!(payload.error_kind.as_deref(), Some("mappingError"));
        assert!(payload.error.unwrap().contains("dscrValue"));
    }

    #[test]
    fn test_payload_round_trips_through_json() {
        let processed = ProcessedResult {
            label: "Expanded Market Rates".to_string(),
            listing: RateListing::Flat(Vec::new()),
            providers: vec![status()],
            debug: None,
        };
        let payload = assemble(processed);
        let json = serde_json::to_string(&payload).unwrap();
        let back: PricingPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
