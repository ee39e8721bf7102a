//! Provider request projection.
//!
//! [`map`] is the single source of truth for translating a normalized
//! [`LoanApplication`] into each provider's request schema. It is a pure
//! function: validation failures surface as [`MappingError`] before any
//! request is dispatched, and the produced [`RateQuoteRequest`] is immutable
//! after construction.

mod tables;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{LoanApplication, LoanPurpose, MappingError, ProviderKind};

use tables::FieldSource;

/// A typed provider request field value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Labelled option or free-text value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean flag.
    Flag(bool),
}

impl FieldValue {
    /// The text content, when this is a text field.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric content, when this is a number field.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The flag content, when this is a boolean field.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }
}

/// Provider-specific projection of a loan application.
///
/// Built once per provider per pricing run; immutable after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateQuoteRequest {
    provider: ProviderKind,
    fields: BTreeMap<&'static str, FieldValue>,
}

impl RateQuoteRequest {
    /// The provider this request targets.
    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    /// Looks up a field by its provider wire name.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// All populated fields, keyed by provider wire name.
    pub fn fields(&self) -> &BTreeMap<&'static str, FieldValue> {
        &self.fields
    }

    /// JSON body for the outbound provider call.
    pub fn body(&self) -> serde_json::Value {
        serde_json::to_value(&self.fields).unwrap_or_else(|_| serde_json::json!({}))
    }
}

/// Projects an application onto a provider's request schema.
///
/// For DSCR documentation, occupancy is forced to Investment and the DSCR
/// fields are populated; for other documentation types the DSCR fields are
/// omitted entirely.
///
/// # Errors
///
/// Returns [`MappingError`] when a required field for the target provider is
/// missing or fails a range check. Mapping runs before dispatch, so a failed
/// application never reaches a provider.
pub fn map(
    application: &LoanApplication,
    provider: ProviderKind,
) -> Result<RateQuoteRequest, MappingError> {
    validate(application, provider)?;

    let mut fields = BTreeMap::new();
    for spec in tables::fields_for(provider) {
        if let Some(value) = resolve(application, provider, spec.source) {
            fields.insert(spec.target, value);
        }
    }

    Ok(RateQuoteRequest { provider, fields })
}

fn validate(application: &LoanApplication, provider: ProviderKind) -> Result<(), MappingError> {
    if !(300..=850).contains(&application.credit_score) {
        return Err(MappingError::InvalidField {
            field: "creditScore",
            detail: format!("{} outside 300-850", application.credit_score),
        });
    }
    if !(application.loan_amount.is_finite() && application.loan_amount > 0.0) {
        return Err(MappingError::InvalidField {
            field: "loanAmount",
            detail: "must be a positive amount".to_string(),
        });
    }
    if !(application.property_value.is_finite() && application.property_value > 0.0) {
        return Err(MappingError::InvalidField {
            field: "propertyValue",
            detail: "must be a positive amount".to_string(),
        });
    }
    if tables::state_name(&application.property_state).is_none() {
        return Err(MappingError::InvalidField {
            field: "propertyState",
            detail: format!("unknown state code `{}`", application.property_state),
        });
    }
    if provider == ProviderKind::Expanded && application.property_zip.trim().is_empty() {
        return Err(MappingError::MissingField {
            field: "zip",
            provider,
        });
    }

    if application.documentation_type.is_dscr() {
        let dscr_value = application.dscr_value.ok_or(MappingError::MissingField {
            field: "dscrValue",
            provider,
        })?;
        let dscr_ratio = application.dscr_ratio.ok_or(MappingError::MissingField {
            field: "dscrRatio",
            provider,
        })?;
        if !(dscr_value.is_finite() && dscr_value > 0.0) {
            return Err(MappingError::InvalidField {
                field: "dscrValue",
                detail: "must be a positive number".to_string(),
            });
        }
        if !(dscr_ratio.is_finite() && dscr_ratio > 0.0) {
            return Err(MappingError::InvalidField {
                field: "dscrRatio",
                detail: "must be a positive number".to_string(),
            });
        }
    }

    Ok(())
}

fn resolve(
    application: &LoanApplication,
    provider: ProviderKind,
    source: FieldSource,
) -> Option<FieldValue> {
    let is_dscr = application.documentation_type.is_dscr();
    match source {
        FieldSource::Purpose => Some(FieldValue::Text(
            tables::purpose_label(provider, application.loan_purpose).to_string(),
        )),
        FieldSource::Occupancy => Some(FieldValue::Text(
            tables::occupancy_label(provider, application.effective_occupancy()).to_string(),
        )),
        FieldSource::PropertyType => Some(FieldValue::Text(
            tables::property_label(provider, application.property_type).to_string(),
        )),
        FieldSource::Documentation => Some(FieldValue::Text(
            tables::documentation_label(provider, application.documentation_type).to_string(),
        )),
        FieldSource::Citizenship => Some(FieldValue::Text(
            tables::citizenship_label(application.citizenship).to_string(),
        )),
        FieldSource::StateCode => Some(FieldValue::Text(
            application.property_state.to_ascii_uppercase(),
        )),
        FieldSource::StateName => tables::state_name(&application.property_state)
            .map(|name| FieldValue::Text(name.to_string())),
        FieldSource::PropertyZip => Some(FieldValue::Text(application.property_zip.clone())),
        FieldSource::CreditScore => Some(FieldValue::Number(f64::from(application.credit_score))),
        FieldSource::LoanAmount => Some(FieldValue::Number(application.loan_amount)),
        FieldSource::PropertyValue => Some(FieldValue::Number(application.property_value)),
        FieldSource::PurchasePrice => match application.loan_purpose {
            LoanPurpose::Purchase => Some(FieldValue::Number(application.property_value)),
            _ => None,
        },
        FieldSource::Dti => application.dti.map(FieldValue::Number),
        FieldSource::Units => Some(FieldValue::Number(f64::from(
            application.property_type.units(),
        ))),
        FieldSource::Attachment => Some(FieldValue::Text(
            tables::attachment_label(application.structure_type).to_string(),
        )),
        FieldSource::Escrows => Some(FieldValue::Text(
            match application.impound_type {
                crate::types::ImpoundType::Escrowed => "Yes",
                crate::types::ImpoundType::NoEscrow => "No",
            }
            .to_string(),
        )),
        FieldSource::WaiveImpounds => Some(FieldValue::Flag(matches!(
            application.impound_type,
            crate::types::ImpoundType::NoEscrow
        ))),
        FieldSource::InterestOnly => Some(FieldValue::Flag(matches!(
            application.payment_type,
            crate::types::PaymentType::InterestOnly
        ))),
        FieldSource::SelfEmployed => Some(FieldValue::Flag(application.is_self_employed)),
        FieldSource::DscrValue => {
            if is_dscr {
                application.dscr_value.map(FieldValue::Number)
            } else {
                None
            }
        }
        FieldSource::DscrRatio => {
            if is_dscr {
                application.dscr_ratio.map(FieldValue::Number)
            } else {
                None
            }
        }
        FieldSource::PrepayMonths => application
            .prepay_period
            .months()
            .map(|m| FieldValue::Number(f64::from(m))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        DocumentationType, ImpoundType, OccupancyType, PaymentType, PrepayPeriod, PropertyType,
    };

    fn dscr_application() -> LoanApplication {
        LoanApplication {
            documentation_type: DocumentationType::Dscr,
            occupancy_type: OccupancyType::Primary,
            dscr_value: Some(1.25),
            dscr_ratio: Some(1.25),
            ..Default::default()
        }
    }

    #[test]
    fn test_dscr_occupancy_coerced_to_investment_for_both_providers() {
        let app = dscr_application();
        for provider in [ProviderKind::Primary, ProviderKind::Expanded] {
            let request = map(&app, provider).unwrap();
            assert_eq!(
                request.get("occupancy").and_then(FieldValue::as_text),
                Some("Investment"),
                "provider {}",
                provider
            );
        }
    }

    #[test]
    fn test_dscr_fields_populated_for_expanded_request() {
        let request = map(&dscr_application(), ProviderKind::Expanded).unwrap();
        assert_eq!(
            request.get("dscrValue").and_then(FieldValue::as_number),
            Some(1.25)
        );
        assert_eq!(
            request.get("dscrRatio").and_then(FieldValue::as_number),
            Some(1.25)
        );
        assert_eq!(
            request.get("docType").and_then(FieldValue::as_text),
            Some("Investor/DSCR")
        );
    }

    #[test]
    fn test_full_doc_omits_dscr_fields() {
        let app = LoanApplication {
            dscr_value: Some(1.5),
            dscr_ratio: Some(1.5),
            ..Default::default()
        };
        let request = map(&app, ProviderKind::Expanded).unwrap();
        assert!(request.get("dscrValue").is_none());
        assert!(request.get("dscrRatio").is_none());
    }

    #[test]
    fn test_dscr_without_values_is_a_mapping_error() {
        let app = LoanApplication {
            documentation_type: DocumentationType::Dscr,
            ..Default::default()
        };
        let err = map(&app, ProviderKind::Primary).unwrap_err();
        assert_eq!(
            err,
            MappingError::MissingField {
                field: "dscrValue",
                provider: ProviderKind::Primary,
            }
        );
    }

    #[test]
    fn test_credit_score_out_of_range_rejected() {
        let app = LoanApplication {
            credit_score: 200,
            ..Default::default()
        };
        let err = map(&app, ProviderKind::Primary).unwrap_err();
        assert!(matches!(
            err,
            MappingError::InvalidField {
                field: "creditScore",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_state_rejected() {
        let app = LoanApplication {
            property_state: "XX".to_string(),
            ..Default::default()
        };
        assert!(map(&app, ProviderKind::Expanded).is_err());
    }

    #[test]
    fn test_purchase_price_only_for_purchases() {
        let purchase = LoanApplication::default();
        let request = map(&purchase, ProviderKind::Primary).unwrap();
        assert_eq!(
            request.get("purchasePrice").and_then(FieldValue::as_number),
            Some(600_000.0)
        );

        let refi = LoanApplication {
            loan_purpose: crate::types::LoanPurpose::Refinance,
            ..Default::default()
        };
        let request = map(&refi, ProviderKind::Primary).unwrap();
        assert!(request.get("purchasePrice").is_none());
    }

    #[test]
    fn test_state_projection_differs_per_provider() {
        let app = LoanApplication::default();
        let primary = map(&app, ProviderKind::Primary).unwrap();
        assert_eq!(
            primary.get("state").and_then(FieldValue::as_text),
            Some("CA")
        );
        let expanded = map(&app, ProviderKind::Expanded).unwrap();
        assert_eq!(
            expanded.get("state").and_then(FieldValue::as_text),
            Some("California")
        );
    }

    #[test]
    fn test_escrow_projection() {
        let app = LoanApplication {
            impound_type: ImpoundType::NoEscrow,
            ..Default::default()
        };
        let primary = map(&app, ProviderKind::Primary).unwrap();
        assert_eq!(
            primary.get("escrows").and_then(FieldValue::as_text),
            Some("No")
        );
        let expanded = map(&app, ProviderKind::Expanded).unwrap();
        assert_eq!(
            expanded.get("waiveImpounds").and_then(FieldValue::as_flag),
            Some(true)
        );
    }

    #[test]
    fn test_units_and_interest_only_derivation() {
        let app = LoanApplication {
            property_type: PropertyType::ThreeUnit,
            payment_type: PaymentType::InterestOnly,
            ..Default::default()
        };
        let request = map(&app, ProviderKind::Expanded).unwrap();
        assert_eq!(
            request.get("units").and_then(FieldValue::as_number),
            Some(3.0)
        );
        assert_eq!(
            request.get("interestOnly").and_then(FieldValue::as_flag),
            Some(true)
        );
        assert_eq!(
            request.get("propertyType").and_then(FieldValue::as_text),
            Some("2-4 Units")
        );
    }

    #[test]
    fn test_prepay_months_only_when_non_default() {
        let default_prepay = map(&LoanApplication::default(), ProviderKind::Expanded).unwrap();
        assert!(default_prepay.get("prepayMonths").is_none());

        let app = LoanApplication {
            prepay_period: PrepayPeriod::Months36,
            ..Default::default()
        };
        let request = map(&app, ProviderKind::Expanded).unwrap();
        assert_eq!(
            request.get("prepayMonths").and_then(FieldValue::as_number),
            Some(36.0)
        );
    }

    #[test]
    fn test_body_serializes_typed_values() {
        let app = LoanApplication {
            dti: Some(43.0),
            ..Default::default()
        };
        let body = map(&app, ProviderKind::Primary).unwrap().body();
        assert_eq!(body["fico"], serde_json::json!(740.0));
        assert_eq!(body["purpose"], serde_json::json!("Purchase"));
        assert_eq!(body["dti"], serde_json::json!(43.0));
    }
}
