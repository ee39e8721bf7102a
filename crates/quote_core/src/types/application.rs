//! Inbound loan application record and its field enums.
//!
//! The wire names mirror the caller's JSON payload (camelCase keys, lowercase
//! option codes). Every provider-facing translation of these values lives in
//! [`crate::mapper`]; this module only defines the normalized domain model.

use serde::{Deserialize, Serialize};

/// Loan purpose submitted by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanPurpose {
    /// Purchase transaction.
    #[default]
    Purchase,
    /// Rate/term refinance.
    Refinance,
    /// Cash-out refinance.
    Cashout,
}

/// Occupancy type submitted by the caller.
///
/// For DSCR documentation this value is advisory only: the mapper coerces
/// occupancy to `Investment` before any request is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccupancyType {
    /// Primary residence.
    #[default]
    Primary,
    /// Second home.
    Secondary,
    /// Investment property.
    Investment,
}

/// Subject property type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PropertyType {
    /// Single family residence.
    #[default]
    #[serde(rename = "sfr")]
    Sfr,
    /// Condominium.
    #[serde(rename = "condo")]
    Condo,
    /// Townhouse.
    #[serde(rename = "townhouse")]
    Townhouse,
    /// Two-unit property.
    #[serde(rename = "2unit")]
    TwoUnit,
    /// Three-unit property.
    #[serde(rename = "3unit")]
    ThreeUnit,
    /// Four-unit property.
    #[serde(rename = "4unit")]
    FourUnit,
    /// Five-to-nine-unit property.
    #[serde(rename = "5-9unit")]
    FiveToNineUnit,
}

impl PropertyType {
    /// Unit count derived from the property type.
    pub fn units(&self) -> u8 {
        match self {
            PropertyType::Sfr | PropertyType::Condo | PropertyType::Townhouse => 1,
            PropertyType::TwoUnit => 2,
            PropertyType::ThreeUnit => 3,
            PropertyType::FourUnit => 4,
            PropertyType::FiveToNineUnit => 5,
        }
    }
}

/// Income documentation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentationType {
    /// Full income documentation.
    #[default]
    FullDoc,
    /// Debt service coverage ratio qualification.
    Dscr,
    /// Bank statement qualification.
    BankStatement,
    /// Asset depletion qualification.
    AssetDepletion,
    /// Written verification of employment.
    Voe,
    /// No-ratio qualification.
    NoRatio,
}

impl DocumentationType {
    /// True for DSCR documentation, which triggers occupancy coercion,
    /// DSCR field population, and grouped result presentation.
    pub fn is_dscr(&self) -> bool {
        matches!(self, DocumentationType::Dscr)
    }
}

/// Borrower citizenship status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Citizenship {
    /// US citizen.
    #[default]
    UsCitizen,
    /// Permanent resident alien.
    PermanentResident,
    /// Non-permanent resident alien.
    NonPermanentResident,
    /// Foreign national.
    ForeignNational,
    /// ITIN borrower.
    Itin,
}

/// Structure attachment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureType {
    /// Detached structure.
    #[default]
    Detached,
    /// Attached structure.
    Attached,
}

/// Escrow/impound election.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImpoundType {
    /// Taxes and insurance escrowed.
    #[default]
    #[serde(rename = "escrow")]
    Escrowed,
    /// Escrows waived.
    #[serde(rename = "noescrow")]
    NoEscrow,
}

/// Payment structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentType {
    /// Principal and interest.
    #[default]
    #[serde(rename = "pi")]
    PrincipalAndInterest,
    /// Interest only.
    #[serde(rename = "io")]
    InterestOnly,
}

/// Prepayment penalty period assumption.
///
/// `None` is the default pricing assumption; any other value must surface in
/// the processed result's display label so consumers can distinguish pricing
/// runs by prepay assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrepayPeriod {
    /// No prepayment penalty (default assumption).
    #[default]
    #[serde(rename = "none")]
    None,
    /// 12 month prepay period.
    #[serde(rename = "12months")]
    Months12,
    /// 24 month prepay period.
    #[serde(rename = "24months")]
    Months24,
    /// 36 month prepay period.
    #[serde(rename = "36months")]
    Months36,
    /// 60 month prepay period.
    #[serde(rename = "60months")]
    Months60,
}

impl PrepayPeriod {
    /// Prepay period in months, or `None` for the default assumption.
    pub fn months(&self) -> Option<u8> {
        match self {
            PrepayPeriod::None => None,
            PrepayPeriod::Months12 => Some(12),
            PrepayPeriod::Months24 => Some(24),
            PrepayPeriod::Months36 => Some(36),
            PrepayPeriod::Months60 => Some(60),
        }
    }

    /// Display suffix for non-default periods, e.g. `"36 Month Prepay"`.
    pub fn label_suffix(&self) -> Option<String> {
        self.months().map(|m| format!("{} Month Prepay", m))
    }
}

/// Normalized loan application record.
///
/// # Invariants
/// - If `documentation_type` is DSCR, `occupancy_type` is coerced to
///   `Investment` before dispatch (see [`Self::effective_occupancy`]), and
///   `dscr_value`/`dscr_ratio` must be present.
/// - Monetary amounts are plain positive numbers; the caller strips
///   formatting before submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    /// Representative credit score (FICO).
    pub credit_score: u16,
    /// Borrower citizenship status.
    pub citizenship: Citizenship,
    /// Income documentation type.
    pub documentation_type: DocumentationType,
    /// Occupancy type as submitted.
    pub occupancy_type: OccupancyType,
    /// Subject property type.
    pub property_type: PropertyType,
    /// Two-letter property state code.
    pub property_state: String,
    /// Property ZIP code.
    pub property_zip: String,
    /// Loan purpose.
    pub loan_purpose: LoanPurpose,
    /// Requested loan amount.
    pub loan_amount: f64,
    /// Appraised value or purchase price.
    pub property_value: f64,
    /// Self-employment flag.
    #[serde(default)]
    pub is_self_employed: bool,
    /// Debt-to-income ratio, when documented.
    #[serde(default)]
    pub dti: Option<f64>,
    /// Structure attachment type.
    #[serde(default)]
    pub structure_type: StructureType,
    /// Escrow/impound election.
    #[serde(default)]
    pub impound_type: ImpoundType,
    /// Payment structure.
    #[serde(default)]
    pub payment_type: PaymentType,
    /// Debt service coverage value; required for DSCR documentation.
    #[serde(default)]
    pub dscr_value: Option<f64>,
    /// Debt service coverage ratio; required for DSCR documentation.
    #[serde(default)]
    pub dscr_ratio: Option<f64>,
    /// Prepayment penalty period assumption.
    #[serde(default)]
    pub prepay_period: PrepayPeriod,
}

impl LoanApplication {
    /// Occupancy after the DSCR coercion rule.
    ///
    /// DSCR loans always price as investment properties regardless of the
    /// occupancy the caller submitted.
    pub fn effective_occupancy(&self) -> OccupancyType {
        if self.documentation_type.is_dscr() {
            OccupancyType::Investment
        } else {
            self.occupancy_type
        }
    }

    /// Whether conforming programs are eligible for this application.
    ///
    /// Non-full-doc qualification (DSCR in particular) is outside conforming
    /// guidelines, so the processor must drop every conforming-tagged quote.
    pub fn conforming_eligible(&self) -> bool {
        matches!(self.documentation_type, DocumentationType::FullDoc)
    }
}

impl Default for LoanApplication {
    fn default() -> Self {
        Self {
            credit_score: 740,
            citizenship: Citizenship::UsCitizen,
            documentation_type: DocumentationType::FullDoc,
            occupancy_type: OccupancyType::Primary,
            property_type: PropertyType::Sfr,
            property_state: "CA".to_string(),
            property_zip: "90210".to_string(),
            loan_purpose: LoanPurpose::Purchase,
            loan_amount: 450_000.0,
            property_value: 600_000.0,
            is_self_employed: false,
            dti: None,
            structure_type: StructureType::Detached,
            impound_type: ImpoundType::Escrowed,
            payment_type: PaymentType::PrincipalAndInterest,
            dscr_value: None,
            dscr_ratio: None,
            prepay_period: PrepayPeriod::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dscr_forces_investment_occupancy() {
        let app = LoanApplication {
            documentation_type: DocumentationType::Dscr,
            occupancy_type: OccupancyType::Primary,
            ..Default::default()
        };
        assert_eq!(app.effective_occupancy(), OccupancyType::Investment);
    }

    #[test]
    fn test_non_dscr_keeps_submitted_occupancy() {
        let app = LoanApplication {
            occupancy_type: OccupancyType::Secondary,
            ..Default::default()
        };
        assert_eq!(app.effective_occupancy(), OccupancyType::Secondary);
    }

    #[test]
    fn test_conforming_eligibility() {
        let full_doc = LoanApplication::default();
        assert!(full_doc.conforming_eligible());

        let dscr = LoanApplication {
            documentation_type: DocumentationType::Dscr,
            ..Default::default()
        };
        assert!(!dscr.conforming_eligible());

        let bank_statement = LoanApplication {
            documentation_type: DocumentationType::BankStatement,
            ..Default::default()
        };
        assert!(!bank_statement.conforming_eligible());
    }

    #[test]
    fn test_property_type_units() {
        assert_eq!(PropertyType::Sfr.units(), 1);
        assert_eq!(PropertyType::Condo.units(), 1);
        assert_eq!(PropertyType::TwoUnit.units(), 2);
        assert_eq!(PropertyType::FourUnit.units(), 4);
        assert_eq!(PropertyType::FiveToNineUnit.units(), 5);
    }

    #[test]
    fn test_prepay_label_suffix() {
        assert_eq!(PrepayPeriod::None.label_suffix(), None);
        assert_eq!(
            PrepayPeriod::Months36.label_suffix().as_deref(),
            Some("36 Month Prepay")
        );
        assert_eq!(PrepayPeriod::Months12.months(), Some(12));
    }

    #[test]
    fn test_application_wire_names_are_camel_case() {
        let app = LoanApplication {
            documentation_type: DocumentationType::Dscr,
            dscr_value: Some(1.25),
            ..Default::default()
        };
        let json = serde_json::to_string(&app).unwrap();
        assert!(json.contains("\"creditScore\":740"));
        assert!(json.contains("\"documentationType\":\"dscr\""));
        assert!(json.contains("\"dscrValue\":1.25"));
        assert!(json.contains("\"prepayPeriod\":\"none\""));
    }

    #[test]
    fn test_application_round_trips_through_json() {
        let app = LoanApplication {
            documentation_type: DocumentationType::Dscr,
            property_type: PropertyType::TwoUnit,
            prepay_period: PrepayPeriod::Months36,
            dscr_value: Some(1.1),
            dscr_ratio: Some(1.1),
            ..Default::default()
        };
        let json = serde_json::to_string(&app).unwrap();
        let back: LoanApplication = serde_json::from_str(&json).unwrap();
        assert_eq!(back, app);
    }

    #[test]
    fn test_optional_fields_default_when_absent() {
        let json = r#"{
            "creditScore": 700,
            "citizenship": "usCitizen",
            "documentationType": "fullDoc",
            "occupancyType": "primary",
            "propertyType": "sfr",
            "propertyState": "TX",
            "propertyZip": "75001",
            "loanPurpose": "purchase",
            "loanAmount": 300000,
            "propertyValue": 400000
        }"#;
        let app: LoanApplication = serde_json::from_str(json).unwrap();
        assert_eq!(app.prepay_period, PrepayPeriod::None);
        assert_eq!(app.structure_type, StructureType::Detached);
        assert!(app.dscr_value.is_none());
        assert!(!app.is_self_employed);
    }
}
