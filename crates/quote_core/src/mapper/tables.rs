//! Per-provider translation tables.
//!
//! Every field-name and option-label discrepancy between the two providers is
//! resolved here. Adding a third provider means adding a field table and a
//! column to the label functions, not new control flow in the mapper.

use crate::types::{
    Citizenship, DocumentationType, LoanPurpose, OccupancyType, PropertyType, ProviderKind,
    StructureType,
};

/// How a provider field is derived from the application record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldSource {
    /// Loan purpose, provider-labelled.
    Purpose,
    /// Effective occupancy (post DSCR coercion), provider-labelled.
    Occupancy,
    /// Property type, provider-labelled.
    PropertyType,
    /// Documentation type, provider-labelled.
    Documentation,
    /// Citizenship, provider-labelled.
    Citizenship,
    /// Two-letter state code.
    StateCode,
    /// Full state name.
    StateName,
    /// Property ZIP code.
    PropertyZip,
    /// Credit score as a number.
    CreditScore,
    /// Loan amount.
    LoanAmount,
    /// Appraised value.
    PropertyValue,
    /// Purchase price; only populated for purchase transactions.
    PurchasePrice,
    /// Debt-to-income ratio, when documented.
    Dti,
    /// Unit count derived from property type.
    Units,
    /// Structure attachment label.
    Attachment,
    /// Escrow election as a Yes/No label.
    Escrows,
    /// Escrow waiver as a flag.
    WaiveImpounds,
    /// Interest-only flag.
    InterestOnly,
    /// Self-employment flag.
    SelfEmployed,
    /// DSCR value; only populated for DSCR documentation.
    DscrValue,
    /// DSCR ratio; only populated for DSCR documentation.
    DscrRatio,
    /// Prepay period in months; only populated for non-default periods.
    PrepayMonths,
}

/// One entry of a provider field table: target wire name plus derivation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldSpec {
    /// Wire name in the provider's request schema.
    pub target: &'static str,
    /// Derivation from the application record.
    pub source: FieldSource,
}

const fn spec(target: &'static str, source: FieldSource) -> FieldSpec {
    FieldSpec { target, source }
}

/// Primary provider request schema.
pub(crate) const PRIMARY_FIELDS: &[FieldSpec] = &[
    spec("purpose", FieldSource::Purpose),
    spec("occupancy", FieldSource::Occupancy),
    spec("propertyType", FieldSource::PropertyType),
    spec("incomeDoc", FieldSource::Documentation),
    spec("citizenship", FieldSource::Citizenship),
    spec("state", FieldSource::StateCode),
    spec("appraisedValue", FieldSource::PropertyValue),
    spec("purchasePrice", FieldSource::PurchasePrice),
    spec("firstLienAmount", FieldSource::LoanAmount),
    spec("fico", FieldSource::CreditScore),
    spec("dti", FieldSource::Dti),
    spec("escrows", FieldSource::Escrows),
];

/// Expanded-market provider request schema.
pub(crate) const EXPANDED_FIELDS: &[FieldSpec] = &[
    spec("fico", FieldSource::CreditScore),
    spec("citizenship", FieldSource::Citizenship),
    spec("docType", FieldSource::Documentation),
    spec("dscrValue", FieldSource::DscrValue),
    spec("dscrRatio", FieldSource::DscrRatio),
    spec("occupancy", FieldSource::Occupancy),
    spec("propertyType", FieldSource::PropertyType),
    spec("units", FieldSource::Units),
    spec("attachmentType", FieldSource::Attachment),
    spec("zip", FieldSource::PropertyZip),
    spec("state", FieldSource::StateName),
    spec("loanPurpose", FieldSource::Purpose),
    spec("purchasePrice", FieldSource::PropertyValue),
    spec("loanAmount", FieldSource::LoanAmount),
    spec("waiveImpounds", FieldSource::WaiveImpounds),
    spec("interestOnly", FieldSource::InterestOnly),
    spec("selfEmployed", FieldSource::SelfEmployed),
    spec("prepayMonths", FieldSource::PrepayMonths),
];

/// Field table for a provider.
pub(crate) fn fields_for(provider: ProviderKind) -> &'static [FieldSpec] {
    match provider {
        ProviderKind::Primary => PRIMARY_FIELDS,
        ProviderKind::Expanded => EXPANDED_FIELDS,
    }
}

/// Loan purpose label in the provider's vocabulary.
pub(crate) fn purpose_label(provider: ProviderKind, purpose: LoanPurpose) -> &'static str {
    match (provider, purpose) {
        (_, LoanPurpose::Purchase) => "Purchase",
        (ProviderKind::Primary, LoanPurpose::Refinance) => "Rate/Term Refinance",
        (ProviderKind::Primary, LoanPurpose::Cashout) => "Cash-Out Refinance",
        (ProviderKind::Expanded, LoanPurpose::Refinance) => "Refinance",
        (ProviderKind::Expanded, LoanPurpose::Cashout) => "Cashout Refinance",
    }
}

/// Occupancy label in the provider's vocabulary.
pub(crate) fn occupancy_label(provider: ProviderKind, occupancy: OccupancyType) -> &'static str {
    match (provider, occupancy) {
        (ProviderKind::Primary, OccupancyType::Primary) => "Primary",
        (ProviderKind::Expanded, OccupancyType::Primary) => "Primary Residence",
        (_, OccupancyType::Secondary) => "Second Home",
        (_, OccupancyType::Investment) => "Investment",
    }
}

/// Property-type label in the provider's vocabulary.
pub(crate) fn property_label(provider: ProviderKind, property: PropertyType) -> &'static str {
    match (provider, property) {
        (ProviderKind::Primary, PropertyType::Sfr) => "SFR",
        (ProviderKind::Expanded, PropertyType::Sfr) => "Single Family Residence",
        (_, PropertyType::Condo) => "Condo",
        (_, PropertyType::Townhouse) => "Townhouse",
        (ProviderKind::Primary, PropertyType::TwoUnit) => "2 Unit",
        (ProviderKind::Primary, PropertyType::ThreeUnit) => "3 Unit",
        (ProviderKind::Primary, PropertyType::FourUnit) => "4 Unit",
        (ProviderKind::Primary, PropertyType::FiveToNineUnit) => "5+ Unit",
        (
            ProviderKind::Expanded,
            PropertyType::TwoUnit | PropertyType::ThreeUnit | PropertyType::FourUnit,
        ) => "2-4 Units",
        (ProviderKind::Expanded, PropertyType::FiveToNineUnit) => "MultiFamily 5-8 Units",
    }
}

/// Documentation-type label in the provider's vocabulary.
pub(crate) fn documentation_label(
    provider: ProviderKind,
    documentation: DocumentationType,
) -> &'static str {
    match (provider, documentation) {
        (_, DocumentationType::FullDoc) => "Full Doc",
        (ProviderKind::Primary, DocumentationType::Dscr) => "DSCR",
        (ProviderKind::Expanded, DocumentationType::Dscr) => "Investor/DSCR",
        (ProviderKind::Primary, DocumentationType::BankStatement) => "Bank Statement",
        (ProviderKind::Expanded, DocumentationType::BankStatement) => {
            "24 Mo Personal Bank Statements"
        }
        (ProviderKind::Primary, DocumentationType::AssetDepletion) => "Asset Depletion",
        (ProviderKind::Expanded, DocumentationType::AssetDepletion) => "Asset Utilization",
        (ProviderKind::Primary, DocumentationType::Voe) => "VOE",
        (ProviderKind::Expanded, DocumentationType::Voe) => "WVOE",
        (ProviderKind::Primary, DocumentationType::NoRatio) => "No Ratio",
        // The expanded provider has no no-ratio program tier.
        (ProviderKind::Expanded, DocumentationType::NoRatio) => "Full Doc",
    }
}

/// Citizenship label shared by both providers.
pub(crate) fn citizenship_label(citizenship: Citizenship) -> &'static str {
    match citizenship {
        Citizenship::UsCitizen => "US Citizen",
        Citizenship::PermanentResident => "Permanent Resident",
        Citizenship::NonPermanentResident => "Non-Permanent Resident",
        Citizenship::ForeignNational => "Foreign National",
        Citizenship::Itin => "ITIN",
    }
}

/// Structure attachment label shared by both providers.
pub(crate) fn attachment_label(structure: StructureType) -> &'static str {
    match structure {
        StructureType::Attached => "Attached",
        StructureType::Detached => "Detached",
    }
}

/// Full state name for a two-letter code, as the expanded provider expects.
pub(crate) fn state_name(code: &str) -> Option<&'static str> {
    let name = match code.to_ascii_uppercase().as_str() {
        "AL" => "Alabama",
        "AK" => "Alaska",
        "AZ" => "Arizona",
        "AR" => "Arkansas",
        "CA" => "California",
        "CO" => "Colorado",
        "CT" => "Connecticut",
        "DE" => "Delaware",
        "FL" => "Florida",
        "GA" => "Georgia",
        "HI" => "Hawaii",
        "ID" => "Idaho",
        "IL" => "Illinois",
        "IN" => "Indiana",
        "IA" => "Iowa",
        "KS" => "Kansas",
        "KY" => "Kentucky",
        "LA" => "Louisiana",
        "ME" => "Maine",
        "MD" => "Maryland",
        "MA" => "Massachusetts",
        "MI" => "Michigan",
        "MN" => "Minnesota",
        "MS" => "Mississippi",
        "MO" => "Missouri",
        "MT" => "Montana",
        "NE" => "Nebraska",
        "NV" => "Nevada",
        "NH" => "New Hampshire",
        "NJ" => "New Jersey",
        "NM" => "New Mexico",
        "NY" => "New York",
        "NC" => "North Carolina",
        "ND" => "North Dakota",
        "OH" => "Ohio",
        "OK" => "Oklahoma",
        "OR" => "Oregon",
        "PA" => "Pennsylvania",
        "RI" => "Rhode Island",
        "SC" => "South Carolina",
        "SD" => "South Dakota",
        "TN" => "Tennessee",
        "TX" => "Texas",
        "UT" => "Utah",
        "VT" => "Vermont",
        "VA" => "Virginia",
        "WA" => "Washington",
        "WV" => "West Virginia",
        "WI" => "Wisconsin",
        "WY" => "Wyoming",
        "DC" => "District of Columbia",
        _ => return None,
    };
    Some(name)
}
