//! Core data model for the quoting pipeline.
//!
//! This module provides:
//! - `application`: the inbound `LoanApplication` record and its field enums
//! - `quote`: normalized provider outputs (`RateQuote`, `RateQuoteResult`,
//!   `MergedPricingResponse`, `ProgramGroup`)
//! - `error`: the error taxonomy (`MappingError`, `QuoteError`)

pub mod application;
pub mod error;
pub mod quote;

pub use application::{
    Citizenship, DocumentationType, ImpoundType, LoanApplication, LoanPurpose, OccupancyType,
    PaymentType, PrepayPeriod, PropertyType, StructureType,
};
pub use error::{FailureKind, MappingError, ProviderFailure, QuoteError};
pub use quote::{
    MergedPricingResponse, ProgramGroup, ProviderKind, ProviderRole, ProviderStatus, RateQuote,
    RateQuoteResult,
};
