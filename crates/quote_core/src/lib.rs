//! # quote_core: Foundation Layer for the Rate Quoting Pipeline
//!
//! ## Layer 1 (Foundation) Role
//!
//! quote_core is the bottom layer of the quoting workspace, providing:
//! - Application and quote data model (`types`)
//! - Provider request projection (`mapper`)
//! - Price filtering, grouping, and ordering (`processor`)
//! - External payload shaping (`assembler`)
//! - Error taxonomy: `MappingError`, `QuoteError` (`types::error`)
//!
//! ## Zero I/O Principle
//!
//! Layer 1 performs no network or file I/O and holds no mutable state.
//! Every function is a pure transform over owned values, so the concurrent
//! layers above can share this crate without synchronisation.
//!
//! ## Usage Example
//!
//! ```rust
//! use quote_core::mapper;
//! use quote_core::types::{LoanApplication, ProviderKind};
//!
//! let application = LoanApplication::default();
//! let request = mapper::map(&application, ProviderKind::Primary).unwrap();
//! assert_eq!(request.provider(), ProviderKind::Primary);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod assembler;
pub mod mapper;
pub mod processor;
pub mod types;

pub use assembler::{assemble, assemble_failure, PayloadData, PricingPayload};
pub use mapper::{map, FieldValue, RateQuoteRequest};
pub use processor::{process, PriceBand, ProcessedResult, ProcessorConfig, RateListing};
pub use types::error::{MappingError, QuoteError};
