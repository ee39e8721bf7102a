//! # quote_providers: Outbound Rate-Quote Clients
//!
//! ## Provider Layer Role
//!
//! One client per pricing provider, each implementing [`ProviderClient`]:
//! - [`PrimaryClient`]: the required pricing engine
//! - [`ExpandedClient`]: the best-effort expanded-market engine
//!
//! Clients own the full request lifecycle: serialize the mapped request,
//! enforce the supplied deadline (plus a small fixed teardown allowance),
//! and translate the provider's wire schema into normalized [`RateQuote`]
//! values using that provider's own conversion rules. A client never returns
//! an `Err`; every outcome, including timeouts and malformed bodies, is
//! captured in the [`RateQuoteResult`] it produces.
//!
//! [`RateQuote`]: quote_core::types::RateQuote
//! [`RateQuoteResult`]: quote_core::types::RateQuoteResult

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod client;
pub mod expanded;
pub mod primary;

pub use client::{ClientBuildError, ProviderClient, TEARDOWN_ALLOWANCE};
pub use expanded::ExpandedClient;
pub use primary::PrimaryClient;
