//! Price filtering, grouping, and ordering of merged provider results.
//!
//! The processor consumes one [`MergedPricingResponse`] and shapes it for
//! presentation:
//! - drops quotes priced outside the configured band
//! - applies the hard upper cutoff to expanded-tier quotes
//! - drops conforming-tagged quotes for conforming-ineligible applications
//! - groups DSCR runs by program, flat-sorts every other run
//! - derives the prepay-aware display label

use serde::{Deserialize, Serialize};

use crate::types::{
    LoanApplication, MergedPricingResponse, ProgramGroup, ProviderKind, ProviderStatus, RateQuote,
};

/// Base display label for the expanded-market section.
const EXPANDED_LABEL: &str = "Expanded Market Rates";

/// Inclusive acceptable price band.
///
/// Protects the caller from implausible or unpriceable quotes. The observed
/// production band is 99–101; both bounds are configurable because the hard
/// cutoff interpretation differs between tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBand {
    /// Lowest acceptable price, inclusive.
    pub min: f64,
    /// Highest acceptable price, inclusive.
    pub max: f64,
}

impl PriceBand {
    /// True when `price` falls inside the band, bounds included.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceBand {
    fn default() -> Self {
        Self {
            min: 99.0,
            max: 101.0,
        }
    }
}

/// Result-shaping configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Acceptable price band applied to every quote.
    pub band: PriceBand,
    /// Hard upper cutoff applied to expanded-tier quotes regardless of
    /// document type.
    pub expanded_cutoff: f64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            band: PriceBand::default(),
            expanded_cutoff: 101.0,
        }
    }
}

/// Shaped rate listing: flat for most runs, grouped by program for DSCR.
#[derive(Debug, Clone, PartialEq)]
pub enum RateListing {
    /// Single ordered sequence, ascending by price then rate.
    Flat(Vec<RateQuote>),
    /// Program groups in first-appearance order; quotes ordered within each.
    Grouped(Vec<ProgramGroup>),
}

impl RateListing {
    /// Total quote count across the listing.
    pub fn total(&self) -> usize {
        match self {
            RateListing::Flat(rates) => rates.len(),
            RateListing::Grouped(groups) => groups.iter().map(|g| g.rates.len()).sum(),
        }
    }

    /// Flattens the listing back to a single sequence, preserving per-group
    /// order for grouped runs.
    pub fn flatten(&self) -> Vec<RateQuote> {
        match self {
            RateListing::Flat(rates) => rates.clone(),
            RateListing::Grouped(groups) => {
                groups.iter().flat_map(|g| g.rates.iter().cloned()).collect()
            }
        }
    }
}

/// Processed, presentation-ready pricing result.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedResult {
    /// Display label for the expanded-market section, prepay-aware.
    pub label: String,
    /// Shaped rate listing.
    pub listing: RateListing,
    /// Per-provider status carried through from the merge.
    pub providers: Vec<ProviderStatus>,
    /// Provider diagnostics carried through untouched.
    pub debug: Option<serde_json::Value>,
}

/// Shapes a merged response for presentation.
///
/// Filtering is a hard guarantee: every surviving quote satisfies the band,
/// expanded-tier quotes additionally satisfy the hard cutoff, and a
/// conforming-ineligible application yields zero conforming-tagged quotes.
/// An all-filtered result is a valid empty listing, not an error.
pub fn process(
    merged: MergedPricingResponse,
    application: &LoanApplication,
    config: &ProcessorConfig,
) -> ProcessedResult {
    let conforming_eligible = application.conforming_eligible();

    let surviving: Vec<RateQuote> = merged
        .quotes
        .into_iter()
        .filter(|quote| config.band.contains(quote.price))
        .filter(|quote| {
            quote.source != ProviderKind::Expanded || quote.price <= config.expanded_cutoff
        })
        .filter(|quote| conforming_eligible || !quote.is_conforming())
        .collect();

    let listing = if application.documentation_type.is_dscr() {
        RateListing::Grouped(group_by_program(surviving))
    } else {
        let mut flat = surviving;
        sort_quotes(&mut flat);
        RateListing::Flat(flat)
    };

    ProcessedResult {
        label: label_for(application),
        listing,
        providers: merged.providers,
        debug: merged.debug,
    }
}

/// Groups quotes by program in first-appearance order, sorting within each
/// group only. Group order is stable, never alphabetical.
fn group_by_program(quotes: Vec<RateQuote>) -> Vec<ProgramGroup> {
    let mut groups: Vec<ProgramGroup> = Vec::new();
    for quote in quotes {
        match groups.iter_mut().find(|g| g.program == quote.program) {
            Some(group) => group.rates.push(quote),
            None => groups.push(ProgramGroup {
                program: quote.program.clone(),
                rates: vec![quote],
            }),
        }
    }
    for group in &mut groups {
        sort_quotes(&mut group.rates);
    }
    groups
}

/// Ascending by price, ties broken by rate ascending.
fn sort_quotes(quotes: &mut [RateQuote]) {
    quotes.sort_by(|a, b| {
        a.price
            .total_cmp(&b.price)
            .then_with(|| a.rate.total_cmp(&b.rate))
    });
}

fn label_for(application: &LoanApplication) -> String {
    match application.prepay_period.label_suffix() {
        Some(suffix) => format!("{} - {}", EXPANDED_LABEL, suffix),
        None => EXPANDED_LABEL.to_string(),
    }
}
