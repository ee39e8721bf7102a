//! Property tests for grouped result shaping.
//!
//! Grouping a rate list by program and flattening it back, preserving
//! per-group order, must yield the original set of rates (as a set, not
//! necessarily the original flat order).

use proptest::prelude::*;

use quote_core::processor::{process, ProcessorConfig, RateListing};
use quote_core::types::{
    DocumentationType, LoanApplication, MergedPricingResponse, ProviderKind, RateQuote,
};

fn dscr_application() -> LoanApplication {
    LoanApplication {
        documentation_type: DocumentationType::Dscr,
        dscr_value: Some(1.25),
        dscr_ratio: Some(1.25),
        ..Default::default()
    }
}

fn merged(quotes: Vec<RateQuote>) -> MergedPricingResponse {
    MergedPricingResponse {
        quotes,
        providers: Vec::new(),
        debug: None,
        dispatch_skew_ms: 0,
    }
}

/// Sortable identity of a quote for multiset comparison.
fn key(quote: &RateQuote) -> (String, u64, u64) {
    (
        quote.program.clone(),
        quote.rate.to_bits(),
        quote.price.to_bits(),
    )
}

fn quote_strategy() -> impl Strategy<Value = RateQuote> {
    (
        prop::sample::select(vec!["Alpha", "Bravo", "Charlie", "Delta", "Echo"]),
        (5000u32..8000).prop_map(|r| f64::from(r) / 1000.0),
        (9900u32..10100).prop_map(|p| f64::from(p) / 100.0),
    )
        .prop_map(|(program, rate, price)| RateQuote {
            program: program.to_string(),
            rate,
            price,
            price_adjustment: 0.0,
            prepay: None,
            source: ProviderKind::Expanded,
        })
}

proptest! {
    #[test]
    fn grouping_then_flattening_preserves_the_rate_set(
        quotes in prop::collection::vec(quote_strategy(), 0..60)
    ) {
        let result = process(
            merged(quotes.clone()),
            &dscr_application(),
            &ProcessorConfig::default(),
        );

        let mut expected: Vec<_> = quotes.iter().map(key).collect();
        expected.sort();
        let mut actual: Vec<_> = result.listing.flatten().iter().map(key).collect();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn groups_are_disjoint_and_internally_ordered(
        quotes in prop::collection::vec(quote_strategy(), 0..60)
    ) {
        let result = process(
            merged(quotes),
            &dscr_application(),
            &ProcessorConfig::default(),
        );

        let RateListing::Grouped(groups) = result.listing else {
            return Err(TestCaseError::fail("DSCR run must be grouped"));
        };
        for (i, group) in groups.iter().enumerate() {
            prop_assert!(!group.rates.is_empty(), "no empty groups");
            for other in &groups[i + 1..] {
                prop_assert_ne!(&group.program, &other.program);
            }
            for quote in &group.rates {
                prop_assert_eq!(&quote.program, &group.program);
            }
            for pair in group.rates.windows(2) {
                let ordered = pair[0].price < pair[1].price
                    || (pair[0].price == pair[1].price && pair[0].rate <= pair[1].rate);
                prop_assert!(ordered, "group {} out of order", group.program);
            }
        }
    }

    #[test]
    fn every_surviving_price_is_inside_the_band(
        quotes in prop::collection::vec(quote_strategy(), 0..60)
    ) {
        let result = process(
            merged(quotes),
            &dscr_application(),
            &ProcessorConfig::default(),
        );
        for quote in result.listing.flatten() {
            prop_assert!((99.0..=101.0).contains(&quote.price));
        }
    }
}
