//! Route modules for the quote server
//!
//! This module contains endpoint group-specific routers:
//! - pricing: Loan application pricing endpoint
//! - health: Health check and monitoring endpoints

pub mod health;
pub mod pricing;

use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use quote_core::processor::ProcessorConfig;
use quote_engine::Orchestrator;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Pricing run orchestrator
    pub orchestrator: Arc<Orchestrator>,
    /// Result-shaping configuration
    pub processor: ProcessorConfig,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(orchestrator: Arc<Orchestrator>, processor: ProcessorConfig) -> Self {
        Self {
            orchestrator,
            processor,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(pricing::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod testing {
    //! Stub provider clients shared by the route tests.

    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use quote_core::types::{
        FailureKind, ProviderFailure, ProviderKind, RateQuote, RateQuoteResult,
    };
    use quote_core::RateQuoteRequest;
    use quote_engine::{Orchestrator, OrchestratorOptions};
    use quote_providers::ProviderClient;

    use super::AppState;

    pub struct StubProvider {
        pub kind: ProviderKind,
        pub result: RateQuoteResult,
    }

    #[async_trait]
    impl ProviderClient for StubProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn fetch(&self, _request: &RateQuoteRequest, _deadline: Duration) -> RateQuoteResult {
            self.result.clone()
        }
    }

    pub fn quote(program: &str, rate: f64, price: f64, source: ProviderKind) -> RateQuote {
        RateQuote {
            program: program.to_string(),
            rate,
            price,
            price_adjustment: 0.0,
            prepay: None,
            source,
        }
    }

    pub fn state_with(
        primary: Vec<RateQuote>,
        expanded: Vec<RateQuote>,
    ) -> AppState {
        let primary = Arc::new(StubProvider {
            kind: ProviderKind::Primary,
            result: RateQuoteResult::success(ProviderKind::Primary, primary, None, 100),
        });
        let expanded = Arc::new(StubProvider {
            kind: ProviderKind::Expanded,
            result: RateQuoteResult::success(ProviderKind::Expanded, expanded, None, 150),
        });
        let orchestrator = Arc::new(Orchestrator::with_options(
            primary,
            expanded,
            OrchestratorOptions::default(),
        ));
        AppState::new(orchestrator, quote_core::ProcessorConfig::default())
    }

    pub fn state_with_failed_primary() -> AppState {
        let primary = Arc::new(StubProvider {
            kind: ProviderKind::Primary,
            result: RateQuoteResult::failure(
                ProviderKind::Primary,
                ProviderFailure {
                    kind: FailureKind::Provider,
                    detail: "502 Bad Gateway".to_string(),
                    raw_body: None,
                },
                100,
            ),
        });
        let expanded = Arc::new(StubProvider {
            kind: ProviderKind::Expanded,
            result: RateQuoteResult::success(ProviderKind::Expanded, Vec::new(), None, 150),
        });
        let orchestrator = Arc::new(Orchestrator::new(primary, expanded));
        AppState::new(orchestrator, quote_core::ProcessorConfig::default())
    }
}
