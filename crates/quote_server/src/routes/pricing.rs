//! Loan application pricing endpoint
//!
//! Accepts a loan application, runs the concurrent pricing pipeline, and
//! returns the assembled payload. The HTTP status is always 200 for a
//! completed run; the envelope's `success` flag and `errorKind` carry the
//! outcome, so callers never branch on status codes.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use tracing::Instrument;
use uuid::Uuid;

use quote_core::types::LoanApplication;
use quote_core::{assemble, assemble_failure, processor};

use super::AppState;

/// Build the pricing routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/v1/price", post(price_handler))
}

/// POST /api/v1/price - Price a loan application
///
/// Dispatches both providers, shapes the merged result, and returns the
/// pricing envelope. Mapping and required-provider failures produce a
/// `success: false` envelope with an `errorKind` code.
async fn price_handler(
    State(state): State<AppState>,
    Json(application): Json<LoanApplication>,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("pricing_run", %request_id);

    async move {
        tracing::info!(
            state = %application.property_state,
            doc_type = ?application.documentation_type,
            loan_amount = application.loan_amount,
            "pricing request received"
        );

        match state.orchestrator.price(&application).await {
            Ok(merged) => {
                tracing::info!(
                    quote_count = merged.quotes.len(),
                    dispatch_skew_ms = merged.dispatch_skew_ms,
                    "provider results merged"
                );
                let processed = processor::process(merged, &application, &state.processor);
                (StatusCode::OK, Json(assemble(processed)))
            }
            Err(err) => {
                tracing::warn!(kind = err.kind_code(), error = %err, "pricing run failed");
                (StatusCode::OK, Json(assemble_failure(&err)))
            }
        }
    }
    .instrument(span)
    .await
}
