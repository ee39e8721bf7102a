//! Concurrent fan-out to the pricing providers and fan-in of their results.
//!
//! Dispatch order is: map both requests, spawn both fetches, then wait. Both
//! tasks start before either result is awaited, so the wall time of a run is
//! bounded by the slowest provider rather than the sum. Each spawned task
//! reports its start instant over a oneshot channel; the gap between the two
//! instants is recorded on the merged response as `dispatch_skew_ms`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use quote_core::mapper;
use quote_core::types::{
    FailureKind, LoanApplication, MergedPricingResponse, ProviderFailure, ProviderKind,
    ProviderStatus, QuoteError, RateQuoteResult,
};
use quote_core::RateQuoteRequest;
use quote_providers::{ProviderClient, TEARDOWN_ALLOWANCE};

/// Default shared deadline for a pricing run.
pub const DEFAULT_SHARED_DEADLINE: Duration = Duration::from_secs(90);

/// Deadline configuration for a pricing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorOptions {
    /// Deadline applied to both providers unless overridden.
    pub shared_deadline: Duration,
    /// Per-provider override for the primary deadline.
    pub primary_deadline: Option<Duration>,
    /// Per-provider override for the expanded deadline.
    pub expanded_deadline: Option<Duration>,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            shared_deadline: DEFAULT_SHARED_DEADLINE,
            primary_deadline: None,
            expanded_deadline: None,
        }
    }
}

/// Runs the fan-out/fan-in for one pricing request.
///
/// Clients are held behind `Arc<dyn ProviderClient>` so runs can be spawned
/// from request handlers without cloning connection pools.
pub struct Orchestrator {
    primary: Arc<dyn ProviderClient>,
    expanded: Arc<dyn ProviderClient>,
    options: OrchestratorOptions,
}

impl Orchestrator {
    /// Builds an orchestrator with the default deadlines.
    pub fn new(primary: Arc<dyn ProviderClient>, expanded: Arc<dyn ProviderClient>) -> Self {
        Self::with_options(primary, expanded, OrchestratorOptions::default())
    }

    /// Builds an orchestrator with explicit deadline options.
    pub fn with_options(
        primary: Arc<dyn ProviderClient>,
        expanded: Arc<dyn ProviderClient>,
        options: OrchestratorOptions,
    ) -> Self {
        Self {
            primary,
            expanded,
            options,
        }
    }

    /// The deadline options this orchestrator runs with.
    pub fn options(&self) -> OrchestratorOptions {
        self.options
    }

    /// Prices one loan application against both providers.
    ///
    /// Returns `Err` only for mapping failures and primary-provider failures.
    /// An expanded-provider failure degrades to a successful response whose
    /// provider status records the failure. An empty quote list is a valid
    /// success.
    pub async fn price(
        &self,
        application: &LoanApplication,
    ) -> Result<MergedPricingResponse, QuoteError> {
        // Both requests must map before anything is dispatched. A mapping
        // failure reaches neither provider.
        let primary_request = mapper::map(application, ProviderKind::Primary)?;
        let expanded_request = mapper::map(application, ProviderKind::Expanded)?;

        let primary_deadline = self
            .options
            .primary_deadline
            .unwrap_or(self.options.shared_deadline);
        let expanded_deadline = self
            .options
            .expanded_deadline
            .unwrap_or(self.options.shared_deadline);

        let dispatched_at = Instant::now();
        let (primary_task, primary_started) =
            dispatch(Arc::clone(&self.primary), primary_request, primary_deadline);
        let (mut expanded_task, expanded_started) = dispatch(
            Arc::clone(&self.expanded),
            expanded_request,
            expanded_deadline,
        );

        let dispatch_skew_ms = dispatch_skew(primary_started, expanded_started).await;
        tracing::debug!(dispatch_skew_ms, "both providers dispatched");

        let primary_result = match primary_task.await {
            Ok(result) => result,
            Err(join_err) => {
                expanded_task.abort();
                return Err(QuoteError::Provider {
                    provider: ProviderKind::Primary,
                    detail: format!("pricing task aborted: {join_err}"),
                });
            }
        };
        if let Some(failure) = &primary_result.error {
            expanded_task.abort();
            tracing::warn!(
                provider = %ProviderKind::Primary,
                detail = %failure.detail,
                "required provider failed, abandoning run"
            );
            return Err(QuoteError::from_failure(
                ProviderKind::Primary,
                failure,
                primary_result.elapsed_ms,
            ));
        }

        // The guard is the remainder of the expanded window measured from
        // dispatch, so a slow primary never stretches the run past its own
        // ceiling. Saturates to zero when the window is already spent.
        let guard =
            (expanded_deadline + TEARDOWN_ALLOWANCE).saturating_sub(dispatched_at.elapsed());
        let expanded_result = await_best_effort(&mut expanded_task, guard).await;
        if let Some(failure) = &expanded_result.error {
            tracing::warn!(
                provider = %ProviderKind::Expanded,
                kind = ?failure.kind,
                detail = %failure.detail,
                "best-effort provider failed, continuing with primary rates"
            );
        }

        Ok(merge(primary_result, expanded_result, dispatch_skew_ms))
    }
}

/// Spawns one provider fetch and returns its handle plus a receiver that
/// yields the instant the fetch actually started.
fn dispatch(
    client: Arc<dyn ProviderClient>,
    request: RateQuoteRequest,
    deadline: Duration,
) -> (JoinHandle<RateQuoteResult>, oneshot::Receiver<Instant>) {
    let (started_tx, started_rx) = oneshot::channel();
    let handle = tokio::spawn(async move {
        // Receiver may be gone if the run was dropped; the fetch is then
        // aborted with the task, so the lost send is harmless.
        let _ = started_tx.send(Instant::now());
        client.fetch(&request, deadline).await
    });
    (handle, started_rx)
}

/// Gap between the two dispatch instants, in milliseconds.
async fn dispatch_skew(
    primary: oneshot::Receiver<Instant>,
    expanded: oneshot::Receiver<Instant>,
) -> u64 {
    match tokio::join!(primary, expanded) {
        (Ok(a), Ok(b)) => {
            let gap = if a >= b { a - b } else { b - a };
            gap.as_millis() as u64
        }
        // A task that dies before its first poll surfaces through its
        // JoinHandle instead.
        _ => 0,
    }
}

/// Awaits the expanded task under a last-resort guard.
///
/// The client enforces its own deadline, so the guard only fires when the
/// task itself never yields a result. On guard expiry the task is aborted and
/// the provider reported as timed out.
async fn await_best_effort(
    task: &mut JoinHandle<RateQuoteResult>,
    guard: Duration,
) -> RateQuoteResult {
    match tokio::time::timeout(guard, &mut *task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_err)) => RateQuoteResult::failure(
            ProviderKind::Expanded,
            ProviderFailure {
                kind: FailureKind::Provider,
                detail: format!("pricing task aborted: {join_err}"),
                raw_body: None,
            },
            guard.as_millis() as u64,
        ),
        Err(_) => {
            task.abort();
            RateQuoteResult::failure(
                ProviderKind::Expanded,
                ProviderFailure {
                    kind: FailureKind::Timeout,
                    detail: format!("abandoned after {}ms", guard.as_millis()),
                    raw_body: None,
                },
                guard.as_millis() as u64,
            )
        }
    }
}

/// Fans both provider results into one response, primary quotes first.
fn merge(
    primary: RateQuoteResult,
    expanded: RateQuoteResult,
    dispatch_skew_ms: u64,
) -> MergedPricingResponse {
    let providers = vec![
        ProviderStatus::from_result(&primary),
        ProviderStatus::from_result(&expanded),
    ];

    let mut quotes = primary.quotes;
    quotes.extend(expanded.quotes);

    MergedPricingResponse {
        quotes,
        providers,
        debug: expanded.debug,
        dispatch_skew_ms,
    }
}
