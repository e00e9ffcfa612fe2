//! Policy entry points wiring resolution, impersonation, and fan-out.
//!
//! # Design
//! - One service struct owning the boundary collaborators and the metrics
//!   registry; each invocation is stateless and reentrant.
//! - Every invocation runs inside a span carrying a fresh correlation id so
//!   concurrent invocations stay distinguishable in logs.

use tracing::{error, info, info_span};
use uuid::Uuid;

use shoal_events::{REPLICATION_POLICY_NAME, RETENTION_POLICY_NAME};
use shoal_telemetry::Metrics;
use shoal_telemetry::metrics::{OUTCOME_FAILED, OUTCOME_SUCCEEDED};

use crate::error::{PolicyError, PolicyResult};
use crate::fanout::FanoutCoordinator;
use crate::identity::IdentitySwitch;
use crate::model::{AggregatedResult, PolicyContext};
use crate::resolve;
use crate::transfer::{TransferInvoker, TransferPrimitive};

/// Policy dispatch service: the externally visible entry points.
pub struct PolicyService<P, S> {
    transfer: P,
    identity: S,
    metrics: Metrics,
}

impl<P, S> PolicyService<P, S>
where
    P: TransferPrimitive,
    S: IdentitySwitch,
{
    /// Wire the boundary collaborators into a dispatcher.
    #[must_use]
    pub const fn new(transfer: P, identity: S, metrics: Metrics) -> Self {
        Self {
            transfer,
            identity,
            metrics,
        }
    }

    /// Access the metrics registry, e.g. for exposition by the host.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Retention policy: trim the replica held on the source resource,
    /// constraining the object to a single remaining copy.
    ///
    /// A single attempt against a single resource; no impersonation and no
    /// fan-out.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidParameterShape`] when the invocation
    /// cannot be normalised, or [`PolicyError::Transfer`] carrying the
    /// primitive's code when the trim fails.
    pub fn retention(&self, context: &PolicyContext<'_>) -> PolicyResult<()> {
        let span = info_span!(
            "policy",
            policy = RETENTION_POLICY_NAME,
            invocation_id = %Uuid::new_v4(),
            shape = context.invocation.kind()
        );
        let _guard = span.enter();

        let result = self.run_retention(context);
        self.record(RETENTION_POLICY_NAME, result.as_ref().err());
        result
    }

    /// Replication policy: copy the object to every resolved destination,
    /// running each transfer under the acting user's identity.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::InvalidParameterShape`] or
    /// [`PolicyError::MissingDestination`] before any transfer is attempted,
    /// and [`PolicyError::AggregateFailure`] after the fan-out when one or
    /// more destinations failed.
    pub fn replication(&self, context: &PolicyContext<'_>) -> PolicyResult<()> {
        let span = info_span!(
            "policy",
            policy = REPLICATION_POLICY_NAME,
            invocation_id = %Uuid::new_v4(),
            shape = context.invocation.kind()
        );
        let _guard = span.enter();

        let result = self.run_replication(context);
        self.record(REPLICATION_POLICY_NAME, result.as_ref().err());
        result
    }

    fn run_retention(&self, context: &PolicyContext<'_>) -> PolicyResult<()> {
        let request = resolve::resolve_request(context.invocation, context.privileged)?;

        self.metrics.inc_transfer_attempt(RETENTION_POLICY_NAME);
        let result = TransferInvoker::new(&self.transfer).trim(
            &request.object_path,
            &request.source_resource,
            request.is_privileged,
        );
        if result.is_err() {
            self.metrics.inc_transfer_failure(RETENTION_POLICY_NAME);
        }
        result
    }

    fn run_replication(&self, context: &PolicyContext<'_>) -> PolicyResult<()> {
        let request = resolve::resolve_request(context.invocation, context.privileged)?;
        let destinations = resolve::resolve_destinations(&request, context.configuration)?;
        info!(
            object_path = %request.object_path,
            source_resource = %request.source_resource,
            destinations = destinations.len(),
            "resolved replication destinations"
        );

        let coordinator = FanoutCoordinator::new(&self.transfer, &self.identity);
        let aggregated = coordinator.run(&request, &destinations);
        self.metrics
            .add_transfer_attempts(REPLICATION_POLICY_NAME, aggregated.attempted);
        self.metrics
            .add_transfer_failures(REPLICATION_POLICY_NAME, aggregated.failures.len());

        if aggregated.all_succeeded {
            return Ok(());
        }
        Err(aggregate_error(&aggregated))
    }

    fn record(&self, policy: &'static str, failure: Option<&PolicyError>) {
        match failure {
            None => {
                self.metrics.inc_policy_invocation(policy, OUTCOME_SUCCEEDED);
                info!(policy, "policy invocation completed");
            }
            Some(err) => {
                self.metrics.inc_policy_invocation(policy, OUTCOME_FAILED);
                error!(
                    policy,
                    code = err.code().unwrap_or_default(),
                    %err,
                    "policy invocation failed"
                );
            }
        }
    }
}

/// Fold fan-out failures into one error: every failure message joined in
/// destination order, the code taken from the last failure encountered.
fn aggregate_error(aggregated: &AggregatedResult) -> PolicyError {
    let code = aggregated
        .failures
        .iter()
        .rev()
        .find_map(|outcome| outcome.error_code)
        .unwrap_or_default();
    let message = aggregated
        .failures
        .iter()
        .filter_map(|outcome| outcome.message.as_deref())
        .collect::<Vec<_>>()
        .join("; ");

    PolicyError::AggregateFailure {
        code,
        message,
        failed: aggregated.failures.len(),
        attempted: aggregated.attempted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::model::OperationOutcome;

    fn failure(destination: &str, code: i32) -> OperationOutcome {
        OperationOutcome {
            destination: destination.to_string(),
            success: false,
            error_code: Some(code),
            message: Some(format!("failed to replicate [o] from [s] to [{destination}]")),
            completed_at: Utc::now(),
        }
    }

    #[test]
    fn aggregate_error_keeps_last_code_and_every_message() {
        let aggregated = AggregatedResult {
            all_succeeded: false,
            failures: vec![failure("archiveResc", -7), failure("offsiteResc", -9)],
            attempted: 3,
        };

        let err = aggregate_error(&aggregated);
        let PolicyError::AggregateFailure {
            code,
            message,
            failed,
            attempted,
        } = err
        else {
            panic!("expected aggregate failure");
        };
        assert_eq!(code, -9);
        assert_eq!(
            message,
            "failed to replicate [o] from [s] to [archiveResc]; \
             failed to replicate [o] from [s] to [offsiteResc]"
        );
        assert_eq!(failed, 2);
        assert_eq!(attempted, 3);
    }
}
