//! Per-destination coordination for one-to-many replication.

use chrono::Utc;
use tracing::{debug, warn};

use crate::identity::{IdentitySwitch, ImpersonatedExecutor};
use crate::model::{AggregatedResult, DestinationSet, OperationOutcome, OperationRequest};
use crate::transfer::{TransferInvoker, TransferPrimitive};

/// Drives one replicate call per destination and aggregates the outcomes.
pub struct FanoutCoordinator<'a, P: ?Sized, S: ?Sized> {
    invoker: TransferInvoker<'a, P>,
    executor: ImpersonatedExecutor<'a, S>,
}

impl<'a, P: TransferPrimitive + ?Sized, S: IdentitySwitch + ?Sized> FanoutCoordinator<'a, P, S> {
    /// Wire a transfer primitive and an identity switch together.
    #[must_use]
    pub const fn new(primitive: &'a P, switch: &'a S) -> Self {
        Self {
            invoker: TransferInvoker::new(primitive),
            executor: ImpersonatedExecutor::new(switch),
        }
    }

    /// Attempt every destination in order, impersonating the request's
    /// acting user for each transfer.
    ///
    /// Never short-circuits: a failed destination does not stop the
    /// remaining attempts. Failures are recorded in destination order and
    /// partial success is reported, not masked.
    #[must_use]
    pub fn run(
        &self,
        request: &OperationRequest,
        destinations: &DestinationSet,
    ) -> AggregatedResult {
        let identity = request.acting_user.as_deref();
        let mut failures = Vec::new();

        for destination in destinations.iter() {
            let outcome = self.executor.execute_as(identity, || {
                self.invoker.replicate(
                    &request.object_path,
                    &request.source_resource,
                    destination,
                    request.is_privileged,
                )
            });

            match outcome {
                Ok(()) => {
                    debug!(destination, object_path = %request.object_path, "replica written");
                }
                Err(err) => {
                    warn!(
                        destination,
                        code = err.code().unwrap_or_default(),
                        "replication attempt failed"
                    );
                    failures.push(OperationOutcome {
                        destination: destination.to_string(),
                        success: false,
                        error_code: err.code(),
                        message: err.message().map(str::to_owned),
                        completed_at: Utc::now(),
                    });
                }
            }
        }

        // No short-circuit above, so every destination counts as attempted.
        AggregatedResult {
            all_succeeded: failures.is_empty(),
            failures,
            attempted: destinations.len(),
        }
    }
}
