//! Prometheus-backed metrics registry and snapshot helpers.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Exposes the counters relevant to policy dispatch; exposition is left
//!   to the embedding host via [`Metrics::render`].

use std::sync::Arc;

use anyhow::{Context, Result};
use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};
use serde::Serialize;

/// Outcome label recorded for a successful policy invocation.
pub const OUTCOME_SUCCEEDED: &str = "succeeded";
/// Outcome label recorded for a failed policy invocation.
pub const OUTCOME_FAILED: &str = "failed";

/// Prometheus-backed metrics registry shared across policy services.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    policy_invocations_total: IntCounterVec,
    transfer_attempts_total: IntCounterVec,
    transfer_failures_total: IntCounterVec,
}

/// Snapshot of the policy counters for health reporting.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Total retention invocations that completed successfully.
    pub retention_succeeded_total: u64,
    /// Total retention invocations that failed.
    pub retention_failed_total: u64,
    /// Total replication invocations that completed successfully.
    pub replication_succeeded_total: u64,
    /// Total replication invocations that failed.
    pub replication_failed_total: u64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be
    /// registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let policy_invocations_total = IntCounterVec::new(
            Opts::new(
                "policy_invocations_total",
                "Policy invocations by policy name and outcome",
            ),
            &["policy", "outcome"],
        )?;
        let transfer_attempts_total = IntCounterVec::new(
            Opts::new(
                "transfer_attempts_total",
                "Transfer primitive calls issued by policy name",
            ),
            &["policy"],
        )?;
        let transfer_failures_total = IntCounterVec::new(
            Opts::new(
                "transfer_failures_total",
                "Transfer primitive calls that returned a failure code, by policy name",
            ),
            &["policy"],
        )?;

        registry.register(Box::new(policy_invocations_total.clone()))?;
        registry.register(Box::new(transfer_attempts_total.clone()))?;
        registry.register(Box::new(transfer_failures_total.clone()))?;

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                policy_invocations_total,
                transfer_attempts_total,
                transfer_failures_total,
            }),
        })
    }

    /// Increment the invocation counter for the given policy and outcome.
    pub fn inc_policy_invocation(&self, policy: &str, outcome: &str) {
        self.inner
            .policy_invocations_total
            .with_label_values(&[policy, outcome])
            .inc();
    }

    /// Increment the transfer attempt counter for the given policy.
    pub fn inc_transfer_attempt(&self, policy: &str) {
        self.inner
            .transfer_attempts_total
            .with_label_values(&[policy])
            .inc();
    }

    /// Increment the transfer failure counter for the given policy.
    pub fn inc_transfer_failure(&self, policy: &str) {
        self.inner
            .transfer_failures_total
            .with_label_values(&[policy])
            .inc();
    }

    /// Add a batch of transfer attempts for the given policy.
    pub fn add_transfer_attempts(&self, policy: &str, count: usize) {
        self.inner
            .transfer_attempts_total
            .with_label_values(&[policy])
            .inc_by(Self::as_count(count));
    }

    /// Add a batch of transfer failures for the given policy.
    pub fn add_transfer_failures(&self, policy: &str, count: usize) {
        self.inner
            .transfer_failures_total
            .with_label_values(&[policy])
            .inc_by(Self::as_count(count));
    }

    /// Convert a count to the counter's width, saturating at `u64::MAX`.
    fn as_count(count: usize) -> u64 {
        u64::try_from(count).unwrap_or(u64::MAX)
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .context("failed to encode Prometheus metrics")?;
        String::from_utf8(buffer).context("metrics output was not valid UTF-8")
    }

    /// Take a point-in-time snapshot of the policy invocation counters.
    #[must_use]
    pub fn snapshot(&self, retention_policy: &str, replication_policy: &str) -> MetricsSnapshot {
        let outcome = |policy: &str, outcome: &str| {
            self.inner
                .policy_invocations_total
                .with_label_values(&[policy, outcome])
                .get()
        };
        MetricsSnapshot {
            retention_succeeded_total: outcome(retention_policy, OUTCOME_SUCCEEDED),
            retention_failed_total: outcome(retention_policy, OUTCOME_FAILED),
            replication_succeeded_total: outcome(replication_policy, OUTCOME_SUCCEEDED),
            replication_failed_total: outcome(replication_policy, OUTCOME_FAILED),
        }
    }
}
