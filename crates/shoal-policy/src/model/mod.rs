//! Domain models for policy dispatch.
//!
//! # Design
//! - Keep request/outcome types lightweight data carriers.
//! - Aggregated results are built per call and never persisted; ownership is
//!   exclusive to the invocation that created them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shoal_config::ReplicationConfig;
use shoal_events::Invocation;

/// Canonical parameters for one logical data-movement operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    /// Absolute logical path of the data object.
    pub object_path: String,
    /// Resource the object currently resides on.
    pub source_resource: String,
    /// Explicit single destination, when the invocation carried one.
    pub destination_resource: Option<String>,
    /// Identity to impersonate; `None` runs as the invoking process.
    pub acting_user: Option<String>,
    /// Caller's privilege level, copied verbatim from the boundary.
    pub is_privileged: bool,
}

/// Ordered sequence of destination resource names for one replication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationSet(Vec<String>);

impl DestinationSet {
    /// Wrap an ordered list of destination resource names.
    #[must_use]
    pub const fn new(destinations: Vec<String>) -> Self {
        Self(destinations)
    }

    /// Build a single-destination set.
    #[must_use]
    pub fn single(destination: impl Into<String>) -> Self {
        Self(vec![destination.into()])
    }

    /// Number of destinations in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the set holds no destinations.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate the destinations in their configured order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Borrow the destinations as a slice.
    #[must_use]
    pub const fn as_slice(&self) -> &[String] {
        self.0.as_slice()
    }
}

/// Result of one physical transfer attempt against a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationOutcome {
    /// Destination resource the attempt targeted.
    pub destination: String,
    /// Whether the transfer primitive reported success.
    pub success: bool,
    /// Negative code returned by the primitive on failure.
    pub error_code: Option<i32>,
    /// Composed failure message, when the attempt failed.
    pub message: Option<String>,
    /// When the attempt finished.
    pub completed_at: DateTime<Utc>,
}

/// Combined result of one replication fan-out.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedResult {
    /// True iff every attempted destination succeeded.
    pub all_succeeded: bool,
    /// Failed outcomes, in original destination order.
    pub failures: Vec<OperationOutcome>,
    /// Total number of destinations attempted.
    pub attempted: usize,
}

/// Invocation context handed to the policy entry points.
#[derive(Clone, Copy, Debug)]
pub struct PolicyContext<'a> {
    /// Normalised invocation parameters from the boundary layer.
    pub invocation: &'a Invocation,
    /// Replication routing configuration, when the host supplies one.
    pub configuration: Option<&'a ReplicationConfig>,
    /// Caller's privilege level as reported by the host.
    pub privileged: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_set_preserves_order() {
        let set = DestinationSet::new(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn single_destination_set() {
        let set = DestinationSet::single("archiveResc");
        assert_eq!(set.as_slice(), &["archiveResc".to_string()][..]);
    }
}
