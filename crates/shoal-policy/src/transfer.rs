//! Single trim and replicate calls against the external transfer primitive.

use crate::error::{PolicyError, PolicyResult};

/// Number of replicas a trim leaves in place elsewhere in the topology.
const TRIM_REPLICAS_KEPT: u32 = 1;

/// Condition flags attached to one transfer primitive call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionFlags {
    /// Resource holding the replica the operation reads or removes.
    pub source_resource: Option<String>,
    /// Resource receiving the new replica; replicate only.
    pub destination_resource: Option<String>,
    /// Replica-count constraint; trim only.
    pub replica_limit: Option<u32>,
    /// Elevated-operation marker so the primitive bypasses ownership checks.
    /// Mirrors the caller's authentication level, never the impersonated
    /// identity's.
    pub elevated: bool,
}

/// Boundary trait for the external transfer primitive.
///
/// A return value of zero or more is success; a negative value is a failure
/// whose value is surfaced as the error code.
pub trait TransferPrimitive: Send + Sync {
    /// Submit one physical operation for `object_path`.
    fn submit(&self, object_path: &str, flags: &ConditionFlags) -> i32;
}

/// Issues a single trim or replicate call and maps its result.
///
/// One attempt per call; retry policy, if any, belongs to the caller.
pub struct TransferInvoker<'a, P: ?Sized> {
    primitive: &'a P,
}

impl<'a, P: TransferPrimitive + ?Sized> TransferInvoker<'a, P> {
    /// Wrap a transfer primitive.
    #[must_use]
    pub const fn new(primitive: &'a P) -> Self {
        Self { primitive }
    }

    /// Remove the replica held on `source_resource`, constraining the object
    /// to exactly one remaining replica.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Transfer`] carrying the primitive's negative
    /// code and a message naming the object path and source resource.
    pub fn trim(
        &self,
        object_path: &str,
        source_resource: &str,
        privileged: bool,
    ) -> PolicyResult<()> {
        let flags = ConditionFlags {
            source_resource: Some(source_resource.to_string()),
            destination_resource: None,
            replica_limit: Some(TRIM_REPLICAS_KEPT),
            elevated: privileged,
        };

        let code = self.primitive.submit(object_path, &flags);
        if code < 0 {
            return Err(PolicyError::transfer(
                code,
                format!("failed to trim [{object_path}] from [{source_resource}]"),
            ));
        }
        Ok(())
    }

    /// Copy the object from `source_resource` to `destination_resource`.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Transfer`] carrying the primitive's negative
    /// code and a message naming the object path and both resources.
    pub fn replicate(
        &self,
        object_path: &str,
        source_resource: &str,
        destination_resource: &str,
        privileged: bool,
    ) -> PolicyResult<()> {
        let flags = ConditionFlags {
            source_resource: Some(source_resource.to_string()),
            destination_resource: Some(destination_resource.to_string()),
            replica_limit: None,
            elevated: privileged,
        };

        let code = self.primitive.submit(object_path, &flags);
        if code < 0 {
            return Err(PolicyError::transfer(
                code,
                format!(
                    "failed to replicate [{object_path}] from [{source_resource}] to [{destination_resource}]"
                ),
            ));
        }
        Ok(())
    }
}
