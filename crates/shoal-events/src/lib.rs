//! Invocation payloads for the shoal policy engine.
//!
//! The query subsystem delivers positional parameter lists while the event
//! subsystem delivers keyed payloads. Both are normalised here, at the
//! boundary, into a tagged [`Invocation`] union so downstream policy code
//! never inspects container shapes at runtime.

pub mod error;
pub mod payloads;

pub use error::{InvocationError, InvocationResult};
pub use payloads::{
    Invocation, ObjectPayload, QueryTriple, REPLICATION_POLICY_NAME, RETENTION_POLICY_NAME,
};
