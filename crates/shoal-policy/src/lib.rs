#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions, clippy::multiple_crate_versions)]

//! Data-movement policy dispatch for replicated storage topologies.
//!
//! Two policies form the public surface: retention (trim a replica back to a
//! single remaining copy) and replication (copy an object to every resolved
//! destination). Both normalise heterogeneous invocation parameters into one
//! canonical request, then drive the external transfer primitive. Retention
//! is a single attempt; replication fans out per destination, aggregating
//! partial failures instead of short-circuiting.
//!
//! Layout: `model/` (request/outcome carriers), `resolve.rs` (parameter and
//! destination resolution), `identity.rs` (impersonated execution),
//! `transfer.rs` (transfer primitive boundary), `fanout.rs` (per-destination
//! coordination), `service.rs` (the policy entry points).

pub mod error;
pub mod fanout;
pub mod identity;
pub mod model;
pub mod resolve;
pub mod service;
pub mod transfer;

pub use error::{PolicyError, PolicyResult};
pub use fanout::FanoutCoordinator;
pub use identity::{IdentitySwitch, ImpersonatedExecutor};
pub use model::{
    AggregatedResult, DestinationSet, OperationOutcome, OperationRequest, PolicyContext,
};
pub use resolve::{resolve_destinations, resolve_request};
pub use service::PolicyService;
pub use transfer::{ConditionFlags, TransferInvoker, TransferPrimitive};
