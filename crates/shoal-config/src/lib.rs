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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Replication routing configuration for the shoal policy engine.
//!
//! Layout: `model.rs` (typed configuration models), `validate.rs`
//! (parsing/normalisation helpers), `loader.rs` (filesystem-backed loading
//! for statically configured deployments).

pub mod error;
pub mod loader;
pub mod model;
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::load_from_path;
pub use model::ReplicationConfig;
pub use validate::parse_replication_config;
