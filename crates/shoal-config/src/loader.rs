//! Filesystem-backed loading for statically configured deployments.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{ConfigError, ConfigResult};
use crate::model::ReplicationConfig;
use crate::validate;

/// Load and normalise a replication routing document from disk.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read,
/// [`ConfigError::Parse`] when it is not a valid configuration document, and
/// [`ConfigError::InvalidField`] when a routing entry fails validation.
pub fn load_from_path(path: &Path) -> ConfigResult<ReplicationConfig> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::io(path, source))?;
    let mut config: ReplicationConfig =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })?;
    validate::normalise(&mut config)?;

    info!(
        path = %path.display(),
        routed_sources = config.source_to_destination_map.len(),
        has_single_destination = config.destination_resource.is_some(),
        "loaded replication routing configuration"
    );

    Ok(config)
}
