//! Parsing and normalisation helpers for replication routing documents.

use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};
use crate::model::ReplicationConfig;

/// Parse a raw JSON document into a normalised [`ReplicationConfig`].
///
/// An empty-string `destination_resource` is normalised to `None` so the
/// policy core only ever sees a populated destination or nothing at all.
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] when the document does not match the
/// configuration schema, and [`ConfigError::InvalidField`] when a map entry
/// carries an empty source or destination name.
pub fn parse_replication_config(value: &Value) -> ConfigResult<ReplicationConfig> {
    let mut config: ReplicationConfig =
        serde_json::from_value(value.clone()).map_err(|source| ConfigError::Parse {
            path: None,
            source,
        })?;
    normalise(&mut config)?;
    Ok(config)
}

pub(crate) fn normalise(config: &mut ReplicationConfig) -> ConfigResult<()> {
    if config
        .destination_resource
        .as_deref()
        .is_some_and(str::is_empty)
    {
        config.destination_resource = None;
    }

    for (source, destinations) in &config.source_to_destination_map {
        if source.is_empty() {
            return Err(ConfigError::invalid_field(
                "source_to_destination_map",
                "empty source resource name",
            ));
        }
        if let Some(blank) = destinations.iter().position(String::is_empty) {
            return Err(ConfigError::invalid_field(
                format!("source_to_destination_map.{source}[{blank}]"),
                "empty destination resource name",
            ));
        }
    }

    Ok(())
}
