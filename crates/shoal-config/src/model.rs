//! Typed replication routing models.
//!
//! # Design
//! - Pure data carriers supplied per invocation by the embedding host.
//! - Parsing and normalisation live in `validate.rs`; disk IO in `loader.rs`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Read-only replication routing configuration.
///
/// Exactly one of the two halves is expected to resolve to a non-empty value
/// for event-handler invocations that lack an explicit destination. The
/// precedence between them is decided by the policy core, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationConfig {
    /// Single destination applied regardless of source resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_resource: Option<String>,
    /// Ordered destination fan-out keyed by source resource.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub source_to_destination_map: BTreeMap<String, Vec<String>>,
}

impl ReplicationConfig {
    /// True when neither routing half is populated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destination_resource
            .as_deref()
            .is_none_or(str::is_empty)
            && self.source_to_destination_map.is_empty()
    }

    /// Destination sequence configured for `source_resource`, if any.
    #[must_use]
    pub fn destinations_for(&self, source_resource: &str) -> Option<&[String]> {
        self.source_to_destination_map
            .get(source_resource)
            .map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_reports_empty() {
        assert!(ReplicationConfig::default().is_empty());

        let blank_destination = ReplicationConfig {
            destination_resource: Some(String::new()),
            ..ReplicationConfig::default()
        };
        assert!(blank_destination.is_empty());
    }

    #[test]
    fn destinations_for_returns_configured_order() {
        let mut map = BTreeMap::new();
        map.insert(
            "cacheResc".to_string(),
            vec!["archiveResc".to_string(), "offsiteResc".to_string()],
        );
        let config = ReplicationConfig {
            destination_resource: None,
            source_to_destination_map: map,
        };

        assert!(!config.is_empty());
        assert_eq!(
            config.destinations_for("cacheResc"),
            Some(&["archiveResc".to_string(), "offsiteResc".to_string()][..])
        );
        assert_eq!(config.destinations_for("otherResc"), None);
    }
}
