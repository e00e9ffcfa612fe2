//! Parameter and destination resolution.
//!
//! # Design
//! - Pure transformations; nothing here touches the transfer primitive.
//! - Destination resolution is an ordered precedence chain, not
//!   exception-driven control flow: explicit destination, then the
//!   configured single destination, then the source-to-destination map.

use shoal_config::ReplicationConfig;
use shoal_events::Invocation;

use crate::error::{PolicyError, PolicyResult};
use crate::model::{DestinationSet, OperationRequest};

/// Normalise an invocation into canonical operation parameters.
///
/// Query invocations join the collection and data name into the object path
/// and never carry a destination or acting user. Payload invocations are
/// taken verbatim, with empty strings normalised to `None`.
///
/// # Errors
///
/// Returns [`PolicyError::InvalidParameterShape`] when the object path or
/// source resource resolves to an empty string; dispatch must fail before
/// any transfer call is attempted.
pub fn resolve_request(
    invocation: &Invocation,
    privileged: bool,
) -> PolicyResult<OperationRequest> {
    let request = match invocation {
        Invocation::Query(triple) => OperationRequest {
            object_path: join_logical_path(&triple.collection, &triple.data_name),
            source_resource: triple.source_resource.clone(),
            destination_resource: None,
            acting_user: None,
            is_privileged: privileged,
        },
        Invocation::Payload(payload) => OperationRequest {
            object_path: payload.object_path.clone(),
            source_resource: payload.source_resource.clone(),
            destination_resource: non_empty(&payload.destination_resource),
            acting_user: non_empty(&payload.user_name),
            is_privileged: privileged,
        },
    };

    if request.object_path.is_empty() {
        return Err(PolicyError::invalid_shape(
            "object path resolved to an empty string",
            invocation.kind(),
        ));
    }
    if request.source_resource.is_empty() {
        return Err(PolicyError::invalid_shape(
            "source resource resolved to an empty string",
            invocation.kind(),
        ));
    }

    Ok(request)
}

/// Determine the full destination set for a replication request.
///
/// Precedence, first non-empty result wins: an explicit destination on the
/// request, the configuration's single destination, the configuration's
/// per-source fan-out map.
///
/// # Errors
///
/// Returns [`PolicyError::MissingDestination`] when no configuration is
/// supplied and the request carries no destination, or when the
/// configuration yields nothing for the request's source resource.
pub fn resolve_destinations(
    request: &OperationRequest,
    configuration: Option<&ReplicationConfig>,
) -> PolicyResult<DestinationSet> {
    if let Some(explicit) = request
        .destination_resource
        .as_deref()
        .filter(|destination| !destination.is_empty())
    {
        return Ok(DestinationSet::single(explicit));
    }

    let Some(config) = configuration else {
        return Err(PolicyError::missing_destination(
            &request.object_path,
            &request.source_resource,
        ));
    };

    configured_single(config)
        .or_else(|| mapped_fanout(config, &request.source_resource))
        .ok_or_else(|| {
            PolicyError::missing_destination(&request.object_path, &request.source_resource)
        })
}

fn configured_single(config: &ReplicationConfig) -> Option<DestinationSet> {
    config
        .destination_resource
        .as_deref()
        .filter(|destination| !destination.is_empty())
        .map(DestinationSet::single)
}

fn mapped_fanout(config: &ReplicationConfig, source_resource: &str) -> Option<DestinationSet> {
    config
        .destinations_for(source_resource)
        .filter(|destinations| !destinations.is_empty())
        .map(|destinations| DestinationSet::new(destinations.to_vec()))
}

/// Normalise a raw string field into `Some` value, mapping the empty string
/// to `None`.
fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Join a collection and a data object name into one logical path.
///
/// Trailing separators on the collection are collapsed so the result always
/// carries exactly one `/` between the two parts; a bare root collection
/// yields `/name`.
fn join_logical_path(collection: &str, data_name: &str) -> String {
    let trimmed = collection.trim_end_matches('/');
    if trimmed.is_empty() {
        if collection.starts_with('/') {
            format!("/{data_name}")
        } else {
            data_name.to_string()
        }
    } else {
        format!("{trimmed}/{data_name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoal_events::{ObjectPayload, QueryTriple};

    fn query(collection: &str, data_name: &str, source: &str) -> Invocation {
        Invocation::Query(QueryTriple {
            collection: collection.to_string(),
            data_name: data_name.to_string(),
            source_resource: source.to_string(),
        })
    }

    fn payload(user: &str, path: &str, source: &str, destination: &str) -> Invocation {
        Invocation::Payload(ObjectPayload {
            user_name: user.to_string(),
            object_path: path.to_string(),
            source_resource: source.to_string(),
            destination_resource: destination.to_string(),
        })
    }

    #[test]
    fn query_invocation_joins_path_and_leaves_rest_empty() {
        let invocation = query("/tempZone/home/alice", "report.dat", "demoResc");
        let request = resolve_request(&invocation, false).expect("valid query");

        assert_eq!(request.object_path, "/tempZone/home/alice/report.dat");
        assert_eq!(request.source_resource, "demoResc");
        assert_eq!(request.destination_resource, None);
        assert_eq!(request.acting_user, None);
        assert!(!request.is_privileged);
    }

    #[test]
    fn trailing_separator_on_collection_is_collapsed() {
        let invocation = query("/tempZone/home/alice/", "report.dat", "demoResc");
        let request = resolve_request(&invocation, false).expect("valid query");
        assert_eq!(request.object_path, "/tempZone/home/alice/report.dat");
    }

    #[test]
    fn root_collection_joins_to_absolute_path() {
        let invocation = query("/", "report.dat", "demoResc");
        let request = resolve_request(&invocation, false).expect("valid query");
        assert_eq!(request.object_path, "/report.dat");
    }

    #[test]
    fn payload_invocation_copies_fields_verbatim() {
        let invocation = payload("alice", "/z/home/alice/o", "cacheResc", "archiveResc");
        let request = resolve_request(&invocation, true).expect("valid payload");

        assert_eq!(request.object_path, "/z/home/alice/o");
        assert_eq!(request.source_resource, "cacheResc");
        assert_eq!(request.destination_resource.as_deref(), Some("archiveResc"));
        assert_eq!(request.acting_user.as_deref(), Some("alice"));
        assert!(request.is_privileged);
    }

    #[test]
    fn empty_object_path_fails_before_dispatch() {
        let invocation = payload("alice", "", "cacheResc", "");
        let err = resolve_request(&invocation, false).expect_err("empty path");
        assert!(matches!(err, PolicyError::InvalidParameterShape { .. }));
    }

    #[test]
    fn empty_source_resource_fails_before_dispatch() {
        let invocation = query("/z/home/alice", "o", "");
        let err = resolve_request(&invocation, false).expect_err("empty source");
        assert!(matches!(err, PolicyError::InvalidParameterShape { .. }));
    }

    fn request_without_destination() -> OperationRequest {
        OperationRequest {
            object_path: "/z/home/alice/o".to_string(),
            source_resource: "cacheResc".to_string(),
            destination_resource: None,
            acting_user: None,
            is_privileged: false,
        }
    }

    #[test]
    fn explicit_destination_overrides_configuration() {
        let request = OperationRequest {
            destination_resource: Some("directResc".to_string()),
            ..request_without_destination()
        };
        let config = ReplicationConfig {
            destination_resource: Some("configuredResc".to_string()),
            ..ReplicationConfig::default()
        };

        let destinations =
            resolve_destinations(&request, Some(&config)).expect("explicit destination");
        assert_eq!(destinations.as_slice(), &["directResc".to_string()][..]);
    }

    #[test]
    fn missing_configuration_fails() {
        let err = resolve_destinations(&request_without_destination(), None)
            .expect_err("no configuration");
        assert!(matches!(err, PolicyError::MissingDestination { .. }));
    }

    #[test]
    fn configured_single_destination_overrides_map() {
        let mut config = ReplicationConfig {
            destination_resource: Some("configuredResc".to_string()),
            ..ReplicationConfig::default()
        };
        config
            .source_to_destination_map
            .insert("cacheResc".to_string(), vec!["mappedResc".to_string()]);

        let destinations = resolve_destinations(&request_without_destination(), Some(&config))
            .expect("configured destination");
        assert_eq!(destinations.as_slice(), &["configuredResc".to_string()][..]);
    }

    #[test]
    fn map_resolves_ordered_fanout_for_source() {
        let mut config = ReplicationConfig::default();
        config.source_to_destination_map.insert(
            "cacheResc".to_string(),
            vec!["archiveResc".to_string(), "offsiteResc".to_string()],
        );

        let destinations = resolve_destinations(&request_without_destination(), Some(&config))
            .expect("mapped destinations");
        assert_eq!(
            destinations.iter().collect::<Vec<_>>(),
            vec!["archiveResc", "offsiteResc"]
        );
    }

    #[test]
    fn unmapped_source_fails() {
        let mut config = ReplicationConfig::default();
        config
            .source_to_destination_map
            .insert("otherResc".to_string(), vec!["archiveResc".to_string()]);

        let err = resolve_destinations(&request_without_destination(), Some(&config))
            .expect_err("no mapping for source");
        assert!(matches!(err, PolicyError::MissingDestination { .. }));
    }

    #[test]
    fn empty_mapped_sequence_fails() {
        let mut config = ReplicationConfig::default();
        config
            .source_to_destination_map
            .insert("cacheResc".to_string(), Vec::new());

        let err = resolve_destinations(&request_without_destination(), Some(&config))
            .expect_err("empty mapping");
        assert!(matches!(err, PolicyError::MissingDestination { .. }));
    }
}
