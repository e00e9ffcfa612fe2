//! Canned invocations and routing configurations.

use serde_json::{Value, json};
use shoal_config::ReplicationConfig;
use shoal_events::{Invocation, ObjectPayload, QueryTriple};

/// Object path shared by the canned invocations.
pub const OBJECT_PATH: &str = "/tempZone/home/alice/report.dat";
/// Collection portion of [`OBJECT_PATH`].
pub const COLLECTION: &str = "/tempZone/home/alice";
/// Data name portion of [`OBJECT_PATH`].
pub const DATA_NAME: &str = "report.dat";
/// Source resource shared by the canned invocations.
pub const SOURCE_RESC: &str = "cacheResc";
/// Acting user shared by the canned payload invocations.
pub const ACTING_USER: &str = "alice";

/// Query-processor invocation for [`OBJECT_PATH`] on [`SOURCE_RESC`].
#[must_use]
pub fn query_invocation() -> Invocation {
    Invocation::Query(QueryTriple {
        collection: COLLECTION.to_string(),
        data_name: DATA_NAME.to_string(),
        source_resource: SOURCE_RESC.to_string(),
    })
}

/// Event-handler invocation without an explicit destination.
#[must_use]
pub fn payload_invocation() -> Invocation {
    Invocation::Payload(ObjectPayload {
        user_name: ACTING_USER.to_string(),
        object_path: OBJECT_PATH.to_string(),
        source_resource: SOURCE_RESC.to_string(),
        destination_resource: String::new(),
    })
}

/// Direct-call invocation carrying an explicit destination.
#[must_use]
pub fn direct_invocation(destination: &str) -> Invocation {
    Invocation::Payload(ObjectPayload {
        user_name: ACTING_USER.to_string(),
        object_path: OBJECT_PATH.to_string(),
        source_resource: SOURCE_RESC.to_string(),
        destination_resource: destination.to_string(),
    })
}

/// Raw boundary parameters matching [`query_invocation`].
#[must_use]
pub fn raw_query_parameters() -> Value {
    json!([COLLECTION, DATA_NAME, SOURCE_RESC])
}

/// Routing configuration with a single configured destination.
#[must_use]
pub fn single_destination_config(destination: &str) -> ReplicationConfig {
    ReplicationConfig {
        destination_resource: Some(destination.to_string()),
        ..ReplicationConfig::default()
    }
}

/// Routing configuration fanning [`SOURCE_RESC`] out to `destinations`.
#[must_use]
pub fn fanout_config(destinations: &[&str]) -> ReplicationConfig {
    let mut config = ReplicationConfig::default();
    config.source_to_destination_map.insert(
        SOURCE_RESC.to_string(),
        destinations.iter().map(ToString::to_string).collect(),
    );
    config
}
