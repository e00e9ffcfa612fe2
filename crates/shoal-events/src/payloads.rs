//! Invocation parameter shapes delivered by the query and event subsystems.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{InvocationError, InvocationResult};

/// Number of elements a query-processor parameter list must carry.
pub const QUERY_TUPLE_LEN: usize = 3;

/// Label used by the retention policy for logs and metrics.
pub const RETENTION_POLICY_NAME: &str = "shoal_policy_data_retention";

/// Label used by the replication policy for logs and metrics.
pub const REPLICATION_POLICY_NAME: &str = "shoal_policy_data_replication";

/// Positional query-processor shape: `[collection, data_name, source_resource]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTriple {
    /// Collection (logical directory) holding the data object.
    pub collection: String,
    /// Name of the data object within the collection.
    pub data_name: String,
    /// Resource the object currently resides on.
    pub source_resource: String,
}

/// Event-handler or direct-call shape with named fields.
///
/// Missing fields are read as empty strings; validation of which fields are
/// actually required happens later, in the policy core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectPayload {
    /// Identity the operation acts on behalf of.
    #[serde(default)]
    pub user_name: String,
    /// Absolute logical path of the data object.
    #[serde(default)]
    pub object_path: String,
    /// Resource the object currently resides on.
    #[serde(default)]
    pub source_resource: String,
    /// Explicit single destination, when the caller supplies one.
    #[serde(default)]
    pub destination_resource: String,
}

/// Tagged invocation union constructed by the boundary layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Invocation {
    /// Parameters arrived as an ordered positional list.
    Query(QueryTriple),
    /// Parameters arrived as a keyed structure.
    Payload(ObjectPayload),
}

impl Invocation {
    /// Machine-friendly discriminator for log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Query(_) => "query",
            Self::Payload(_) => "payload",
        }
    }

    /// Build an invocation from raw boundary parameters.
    ///
    /// A JSON array must carry exactly [`QUERY_TUPLE_LEN`] string elements
    /// and becomes [`Invocation::Query`]. A JSON object becomes
    /// [`Invocation::Payload`], reading the four known fields by name with
    /// absent or `null` fields defaulting to the empty string.
    ///
    /// # Errors
    ///
    /// Returns [`InvocationError::InvalidParameterShape`] when the container
    /// is neither an array nor an object, when a positional list has the
    /// wrong arity, or when a present field is not a string.
    pub fn from_parameters(parameters: &Value) -> InvocationResult<Self> {
        match parameters {
            Value::Array(items) => Self::from_positional(items),
            Value::Object(fields) => Ok(Self::Payload(ObjectPayload {
                user_name: read_string_field(fields, "user_name")?,
                object_path: read_string_field(fields, "object_path")?,
                source_resource: read_string_field(fields, "source_resource")?,
                destination_resource: read_string_field(fields, "destination_resource")?,
            })),
            other => Err(InvocationError::InvalidParameterShape {
                reason: "parameters must be a positional list or a keyed structure",
                detail: json_kind(other).to_string(),
            }),
        }
    }

    fn from_positional(items: &[Value]) -> InvocationResult<Self> {
        if items.len() != QUERY_TUPLE_LEN {
            return Err(InvocationError::InvalidParameterShape {
                reason: "positional parameters must have exactly three elements",
                detail: items.len().to_string(),
            });
        }
        Ok(Self::Query(QueryTriple {
            collection: positional_string(items, 0)?,
            data_name: positional_string(items, 1)?,
            source_resource: positional_string(items, 2)?,
        }))
    }
}

fn positional_string(items: &[Value], index: usize) -> InvocationResult<String> {
    items[index]
        .as_str()
        .map(str::to_owned)
        .ok_or_else(|| InvocationError::InvalidParameterShape {
            reason: "positional parameter elements must be strings",
            detail: json_kind(&items[index]).to_string(),
        })
}

fn read_string_field(
    fields: &serde_json::Map<String, Value>,
    name: &'static str,
) -> InvocationResult<String> {
    match fields.get(name) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Err(InvocationError::InvalidParameterShape {
            reason: "payload fields must be strings",
            detail: format!("{name}: {}", json_kind(other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn positional_list_becomes_query() {
        let params = json!(["/tempZone/home/alice", "report.dat", "demoResc"]);
        let invocation = Invocation::from_parameters(&params).expect("valid triple");

        assert_eq!(
            invocation,
            Invocation::Query(QueryTriple {
                collection: "/tempZone/home/alice".into(),
                data_name: "report.dat".into(),
                source_resource: "demoResc".into(),
            })
        );
        assert_eq!(invocation.kind(), "query");
    }

    #[test]
    fn keyed_structure_becomes_payload_with_defaults() {
        let params = json!({
            "object_path": "/tempZone/home/alice/report.dat",
            "source_resource": "demoResc",
        });
        let invocation = Invocation::from_parameters(&params).expect("valid payload");

        let Invocation::Payload(payload) = invocation else {
            panic!("expected payload shape");
        };
        assert_eq!(payload.object_path, "/tempZone/home/alice/report.dat");
        assert_eq!(payload.source_resource, "demoResc");
        assert!(payload.user_name.is_empty());
        assert!(payload.destination_resource.is_empty());
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let params = json!(["only", "two"]);
        let err = Invocation::from_parameters(&params).expect_err("arity mismatch");
        let InvocationError::InvalidParameterShape { detail, .. } = err;
        assert_eq!(detail, "2");
    }

    #[test]
    fn non_string_positional_element_is_rejected() {
        let params = json!(["coll", 42, "resc"]);
        let err = Invocation::from_parameters(&params).expect_err("non-string element");
        let InvocationError::InvalidParameterShape { detail, .. } = err;
        assert_eq!(detail, "number");
    }

    #[test]
    fn non_string_payload_field_is_rejected() {
        let params = json!({ "object_path": ["not", "a", "string"] });
        let err = Invocation::from_parameters(&params).expect_err("non-string field");
        let InvocationError::InvalidParameterShape { detail, .. } = err;
        assert_eq!(detail, "object_path: array");
    }

    #[test]
    fn scalar_container_is_rejected() {
        let err = Invocation::from_parameters(&json!(7)).expect_err("scalar container");
        let InvocationError::InvalidParameterShape { detail, .. } = err;
        assert_eq!(detail, "number");
    }

    #[test]
    fn null_payload_field_reads_as_empty() {
        let params = json!({ "user_name": null, "object_path": "/z/o" });
        let Invocation::Payload(payload) =
            Invocation::from_parameters(&params).expect("valid payload")
        else {
            panic!("expected payload shape");
        };
        assert!(payload.user_name.is_empty());
        assert_eq!(payload.object_path, "/z/o");
    }
}
