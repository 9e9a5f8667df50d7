//! Argument parsing shared by all tool parameter types.
//!
//! Parameters are deserialized with serde; `serde_path_to_error` tracks where
//! in the argument object a failure happened so the resulting
//! [`ToolError::InvalidArgument`] names the offending field (`formats[1]`).

use rmcp::model::JsonObject;
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_json::Value;
use url::Url;

use crate::domains::tools::ToolError;

/// Deserialize a raw argument object into `T`.
pub fn parse_arguments<T: DeserializeOwned>(arguments: &JsonObject) -> Result<T, ToolError> {
    serde_path_to_error::deserialize(Value::Object(arguments.clone())).map_err(|err| {
        let path = err.path().to_string();
        let reason = err.into_inner().to_string();
        ToolError::invalid_argument(field_name(&path, &reason), reason)
    })
}

/// Field a deserialization error belongs to.
///
/// Missing fields are reported at the root, with the name only in the message.
fn field_name(path: &str, reason: &str) -> String {
    if path != "." {
        return path.to_string();
    }
    reason
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
        .unwrap_or("arguments")
        .to_string()
}

/// Check that `value` is an absolute URL.
pub fn check_url(field: &str, value: &str) -> Result<(), ToolError> {
    Url::parse(value)
        .map(drop)
        .map_err(|e| ToolError::invalid_argument(field, format!("expected a well-formed URL ({e})")))
}

/// Treat an explicit `null` like an absent field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
