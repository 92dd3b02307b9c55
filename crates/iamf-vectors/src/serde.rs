use iamf_core::errors::{ErrorInfo, SuiteError};
use serde::{de::DeserializeOwned, Serialize};

fn serde_error(code: &str, err: impl ToString) -> SuiteError {
    SuiteError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Serializes a value into JSON bytes with keys in sorted order.
///
/// Going through [`serde_json::Value`] sorts struct fields and map keys alike,
/// since its object map is ordered by key.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SuiteError> {
    let value =
        serde_json::to_value(value).map_err(|err| serde_error("iamf_vectors.json_serialize", err))?;
    serde_json::to_vec(&value).map_err(|err| serde_error("iamf_vectors.json_write", err))
}

/// Serializes a value into YAML.
pub fn to_yaml_string<T: Serialize>(value: &T) -> Result<String, SuiteError> {
    serde_yaml::to_string(value).map_err(|err| serde_error("iamf_vectors.yaml_serialize", err))
}

/// Deserializes a YAML payload into the requested type.
pub fn from_yaml_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, SuiteError> {
    serde_yaml::from_slice(data).map_err(|err| serde_error("iamf_vectors.yaml_deserialize", err))
}
