use crate::error::ApiError;
use crate::utils::validate_response_keys;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys a raw user object must carry before it can be mapped.
const REQUIRED_USER_KEYS: &[&str] = &["id", "first_name", "last_name"];

/// A user as returned by the remote API.
///
/// Values are read-only once built; serialized form is `{id, name, job}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: u64,
    name: String,
    job: String,
}

/// Wire shape of a user object inside a `data` envelope.
#[derive(Debug, Deserialize)]
struct RawUser {
    #[serde(deserialize_with = "deserialize_id")]
    id: u64,
    first_name: String,
    last_name: String,
    #[serde(default)]
    job: Option<String>,
}

impl User {
    pub fn new(id: u64, name: impl Into<String>, job: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            job: job.into(),
        }
    }

    /// Builds a user from a loosely-shaped JSON object.
    ///
    /// `id`, `first_name` and `last_name` are required; `job` defaults to an
    /// empty string when absent or `null`. A missing or mistyped field is
    /// reported as an invalid-response error.
    pub fn from_raw(raw: &Value) -> Result<Self, ApiError> {
        validate_response_keys(raw, REQUIRED_USER_KEYS)?;

        let raw = RawUser::deserialize(raw)
            .map_err(|e| ApiError::for_invalid_response(format!("malformed user: {}", e)))?;

        Ok(Self {
            id: raw.id,
            name: format!("{} {}", raw.first_name, raw.last_name),
            job: raw.job.unwrap_or_default(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn job(&self) -> &str {
        &self.job
    }

    /// JSON object with exactly `id`, `name` and `job`.
    pub fn to_representation(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "job": self.job,
        })
    }
}

/// Accepts an identifier sent either as a JSON integer or a numeric string.
pub(crate) fn deserialize_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdValue {
        Int(u64),
        Str(String),
    }

    match IdValue::deserialize(deserializer)? {
        IdValue::Int(i) => Ok(i),
        IdValue::Str(s) => s.trim().parse().map_err(D::Error::custom),
    }
}
