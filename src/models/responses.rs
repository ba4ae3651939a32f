//! Wire shapes for the login exchange and the create response.
//!
//! Fields the suite reads back are `Option`s: a missing or `null` value is
//! defaulted to an empty string at this boundary rather than rejected. A value
//! of the wrong JSON type is treated the same way, with a warning.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    #[serde(rename = "accessToken", default, deserialize_with = "lenient_string")]
    pub access_token: Option<String>,
}

impl TokenResponse {
    /// The bearer token, or an empty string when the service sent none.
    pub fn into_token(self) -> String {
        self.access_token.unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateStoryResponse {
    #[serde(rename = "storyId", default, deserialize_with = "lenient_string")]
    pub story_id: Option<String>,
}

impl CreateStoryResponse {
    pub fn story_id_or_empty(&self) -> String {
        self.story_id.clone().unwrap_or_default()
    }
}

/// A string field that tolerates `null` and non-string values.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(other) => {
            warn!(value = %other, "expected a string field, ignoring the value");
            Ok(None)
        }
    }
}
