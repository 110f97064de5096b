use serde::{Deserialize, Serialize};

use super::deserialize_id;

/// The signed-in user's identity record.
///
/// Persisted as JSON under the `user` storage key, so field names follow the
/// API's camelCase spelling.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}
