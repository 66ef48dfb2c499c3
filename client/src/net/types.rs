//! Wire DTOs for the questionnaire REST API.
//!
//! DESIGN
//! ======
//! Field names mirror the backend's JSON bodies exactly so serde can encode
//! requests and decode responses without per-call renaming.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile of the signed-in account.
///
/// The backend owns the shape; only `username` is required. Every field the
/// client does not model is preserved in `extra` so the persisted copy
/// round-trips unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Build a profile that only knows its username.
    pub fn from_username(username: impl Into<String>) -> Self {
        Self { username: username.into(), name: None, display_name: None, extra: Map::new() }
    }

    /// Best human-facing label: display name, then name, then username.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&self.username)
    }
}

/// Body of `POST /login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `POST /register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub display_name: String,
    pub username: String,
    pub password: String,
}

/// Body of the `/check/*` availability endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available: bool,
    #[serde(default)]
    pub unique_identifier: Option<String>,
}

/// Response of `POST /login`. Older backends only return the token.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Body of questionnaire create/update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestionnaire {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    /// Creation timestamp in milliseconds since the Unix epoch.
    #[serde(default)]
    pub created_at: i64,
}

/// Body of question create/update.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewQuestion {
    #[serde(default)]
    pub theme: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub theme: Option<String>,
}

/// Whether a join request signs in an existing member or creates a new one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JoinAction {
    Login,
    #[default]
    Register,
}

/// Body of `POST /join/:token`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRequest {
    pub action: JoinAction,
    pub unique_identifier: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub passcode: String,
}

/// Response of `POST /join/:token`. Which fields are present depends on the
/// action and on whether the caller was already signed in.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(default)]
    pub unique_identifier: Option<String>,
    /// One-time passcode for anonymous members; the backend never shows it again.
    #[serde(default)]
    pub passcode: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of `POST /api/questionnaires/:id/invite`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InviteResponse {
    pub token: String,
    pub expires_in: String,
    pub join_url: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerValue {
    Yes,
    No,
    Pass,
}

/// Body of `POST /api/question/:id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRequest {
    pub answer_value: AnswerValue,
}

/// Error body returned by the backend on every non-2xx response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub details: Option<Map<String, Value>>,
}
