//! REST endpoint wrappers for the questionnaire backend.
//!
//! Each method maps to exactly one verb + path + payload and returns the raw
//! [`ApiResponse`]; callers decode with [`ApiResponse::json`]. Auth headers
//! and 401 handling come from [`ApiClient`], not from here.
//!
//! ```ignore
//! let resp = api.questionnaires().get_details(42).await?;
//! let q: Questionnaire = resp.json()?;
//! ```

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt::Display;

use super::client::{ApiClient, ApiError, ApiResponse, Method, RequestOptions, Transport};
use super::types::{
    AnswerRequest, AvailabilityRequest, Credentials, JoinRequest, NewQuestion, NewQuestionnaire, RegisterRequest,
};

fn questionnaire_path(id: impl Display) -> String {
    format!("/api/questionnaires/{id}")
}

fn questionnaire_subpath(id: impl Display, tail: &str) -> String {
    format!("/api/questionnaires/{id}/{tail}")
}

fn question_path(questionnaire_id: impl Display, question_id: impl Display) -> String {
    format!("/api/questionnaires/{questionnaire_id}/questions/{question_id}")
}

fn join_path(token: &str) -> String {
    format!("/join/{token}")
}

impl<T: Transport> ApiClient<T> {
    pub fn auth(&self) -> AuthApi<'_, T> {
        AuthApi { client: self, options: RequestOptions::default() }
    }

    pub fn questionnaires(&self) -> QuestionnaireApi<'_, T> {
        QuestionnaireApi { client: self, options: RequestOptions::default() }
    }

    pub fn participation(&self) -> ParticipationApi<'_, T> {
        ParticipationApi { client: self, options: RequestOptions::default() }
    }

    pub fn health(&self) -> HealthApi<'_, T> {
        HealthApi { client: self, options: RequestOptions::default() }
    }
}

// =============================================================================
// AUTH
// =============================================================================

/// Account endpoints: `/register`, `/login`, `/check/username`.
pub struct AuthApi<'a, T> {
    client: &'a ApiClient<T>,
    options: RequestOptions,
}

impl<T: Transport> AuthApi<'_, T> {
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// `POST /register`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiResponse, ApiError> {
        self.client.send(Method::Post, "/register", Some(request), &self.options).await
    }

    /// `POST /login`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn login(&self, credentials: &Credentials) -> Result<ApiResponse, ApiError> {
        self.client.send(Method::Post, "/login", Some(credentials), &self.options).await
    }

    /// `POST /check/username` with `{ "value": username }`.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn check_username(&self, username: &str) -> Result<ApiResponse, ApiError> {
        let body = AvailabilityRequest { value: username.to_owned() };
        self.client.send(Method::Post, "/check/username", Some(&body), &self.options).await
    }
}

// =============================================================================
// QUESTIONNAIRES
// =============================================================================

/// Owner-side questionnaire and question management under `/api/questionnaires`.
///
/// All methods propagate any [`ApiError`] from the client.
pub struct QuestionnaireApi<'a, T> {
    client: &'a ApiClient<T>,
    options: RequestOptions,
}

#[allow(clippy::missing_errors_doc)]
impl<T: Transport> QuestionnaireApi<'_, T> {
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn get_my_questionnaires(&self) -> Result<ApiResponse, ApiError> {
        self.client.send_empty(Method::Get, "/api/questionnaires", &self.options).await
    }

    pub async fn create(&self, data: &NewQuestionnaire) -> Result<ApiResponse, ApiError> {
        self.client.send(Method::Post, "/api/questionnaires", Some(data), &self.options).await
    }

    pub async fn update(&self, id: impl Display, data: &NewQuestionnaire) -> Result<ApiResponse, ApiError> {
        self.client.send(Method::Put, &questionnaire_path(id), Some(data), &self.options).await
    }

    pub async fn delete(&self, id: impl Display) -> Result<ApiResponse, ApiError> {
        self.client.send_empty(Method::Delete, &questionnaire_path(id), &self.options).await
    }

    pub async fn publish(&self, id: impl Display) -> Result<ApiResponse, ApiError> {
        self.client.send_empty(Method::Post, &questionnaire_subpath(id, "publish"), &self.options).await
    }

    pub async fn get_details(&self, id: impl Display) -> Result<ApiResponse, ApiError> {
        self.client.send_empty(Method::Get, &questionnaire_path(id), &self.options).await
    }

    pub async fn get_questions(&self, id: impl Display) -> Result<ApiResponse, ApiError> {
        self.client.send_empty(Method::Get, &questionnaire_subpath(id, "questions"), &self.options).await
    }

    pub async fn get_my_answers(&self, id: impl Display) -> Result<ApiResponse, ApiError> {
        self.client.send_empty(Method::Get, &questionnaire_subpath(id, "my-answers"), &self.options).await
    }

    /// Owners only.
    pub async fn get_members(&self, id: impl Display) -> Result<ApiResponse, ApiError> {
        self.client.send_empty(Method::Get, &questionnaire_subpath(id, "members"), &self.options).await
    }

    pub async fn generate_invite(&self, id: impl Display) -> Result<ApiResponse, ApiError> {
        self.client.send_empty(Method::Post, &questionnaire_subpath(id, "invite"), &self.options).await
    }

    /// Note the singular `question` segment on create.
    pub async fn create_question(&self, id: impl Display, question: &NewQuestion) -> Result<ApiResponse, ApiError> {
        self.client.send(Method::Post, &questionnaire_subpath(id, "question"), Some(question), &self.options).await
    }

    pub async fn update_question(
        &self,
        questionnaire_id: impl Display,
        question_id: impl Display,
        question: &NewQuestion,
    ) -> Result<ApiResponse, ApiError> {
        let path = question_path(questionnaire_id, question_id);
        self.client.send(Method::Put, &path, Some(question), &self.options).await
    }

    pub async fn delete_question(
        &self,
        questionnaire_id: impl Display,
        question_id: impl Display,
    ) -> Result<ApiResponse, ApiError> {
        let path = question_path(questionnaire_id, question_id);
        self.client.send_empty(Method::Delete, &path, &self.options).await
    }
}

// =============================================================================
// PARTICIPATION
// =============================================================================

/// Member-side endpoints reached through an invitation token.
///
/// All methods propagate any [`ApiError`] from the client.
pub struct ParticipationApi<'a, T> {
    client: &'a ApiClient<T>,
    options: RequestOptions,
}

#[allow(clippy::missing_errors_doc)]
impl<T: Transport> ParticipationApi<'_, T> {
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn join_questionnaire(&self, token: &str, member: &JoinRequest) -> Result<ApiResponse, ApiError> {
        self.client.send(Method::Post, &join_path(token), Some(member), &self.options).await
    }

    pub async fn get_invite_info(&self, token: &str) -> Result<ApiResponse, ApiError> {
        self.client.send_empty(Method::Get, &format!("{}/info", join_path(token)), &self.options).await
    }

    pub async fn check_member_identifier(&self, token: &str, identifier: &str) -> Result<ApiResponse, ApiError> {
        let body = AvailabilityRequest { value: identifier.to_owned() };
        self.client.send(Method::Post, &format!("/check/member/{token}"), Some(&body), &self.options).await
    }

    pub async fn answer_question(&self, question_id: impl Display, answer: &AnswerRequest) -> Result<ApiResponse, ApiError> {
        self.client.send(Method::Post, &format!("/api/question/{question_id}"), Some(answer), &self.options).await
    }
}

// =============================================================================
// HEALTH
// =============================================================================

pub struct HealthApi<'a, T> {
    client: &'a ApiClient<T>,
    options: RequestOptions,
}

impl<T: Transport> HealthApi<'_, T> {
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// `GET /health`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the client.
    pub async fn check(&self) -> Result<ApiResponse, ApiError> {
        self.client.send_empty(Method::Get, "/health", &self.options).await
    }
}
