//! HTTP client for the quiz backend.
//!
//! Thin JSON/REST wrapper: no retries, no caching. The session store never
//! sees this type directly; it consumes the `QuestionSource` and
//! `AttemptSink` ports implemented at the bottom of this module.

use std::env;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use quiz_core::model::{
    Attempt, AttemptId, AttemptRequest, AttemptResponse, Difficulty, LeaderboardEntry, Question,
    QuestionId, Quiz, QuizId,
};

use crate::error::ApiError;
use crate::session::{AttemptSink, QuestionSource};

/// Connection settings for the backend.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:5001/api";

    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read the base URL from `QUIZ_API_URL`, falling back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let base_url =
            env::var("QUIZ_API_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());
        Self { base_url }
    }
}

/// Fields accepted by the admin quiz create/update endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuizDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
}

/// Choice payload for the admin question endpoints.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceDraft {
    pub text: String,
    pub is_correct: bool,
}

/// Fields accepted by the admin question create/update endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuestionDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quiz_id: Option<QuizId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<ChoiceDraft>>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// JSON/REST client with optional bearer authentication.
///
/// The token is shared behind a lock so clones handed to different services
/// see a login performed through any of them.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Pre-seed the bearer token, e.g. restored from preferences.
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    #[must_use]
    pub fn has_token(&self) -> bool {
        self.token.read().map(|t| t.is_some()).unwrap_or(false)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let token = self.token.read().ok().and_then(|t| t.clone());
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn expect_success(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("api request failed: {} {status}", response.url());
            return Err(ApiError::HttpStatus(status));
        }
        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.expect_success(self.client.get(self.url(path))).await?;
        Ok(response.json().await?)
    }

    // ── Quizzes ────────────────────────────────────────────────────────────

    /// `GET /quizzes` — published quizzes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn fetch_quizzes(&self) -> Result<Vec<Quiz>, ApiError> {
        self.get_json("/quizzes").await
    }

    /// `GET /quizzes/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn fetch_quiz(&self, id: QuizId) -> Result<Quiz, ApiError> {
        self.get_json(&format!("/quizzes/{id}")).await
    }

    /// `POST /quizzes` (admin).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn create_quiz(&self, draft: &QuizDraft) -> Result<Quiz, ApiError> {
        let response = self
            .expect_success(self.client.post(self.url("/quizzes")).json(draft))
            .await?;
        Ok(response.json().await?)
    }

    /// `PUT /quizzes/{id}` (admin).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn update_quiz(&self, id: QuizId, draft: &QuizDraft) -> Result<Quiz, ApiError> {
        let response = self
            .expect_success(self.client.put(self.url(&format!("/quizzes/{id}"))).json(draft))
            .await?;
        Ok(response.json().await?)
    }

    /// `DELETE /quizzes/{id}` (admin).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn delete_quiz(&self, id: QuizId) -> Result<(), ApiError> {
        self.expect_success(self.client.delete(self.url(&format!("/quizzes/{id}"))))
            .await?;
        Ok(())
    }

    // ── Questions ──────────────────────────────────────────────────────────

    /// `GET /questions?quiz_id=` — questions of a quiz, ordered by position.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn fetch_questions(&self, quiz_id: QuizId) -> Result<Vec<Question>, ApiError> {
        let request = self
            .client
            .get(self.url("/questions"))
            .query(&[("quiz_id", quiz_id.value())]);
        let response = self.expect_success(request).await?;
        Ok(response.json().await?)
    }

    /// `GET /questions?position=` — single question lookup by ordinal.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn fetch_question_by_position(&self, position: u32) -> Result<Question, ApiError> {
        let request = self
            .client
            .get(self.url("/questions"))
            .query(&[("position", position)]);
        let response = self.expect_success(request).await?;
        Ok(response.json().await?)
    }

    /// `GET /questions/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn fetch_question(&self, id: QuestionId) -> Result<Question, ApiError> {
        self.get_json(&format!("/questions/{id}")).await
    }

    /// `POST /questions` (admin).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn create_question(&self, draft: &QuestionDraft) -> Result<Question, ApiError> {
        let response = self
            .expect_success(self.client.post(self.url("/questions")).json(draft))
            .await?;
        Ok(response.json().await?)
    }

    /// `PUT /questions/{id}` (admin).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn update_question(
        &self,
        id: QuestionId,
        draft: &QuestionDraft,
    ) -> Result<Question, ApiError> {
        let response = self
            .expect_success(
                self.client
                    .put(self.url(&format!("/questions/{id}")))
                    .json(draft),
            )
            .await?;
        Ok(response.json().await?)
    }

    /// `DELETE /questions/{id}` (admin).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn delete_question(&self, id: QuestionId) -> Result<(), ApiError> {
        self.expect_success(self.client.delete(self.url(&format!("/questions/{id}"))))
            .await?;
        Ok(())
    }

    // ── Attempts & leaderboard ─────────────────────────────────────────────

    /// `POST /attempts` — submit a finished attempt for server-side scoring.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn submit_attempt(
        &self,
        request: &AttemptRequest,
    ) -> Result<AttemptResponse, ApiError> {
        let response = self
            .expect_success(self.client.post(self.url("/attempts")).json(request))
            .await?;
        Ok(response.json().await?)
    }

    /// `GET /attempts/{id}`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn fetch_attempt(&self, id: AttemptId) -> Result<Attempt, ApiError> {
        self.get_json(&format!("/attempts/{id}")).await
    }

    /// `GET /leaderboard/{quiz_id}?limit=` — backend-sorted standings.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or non-success status.
    pub async fn fetch_leaderboard(
        &self,
        quiz_id: QuizId,
        limit: u32,
    ) -> Result<Vec<LeaderboardEntry>, ApiError> {
        let request = self
            .client
            .get(self.url(&format!("/leaderboard/{quiz_id}")))
            .query(&[("limit", limit)]);
        let response = self.expect_success(request).await?;
        Ok(response.json().await?)
    }

    // ── Auth ───────────────────────────────────────────────────────────────

    /// `POST /auth/login` — exchange the admin password for a bearer token
    /// and remember it for subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingToken` when the backend accepts the login
    /// but returns no token, otherwise transport/status errors.
    pub async fn login(&self, password: &str) -> Result<String, ApiError> {
        let response = self
            .expect_success(
                self.client
                    .post(self.url("/auth/login"))
                    .json(&LoginRequest { password }),
            )
            .await?;
        let body: LoginResponse = response.json().await?;
        let token = body.token.ok_or(ApiError::MissingToken)?;
        self.set_token(Some(token.clone()));
        Ok(token)
    }
}

#[async_trait]
impl QuestionSource for ApiClient {
    async fn fetch_ordered_questions(&self, quiz_id: QuizId) -> Result<Vec<Question>, ApiError> {
        self.fetch_questions(quiz_id).await
    }
}

#[async_trait]
impl AttemptSink for ApiClient {
    async fn submit(&self, request: &AttemptRequest) -> Result<AttemptResponse, ApiError> {
        self.submit_attempt(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_normalized() {
        let client = ApiClient::new(ApiConfig::new("http://localhost:5001/api/"));
        assert_eq!(client.url("/quizzes"), "http://localhost:5001/api/quizzes");
    }

    #[test]
    fn token_is_shared_across_clones() {
        let client = ApiClient::new(ApiConfig::from_env());
        let clone = client.clone();
        assert!(!clone.has_token());
        client.set_token(Some("abc".into()));
        assert!(clone.has_token());
    }

    #[test]
    fn quiz_draft_skips_unset_fields() {
        let draft = QuizDraft {
            title: Some("New".into()),
            ..QuizDraft::default()
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json, serde_json::json!({ "title": "New" }));
    }
}
