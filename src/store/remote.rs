//! Remote API client
//!
//! Thin, stateless HTTP client for the BioCode REST API. Every response is
//! decoded into the same record shapes the local store persists, which is
//! what keeps the two paths interchangeable.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::constants::{HEALTH_PROBE_TIMEOUT_MS, REQUEST_TIMEOUT_MS};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateProblemRequest, CreateSubmissionRequest, Problem, Submission, User,
};
use crate::store::DataStore;

/// HTTP client for the remote API
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
}

impl RemoteStore {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(REQUEST_TIMEOUT_MS))
            .build()
            .map_err(|err| AppError::Configuration(format!("HTTP client: {}", err)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Lightweight liveness probe with its own short timeout
    pub async fn health(&self) -> AppResult<()> {
        let response = self
            .client
            .get(self.url("/health"))
            .timeout(Duration::from_millis(HEALTH_PROBE_TIMEOUT_MS))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Status(response.status().as_u16()))
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET returning the decoded body; 404 maps to `Ok(None)`
    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> AppResult<Option<T>> {
        let response = self.client.get(self.url(path)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(AppError::Status(response.status().as_u16()));
        }

        Ok(Some(response.json().await?))
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> AppResult<Vec<T>> {
        let response = self.client.get(self.url(path)).send().await?;

        if !response.status().is_success() {
            return Err(AppError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> AppResult<T> {
        let response = self.client.post(self.url(path)).json(body).send().await?;

        if !response.status().is_success() {
            return Err(AppError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl DataStore for RemoteStore {
    async fn list_problems(&self) -> AppResult<Vec<Problem>> {
        self.get_list("/problems").await
    }

    async fn get_problem(&self, id: u64) -> AppResult<Option<Problem>> {
        self.get_optional(&format!("/problems/{}", id)).await
    }

    async fn get_problem_by_slug(&self, slug: &str) -> AppResult<Option<Problem>> {
        self.get_optional(&format!("/problems/slug/{}", slug)).await
    }

    async fn create_problem(&self, request: &CreateProblemRequest) -> AppResult<Problem> {
        // The server arbitrates ids; a caller-supplied one is not forwarded
        let request = CreateProblemRequest {
            id: None,
            ..request.clone()
        };
        self.post_json("/problems", &request).await
    }

    async fn update_problem(&self, problem: &Problem) -> AppResult<Problem> {
        let response = self
            .client
            .put(self.url(&format!("/problems/{}", problem.id)))
            .json(problem)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("problem {}", problem.id)));
        }
        if !response.status().is_success() {
            return Err(AppError::Status(response.status().as_u16()));
        }

        Ok(response.json().await?)
    }

    async fn delete_problem(&self, id: u64) -> AppResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("/problems/{}", id)))
            .send()
            .await?;

        // Deleting an id the server never had is idempotent success
        if response.status() == StatusCode::NOT_FOUND || response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Status(response.status().as_u16()))
        }
    }

    async fn list_submissions(&self) -> AppResult<Vec<Submission>> {
        self.get_list("/submissions").await
    }

    async fn create_submission(
        &self,
        request: &CreateSubmissionRequest,
    ) -> AppResult<Submission> {
        self.post_json("/submissions", request).await
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.get_list("/users").await
    }

    async fn get_user(&self, id: &str) -> AppResult<Option<User>> {
        self.get_optional(&format!("/users/{}", id)).await
    }
}
