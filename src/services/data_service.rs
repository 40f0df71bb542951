//! Data access dispatch
//!
//! The central service of the data layer: routes every domain call to the
//! remote API while it is believed reachable, and transparently re-routes to
//! the local store on any transport failure. Once a call has fallen back the
//! service stays in fallback mode for its lifetime; the mode resets only on
//! restart.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateProblemRequest, CreateSubmissionRequest, Problem, Submission, User,
};
use crate::store::{DataStore, LocalStore, RemoteStore, StorageBackend};
use crate::utils::validation;

/// Which path is currently serving data operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Remote,
    Fallback,
}

impl std::fmt::Display for StoreMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Remote => write!(f, "remote"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Dual-path data access service
pub struct DataService {
    remote: RemoteStore,
    local: LocalStore,
    fallback: AtomicBool,
}

impl DataService {
    /// Build the service and probe the API once
    ///
    /// The probe is advisory: a successful probe does not prevent a later
    /// call from falling back, it only selects the initial mode.
    pub async fn connect(config: &Config, backend: Arc<dyn StorageBackend>) -> AppResult<Self> {
        let service = Self {
            remote: RemoteStore::new(&config.api)?,
            local: LocalStore::new(backend),
            fallback: AtomicBool::new(false),
        };

        match service.remote.health().await {
            Ok(()) => {
                tracing::info!(base_url = %config.api.base_url, "API reachable, using remote data")
            }
            Err(err) => service.enter_fallback(&err),
        }

        Ok(service)
    }

    /// Current routing mode
    pub fn mode(&self) -> StoreMode {
        if self.fallback.load(Ordering::SeqCst) {
            StoreMode::Fallback
        } else {
            StoreMode::Remote
        }
    }

    /// The local store, shared with the draft and identity services so all
    /// of them operate on the same persistent blobs
    pub fn local(&self) -> &LocalStore {
        &self.local
    }

    /// Flip into fallback mode, announcing it exactly once
    fn enter_fallback(&self, reason: &AppError) {
        if !self.fallback.swap(true, Ordering::SeqCst) {
            tracing::warn!(%reason, "API unavailable, switching to locally stored data");
        }
    }

    fn use_remote(&self) -> bool {
        !self.fallback.load(Ordering::SeqCst)
    }

    pub async fn list_problems(&self) -> AppResult<Vec<Problem>> {
        if self.use_remote() {
            match self.remote.list_problems().await {
                Ok(problems) => return Ok(problems),
                Err(err) if err.is_transport() => self.enter_fallback(&err),
                Err(err) => return Err(err),
            }
        }
        self.local.list_problems().await
    }

    pub async fn get_problem(&self, id: u64) -> AppResult<Option<Problem>> {
        if self.use_remote() {
            match self.remote.get_problem(id).await {
                Ok(problem) => return Ok(problem),
                Err(err) if err.is_transport() => self.enter_fallback(&err),
                Err(err) => return Err(err),
            }
        }
        self.local.get_problem(id).await
    }

    pub async fn get_problem_by_slug(&self, slug: &str) -> AppResult<Option<Problem>> {
        if self.use_remote() {
            match self.remote.get_problem_by_slug(slug).await {
                Ok(problem) => return Ok(problem),
                Err(err) if err.is_transport() => self.enter_fallback(&err),
                Err(err) => return Err(err),
            }
        }
        self.local.get_problem_by_slug(slug).await
    }

    pub async fn create_problem(&self, request: &CreateProblemRequest) -> AppResult<Problem> {
        // Validation fails before any storage path is touched
        request.validate()?;
        validation::validate_problem_title(&request.title)
            .map_err(|msg| AppError::Validation(msg.to_string()))?;

        if self.use_remote() {
            match self.remote.create_problem(request).await {
                Ok(problem) => return Ok(problem),
                Err(err) if err.is_transport() => self.enter_fallback(&err),
                Err(err) => return Err(err),
            }
        }
        self.local.create_problem(request).await
    }

    pub async fn update_problem(&self, problem: &Problem) -> AppResult<Problem> {
        validation::validate_problem_title(&problem.title)
            .map_err(|msg| AppError::Validation(msg.to_string()))?;

        if self.use_remote() {
            match self.remote.update_problem(problem).await {
                Ok(updated) => return Ok(updated),
                Err(err) if err.is_transport() => self.enter_fallback(&err),
                Err(err) => return Err(err),
            }
        }
        self.local.update_problem(problem).await
    }

    pub async fn delete_problem(&self, id: u64) -> AppResult<()> {
        if self.use_remote() {
            match self.remote.delete_problem(id).await {
                Ok(()) => return Ok(()),
                Err(err) if err.is_transport() => self.enter_fallback(&err),
                Err(err) => return Err(err),
            }
        }
        self.local.delete_problem(id).await
    }

    pub async fn list_submissions(&self) -> AppResult<Vec<Submission>> {
        if self.use_remote() {
            match self.remote.list_submissions().await {
                Ok(submissions) => return Ok(submissions),
                Err(err) if err.is_transport() => self.enter_fallback(&err),
                Err(err) => return Err(err),
            }
        }
        self.local.list_submissions().await
    }

    pub async fn create_submission(
        &self,
        request: &CreateSubmissionRequest,
    ) -> AppResult<Submission> {
        request.validate()?;
        validation::validate_language(&request.language)
            .map_err(|msg| AppError::Validation(msg.to_string()))?;
        validation::validate_source_code(&request.code)
            .map_err(|msg| AppError::Validation(msg.to_string()))?;

        if self.use_remote() {
            match self.remote.create_submission(request).await {
                Ok(submission) => return Ok(submission),
                Err(err) if err.is_transport() => self.enter_fallback(&err),
                Err(err) => return Err(err),
            }
        }
        self.local.create_submission(request).await
    }

    pub async fn list_users(&self) -> AppResult<Vec<User>> {
        if self.use_remote() {
            match self.remote.list_users().await {
                Ok(users) => return Ok(users),
                Err(err) if err.is_transport() => self.enter_fallback(&err),
                Err(err) => return Err(err),
            }
        }
        self.local.list_users().await
    }

    pub async fn get_user(&self, id: &str) -> AppResult<Option<User>> {
        if self.use_remote() {
            match self.remote.get_user(id).await {
                Ok(user) => return Ok(user),
                Err(err) if err.is_transport() => self.enter_fallback(&err),
                Err(err) => return Err(err),
            }
        }
        self.local.get_user(id).await
    }
}
