//! Persistence layer
//!
//! This module contains the storage backend façade, the local fallback store,
//! the remote API client, and the seed data. The two stores implement the
//! same [`DataStore`] contract so every domain call produces a structurally
//! identical result whichever path serves it.

pub mod backend;
pub mod local;
pub mod remote;
pub mod seed;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use local::LocalStore;
pub use remote::RemoteStore;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{
    CreateProblemRequest, CreateSubmissionRequest, Problem, Submission, User,
};

/// Uniform contract over the domain collections
///
/// Implemented by [`RemoteStore`] (HTTP) and [`LocalStore`] (key-value blob
/// emulation). Lookups return `Ok(None)` for "not found"; absence is never
/// an error.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn list_problems(&self) -> AppResult<Vec<Problem>>;

    async fn get_problem(&self, id: u64) -> AppResult<Option<Problem>>;

    async fn get_problem_by_slug(&self, slug: &str) -> AppResult<Option<Problem>>;

    async fn create_problem(&self, request: &CreateProblemRequest) -> AppResult<Problem>;

    /// Full replace of the record matching the id (not a merge); callers
    /// submit the complete record
    async fn update_problem(&self, problem: &Problem) -> AppResult<Problem>;

    /// Idempotent: deleting a non-existent id is not an error
    async fn delete_problem(&self, id: u64) -> AppResult<()>;

    async fn list_submissions(&self) -> AppResult<Vec<Submission>>;

    async fn create_submission(&self, request: &CreateSubmissionRequest)
        -> AppResult<Submission>;

    async fn list_users(&self) -> AppResult<Vec<User>>;

    async fn get_user(&self, id: &str) -> AppResult<Option<User>>;
}
