//! Local fallback store
//!
//! Emulates the collection CRUD contract directly on the storage backend.
//! Each collection is one JSON array blob; every mutation is a read-modify-
//! write of the whole blob through the access-serializing façade.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::constants::storage_keys;
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateProblemRequest, CreateSubmissionRequest, Problem, Submission, User,
};
use crate::store::seed;
use crate::store::{DataStore, StorageBackend};
use crate::utils::crypto;

/// Fallback store over the local persistent key-value blobs
#[derive(Clone)]
pub struct LocalStore {
    backend: Arc<dyn StorageBackend>,
}

impl LocalStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// The underlying blob store, shared with the draft and session slots
    pub fn backend(&self) -> Arc<dyn StorageBackend> {
        Arc::clone(&self.backend)
    }

    /// Read a collection blob; an absent key is an empty collection
    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> AppResult<Vec<T>> {
        match self.backend.get(key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|err| AppError::CorruptData {
                key: key.to_string(),
                reason: err.to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    fn write_collection<T: Serialize>(&self, key: &str, records: &[T]) -> AppResult<()> {
        let raw = serde_json::to_string(records)?;
        self.backend.put(key, &raw)
    }

    /// The `problems` collection with first-read seeding: an empty or absent
    /// collection is populated with the sample set before being returned
    fn problems_seeded(&self) -> AppResult<Vec<Problem>> {
        let stored: Vec<Problem> = self.read_collection(storage_keys::PROBLEMS)?;
        if !stored.is_empty() {
            return Ok(stored);
        }

        let seeded = seed::sample_problems();
        self.write_collection(storage_keys::PROBLEMS, &seeded)?;
        tracing::info!(count = seeded.len(), "seeded sample problems into local store");

        Ok(seeded)
    }

    /// Next problem id: `max(existing) + 1`, or `1` for an empty collection.
    ///
    /// Client-assigned with no arbitration, so concurrent writers can race;
    /// last-write-wins on the blob is accepted behavior.
    fn next_problem_id(problems: &[Problem]) -> u64 {
        problems.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
    }

    // --- user helpers for the local credential backend ---

    pub fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users: Vec<User> = self.read_collection(storage_keys::USERS)?;
        Ok(users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email)))
    }

    pub fn insert_user(&self, user: User) -> AppResult<User> {
        let mut users: Vec<User> = self.read_collection(storage_keys::USERS)?;
        users.push(user.clone());
        self.write_collection(storage_keys::USERS, &users)?;
        Ok(user)
    }

    /// Full replace of the user record matching the id
    pub fn replace_user(&self, user: &User) -> AppResult<User> {
        let mut users: Vec<User> = self.read_collection(storage_keys::USERS)?;

        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::NotFound(format!("user {}", user.id)))?;
        *slot = user.clone();

        self.write_collection(storage_keys::USERS, &users)?;
        Ok(user.clone())
    }
}

#[async_trait]
impl DataStore for LocalStore {
    async fn list_problems(&self) -> AppResult<Vec<Problem>> {
        self.problems_seeded()
    }

    async fn get_problem(&self, id: u64) -> AppResult<Option<Problem>> {
        let problems = self.problems_seeded()?;
        Ok(problems.into_iter().find(|p| p.id == id))
    }

    async fn get_problem_by_slug(&self, slug: &str) -> AppResult<Option<Problem>> {
        let problems = self.problems_seeded()?;
        Ok(problems.into_iter().find(|p| p.slug == slug))
    }

    async fn create_problem(&self, request: &CreateProblemRequest) -> AppResult<Problem> {
        // Raw read on purpose: creating into an empty store must not seed,
        // so the first authored problem gets id 1
        let mut problems: Vec<Problem> = self.read_collection(storage_keys::PROBLEMS)?;

        let id = request.id.unwrap_or_else(|| Self::next_problem_id(&problems));
        let problem = request.clone().into_problem(id);

        problems.push(problem.clone());
        self.write_collection(storage_keys::PROBLEMS, &problems)?;

        Ok(problem)
    }

    async fn update_problem(&self, problem: &Problem) -> AppResult<Problem> {
        let mut problems: Vec<Problem> = self.read_collection(storage_keys::PROBLEMS)?;

        let slot = problems
            .iter_mut()
            .find(|p| p.id == problem.id)
            .ok_or_else(|| AppError::NotFound(format!("problem {}", problem.id)))?;
        *slot = problem.clone();

        self.write_collection(storage_keys::PROBLEMS, &problems)?;
        Ok(problem.clone())
    }

    async fn delete_problem(&self, id: u64) -> AppResult<()> {
        let mut problems: Vec<Problem> = self.read_collection(storage_keys::PROBLEMS)?;

        let before = problems.len();
        problems.retain(|p| p.id != id);
        if problems.len() != before {
            self.write_collection(storage_keys::PROBLEMS, &problems)?;
        }

        Ok(())
    }

    async fn list_submissions(&self) -> AppResult<Vec<Submission>> {
        self.read_collection(storage_keys::SUBMISSIONS)
    }

    async fn create_submission(
        &self,
        request: &CreateSubmissionRequest,
    ) -> AppResult<Submission> {
        let mut submissions: Vec<Submission> =
            self.read_collection(storage_keys::SUBMISSIONS)?;

        let submission = Submission {
            id: crypto::new_record_token(),
            user_id: request.user_id.clone(),
            problem_id: request.problem_id,
            code: request.code.clone(),
            language: request.language.clone(),
            status: request.status,
            timestamp: Utc::now(),
        };

        submissions.push(submission.clone());
        self.write_collection(storage_keys::SUBMISSIONS, &submissions)?;

        Ok(submission)
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.read_collection(storage_keys::USERS)
    }

    async fn get_user(&self, id: &str) -> AppResult<Option<User>> {
        let users: Vec<User> = self.read_collection(storage_keys::USERS)?;
        Ok(users.into_iter().find(|u| u.id == id))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::{Difficulty, SubmissionStatus};
    use crate::store::MemoryBackend;

    fn store() -> LocalStore {
        LocalStore::new(Arc::new(MemoryBackend::new()))
    }

    fn new_problem(title: &str) -> CreateProblemRequest {
        CreateProblemRequest {
            id: None,
            title: title.to_string(),
            difficulty: Difficulty::Easy,
            category: "sequence-analysis".to_string(),
            description: "description".to_string(),
            examples: Vec::new(),
            constraints: Vec::new(),
            starter_code: BTreeMap::new(),
            hints: Vec::new(),
            test_cases: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_list_seeds_empty_store_exactly_once() {
        let store = store();

        let first = store.list_problems().await.unwrap();
        assert!(!first.is_empty());

        let second = store.list_problems().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_create_into_empty_store_assigns_id_one() {
        let store = store();

        let created = store.create_problem(&new_problem("First")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.slug, "first");
    }

    #[tokio::test]
    async fn test_create_assigns_max_plus_one() {
        let store = store();

        let mut a = new_problem("A");
        a.id = Some(1);
        let mut b = new_problem("B");
        b.id = Some(3);
        store.create_problem(&a).await.unwrap();
        store.create_problem(&b).await.unwrap();

        let created = store.create_problem(&new_problem("C")).await.unwrap();
        assert_eq!(created.id, 4);
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let store = store();

        let created = store.create_problem(&new_problem("Round Trip")).await.unwrap();
        let fetched = store.get_problem(created.id).await.unwrap();

        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_get_by_slug() {
        let store = store();

        store.create_problem(&new_problem("Find Motif")).await.unwrap();

        let found = store.get_problem_by_slug("find-motif").await.unwrap();
        assert_eq!(found.map(|p| p.title), Some("Find Motif".to_string()));

        let missing = store.get_problem_by_slug("no-such-slug").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let store = store();

        let mut problem = store.create_problem(&new_problem("Before")).await.unwrap();
        problem.title = "After".to_string();
        problem.hints = vec!["changed".to_string()];

        let updated = store.update_problem(&problem).await.unwrap();
        assert_eq!(updated.title, "After");

        let fetched = store.get_problem(problem.id).await.unwrap().unwrap();
        assert_eq!(fetched, problem);
    }

    #[tokio::test]
    async fn test_update_missing_record_is_rejected() {
        let store = store();
        store.create_problem(&new_problem("Only")).await.unwrap();

        let ghost = new_problem("Ghost").into_problem(99);

        let result = store.update_problem(&ghost).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_string_id_in_stored_blob_matches_numeric_lookup() {
        let backend = Arc::new(MemoryBackend::new());
        let store = LocalStore::new(Arc::clone(&backend) as Arc<dyn StorageBackend>);

        // A legacy writer stringified the id; lookups and updates must still
        // address the record as numeric 5
        backend
            .put(
                storage_keys::PROBLEMS,
                r#"[{"id":"5","slug":"legacy","title":"Legacy","difficulty":"easy","category":"c","description":"d"}]"#,
            )
            .unwrap();

        let fetched = store.get_problem(5).await.unwrap().unwrap();
        assert_eq!(fetched.id, 5);

        let mut updated = fetched.clone();
        updated.title = "Updated".to_string();
        store.update_problem(&updated).await.unwrap();

        let fetched = store.get_problem(5).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Updated");
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = store();

        let mut a = new_problem("A");
        a.id = Some(1);
        store.create_problem(&a).await.unwrap();

        store.delete_problem(42).await.unwrap();
        assert_eq!(store.list_problems().await.unwrap().len(), 1);

        store.delete_problem(1).await.unwrap();
        store.delete_problem(1).await.unwrap();

        // Deleting the last problem leaves an empty collection, which the
        // next list re-seeds by contract
        let problems: Vec<Problem> = store.read_collection(storage_keys::PROBLEMS).unwrap();
        assert!(problems.is_empty());
    }

    #[tokio::test]
    async fn test_absent_submissions_key_lists_empty() {
        let store = store();

        let submissions = store.list_submissions().await.unwrap();
        assert!(submissions.is_empty());
    }

    #[tokio::test]
    async fn test_create_submission_assigns_token_and_timestamp() {
        let store = store();

        let request = CreateSubmissionRequest {
            user_id: "u-1".to_string(),
            problem_id: 1,
            code: "print(42)".to_string(),
            language: "python".to_string(),
            status: SubmissionStatus::Accepted,
        };

        let first = store.create_submission(&request).await.unwrap();
        let second = store.create_submission(&request).await.unwrap();

        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert_eq!(store.list_submissions().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_write_failure_propagates_to_the_caller() {
        let mut backend = crate::store::backend::MockStorageBackend::new();
        backend.expect_get().returning(|_| Ok(None));
        backend
            .expect_put()
            .returning(|_, _| Err(AppError::Storage("disk full".to_string())));

        let store = LocalStore::new(Arc::new(backend));

        let result = store.create_problem(&new_problem("Doomed")).await;
        assert!(matches!(result, Err(AppError::Storage(_))));
    }

    #[tokio::test]
    async fn test_corrupt_blob_surfaces_as_error() {
        let backend = Arc::new(MemoryBackend::new());
        let store = LocalStore::new(Arc::clone(&backend) as Arc<dyn StorageBackend>);

        backend.put(storage_keys::PROBLEMS, "{not json").unwrap();

        let result = store.list_problems().await;
        assert!(matches!(result, Err(AppError::CorruptData { .. })));
    }

    #[tokio::test]
    async fn test_user_helpers() {
        let store = store();

        let user = User {
            id: "u-1".to_string(),
            name: "Rosalind".to_string(),
            email: "rosalind@example.com".to_string(),
            password_hash: "hash".to_string(),
            is_admin: false,
            last_activity: Utc::now(),
        };
        store.insert_user(user.clone()).unwrap();

        let by_email = store.find_user_by_email("ROSALIND@example.com").unwrap();
        assert_eq!(by_email.as_ref().map(|u| u.id.as_str()), Some("u-1"));

        let mut updated = user.clone();
        updated.is_admin = true;
        store.replace_user(&updated).unwrap();
        let fetched = store.get_user("u-1").await.unwrap().unwrap();
        assert!(fetched.is_admin);
    }
}
