//! Identity services
//!
//! A single capability-based principal interface replaces the original
//! platform's two unreconciled identity sources. The concrete backend is
//! chosen once at startup; data operations consume the resulting
//! [`Principal`] without knowing which backend produced it.

use async_trait::async_trait;
use chrono::Utc;
use validator::Validate;

use crate::constants::storage_keys;
use crate::error::{AppError, AppResult};
use crate::models::{LoginRequest, Principal, SessionProfile, SignupRequest, User};
use crate::store::{DataStore, LocalStore};
use crate::utils::{crypto, validation};

/// Identity backend interface
///
/// Satisfiable by the local credential table implemented here or by an
/// external identity broker; callers treat both alike.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The principal of the current session, if any
    async fn current(&self) -> AppResult<Option<Principal>>;

    async fn login(&self, request: &LoginRequest) -> AppResult<Principal>;

    async fn logout(&self) -> AppResult<()>;

    /// Advisory activity bump on the signed-in user
    async fn update_user_activity(&self) -> AppResult<()>;
}

/// Identity backend over the local credential table
#[derive(Clone)]
pub struct LocalCredentials {
    store: LocalStore,
}

impl LocalCredentials {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Register a new account and sign it in
    ///
    /// Email uniqueness is checked here, at signup time only.
    pub async fn signup(&self, request: &SignupRequest) -> AppResult<Principal> {
        request.validate()?;
        validation::validate_password(&request.password)
            .map_err(|msg| AppError::Validation(msg.to_string()))?;

        if self.store.find_user_by_email(&request.email)?.is_some() {
            return Err(AppError::AlreadyExists("Email already registered".to_string()));
        }

        let user = User {
            id: crypto::new_record_token(),
            name: request.name.clone(),
            email: request.email.clone(),
            password_hash: crypto::hash_password(&request.password)?,
            is_admin: false,
            last_activity: Utc::now(),
        };
        self.store.insert_user(user.clone())?;

        self.write_session(&user)?;
        Ok(user.principal())
    }

    fn write_session(&self, user: &User) -> AppResult<()> {
        let profile = SessionProfile::from(user);
        let raw = serde_json::to_string(&profile)?;
        self.store.backend().put(storage_keys::SESSION, &raw)
    }

    fn read_session(&self) -> AppResult<Option<SessionProfile>> {
        match self.store.backend().get(storage_keys::SESSION)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|err| AppError::CorruptData {
                    key: storage_keys::SESSION.to_string(),
                    reason: err.to_string(),
                }),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl IdentityProvider for LocalCredentials {
    async fn current(&self) -> AppResult<Option<Principal>> {
        Ok(self.read_session()?.map(|profile| profile.principal()))
    }

    async fn login(&self, request: &LoginRequest) -> AppResult<Principal> {
        request.validate()?;

        let mut user = self
            .store
            .find_user_by_email(&request.email)?
            .ok_or(AppError::InvalidCredentials)?;

        if !crypto::verify_password(&request.password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        user.last_activity = Utc::now();
        self.store.replace_user(&user)?;

        self.write_session(&user)?;
        Ok(user.principal())
    }

    async fn logout(&self) -> AppResult<()> {
        self.store.backend().remove(storage_keys::SESSION)
    }

    async fn update_user_activity(&self) -> AppResult<()> {
        let Some(profile) = self.read_session()? else {
            return Ok(());
        };

        let users = self.store.list_users().await?;
        if let Some(mut user) = users.into_iter().find(|u| u.id == profile.id) {
            user.last_activity = Utc::now();
            self.store.replace_user(&user)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryBackend;

    fn provider() -> LocalCredentials {
        LocalCredentials::new(LocalStore::new(Arc::new(MemoryBackend::new())))
    }

    fn signup_request() -> SignupRequest {
        SignupRequest {
            name: "Rosalind".to_string(),
            email: "rosalind@example.com".to_string(),
            password: "Helix1953".to_string(),
        }
    }

    #[tokio::test]
    async fn test_signup_signs_the_user_in() {
        let auth = provider();

        let principal = auth.signup(&signup_request()).await.unwrap();
        assert!(!principal.is_admin);

        let current = auth.current().await.unwrap().unwrap();
        assert_eq!(current, principal);
    }

    #[tokio::test]
    async fn test_signup_rejects_duplicate_email() {
        let auth = provider();
        auth.signup(&signup_request()).await.unwrap();

        let mut duplicate = signup_request();
        duplicate.email = "ROSALIND@example.com".to_string();
        duplicate.name = "Someone Else".to_string();

        let result = auth.signup(&duplicate).await;
        assert!(matches!(result, Err(AppError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_signup_rejects_weak_password() {
        let auth = provider();

        let mut request = signup_request();
        request.password = "short".to_string();

        let result = auth.signup(&request).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_verifies_credentials() {
        let auth = provider();
        auth.signup(&signup_request()).await.unwrap();
        auth.logout().await.unwrap();
        assert!(auth.current().await.unwrap().is_none());

        let wrong = auth
            .login(&LoginRequest {
                email: "rosalind@example.com".to_string(),
                password: "NotThePassword1".to_string(),
            })
            .await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));

        let principal = auth
            .login(&LoginRequest {
                email: "rosalind@example.com".to_string(),
                password: "Helix1953".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(auth.current().await.unwrap(), Some(principal));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_invalid_credentials() {
        let auth = provider();

        let result = auth
            .login(&LoginRequest {
                email: "nobody@example.com".to_string(),
                password: "Whatever123".to_string(),
            })
            .await;
        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_session_never_stores_the_password_hash() {
        let auth = provider();
        auth.signup(&signup_request()).await.unwrap();

        let raw = auth
            .store
            .backend()
            .get(storage_keys::SESSION)
            .unwrap()
            .unwrap();
        assert!(!raw.contains("passwordHash"));
        assert!(!raw.contains("argon2"));
    }

    #[tokio::test]
    async fn test_update_user_activity_bumps_the_record() {
        let auth = provider();
        let principal = auth.signup(&signup_request()).await.unwrap();

        let before = auth
            .store
            .get_user(&principal.id)
            .await
            .unwrap()
            .unwrap()
            .last_activity;

        auth.update_user_activity().await.unwrap();

        let after = auth
            .store
            .get_user(&principal.id)
            .await
            .unwrap()
            .unwrap()
            .last_activity;
        assert!(after >= before);
    }
}
