use async_trait::async_trait;

use super::domain::{ProfilePatch, UserProfile};
use super::errors::UserError;
use crate::identity::UserId;

/// Repository abstraction for profile persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find(&self, id: UserId) -> Result<Option<UserProfile>, UserError>;
    /// Creates the profile first when it does not exist yet.
    async fn update_profile(&self, id: UserId, patch: ProfilePatch) -> Result<UserProfile, UserError>;
    /// Set the profile email and append a sign-in audit record, atomically.
    async fn record_login(&self, id: UserId, email: &str) -> Result<(), UserError>;
}

/// Simple in-memory repository for tests and memory-backed runs
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryUserRepository {
        profiles: RwLock<HashMap<UserId, UserProfile>>,
        logins: RwLock<Vec<(UserId, String)>>,
    }

    impl InMemoryUserRepository {
        pub fn new() -> Self { Self::default() }

        /// Emails recorded for `id`, oldest first.
        pub async fn logins_for(&self, id: UserId) -> Vec<String> {
            self.logins
                .read()
                .await
                .iter()
                .filter(|(uid, _)| *uid == id)
                .map(|(_, email)| email.clone())
                .collect()
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn find(&self, id: UserId) -> Result<Option<UserProfile>, UserError> {
            Ok(self.profiles.read().await.get(&id).cloned())
        }

        async fn update_profile(&self, id: UserId, patch: ProfilePatch) -> Result<UserProfile, UserError> {
            let mut profiles = self.profiles.write().await;
            let profile = profiles
                .entry(id)
                .or_insert_with(|| UserProfile { id, email: None, name: None });
            patch.apply_to(profile);
            Ok(profile.clone())
        }

        async fn record_login(&self, id: UserId, email: &str) -> Result<(), UserError> {
            if email.trim().is_empty() {
                return Err(UserError::Validation("email required".into()));
            }
            let mut profiles = self.profiles.write().await;
            let mut logins = self.logins.write().await;
            let profile = profiles
                .entry(id)
                .or_insert_with(|| UserProfile { id, email: None, name: None });
            profile.email = Some(email.to_string());
            logins.push((id, email.to_string()));
            Ok(())
        }
    }
}
