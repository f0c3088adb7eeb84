use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{DemoLoginInput, ProfilePatch, UserProfile};
use super::errors::UserError;
use super::repository::UserRepository;
use crate::identity::Caller;

/// Profile business service independent of web framework
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self { Self { repo } }

    /// The caller's profile, or `None` for anonymous callers and identities
    /// that never stored one.
    pub async fn current_user(&self, caller: Caller) -> Result<Option<UserProfile>, UserError> {
        match caller.id() {
            Some(id) => self.repo.find(id).await,
            None => Ok(None),
        }
    }

    /// Apply a partial profile update.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::users::{UserService, domain::ProfilePatch, repository::memory::InMemoryUserRepository};
    /// use service::Caller;
    /// let svc = UserService::new(Arc::new(InMemoryUserRepository::new()));
    /// let me = Caller::user(uuid::Uuid::new_v4());
    /// tokio_test::block_on(svc.set_profile(me, ProfilePatch { name: Some("Ada".into()), email: None })).unwrap();
    /// let p = tokio_test::block_on(svc.set_profile(me, ProfilePatch { email: Some("ada@uni.edu".into()), name: None })).unwrap();
    /// assert_eq!(p.name.as_deref(), Some("Ada"));
    /// assert_eq!(p.email.as_deref(), Some("ada@uni.edu"));
    /// ```
    #[instrument(skip(self, patch))]
    pub async fn set_profile(&self, caller: Caller, patch: ProfilePatch) -> Result<UserProfile, UserError> {
        let id = caller.id().ok_or(UserError::Unauthenticated("set profile"))?;
        let profile = self.repo.update_profile(id, patch).await?;
        info!(user_id = %id, "profile_updated");
        Ok(profile)
    }

    /// Record a demo sign-in and copy the email onto the profile as one
    /// atomic write. The password never leaves this function.
    #[instrument(skip(self, input))]
    pub async fn record_demo_login(&self, caller: Caller, input: DemoLoginInput) -> Result<(), UserError> {
        let id = caller.id().ok_or(UserError::Unauthenticated("perform demo login"))?;
        let email = input.email.trim();
        if email.is_empty() || input.password.is_empty() {
            return Err(UserError::Validation("email and password are required".into()));
        }
        self.repo.record_login(id, email).await?;
        info!(user_id = %id, "demo_login_recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::repository::memory::InMemoryUserRepository;
    use uuid::Uuid;

    fn setup() -> (Arc<InMemoryUserRepository>, UserService) {
        let repo = Arc::new(InMemoryUserRepository::new());
        (repo.clone(), UserService::new(repo))
    }

    #[tokio::test]
    async fn anonymous_has_no_profile() {
        let (_, svc) = setup();
        assert_eq!(svc.current_user(Caller::anonymous()).await.unwrap(), None);
        assert_eq!(svc.current_user(Caller::user(Uuid::new_v4())).await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_profile_requires_caller() {
        let (_, svc) = setup();
        let err = svc.set_profile(Caller::anonymous(), ProfilePatch::default()).await.unwrap_err();
        assert_eq!(err, UserError::Unauthenticated("set profile"));
    }

    #[tokio::test]
    async fn absent_fields_are_left_alone() {
        let (_, svc) = setup();
        let me = Caller::user(Uuid::new_v4());
        svc.set_profile(me, ProfilePatch { email: Some("a@b.edu".into()), name: Some("A".into()) }).await.unwrap();
        let p = svc.set_profile(me, ProfilePatch::default()).await.unwrap();
        assert_eq!(p.email.as_deref(), Some("a@b.edu"));
        assert_eq!(p.name.as_deref(), Some("A"));
        assert_eq!(svc.current_user(me).await.unwrap(), Some(p));
    }

    #[tokio::test]
    async fn demo_login_trims_and_records() {
        let (repo, svc) = setup();
        let id = Uuid::new_v4();
        svc.record_demo_login(Caller::user(id), DemoLoginInput { email: "  kim@campus.edu ".into(), password: "pw".into() })
            .await
            .unwrap();
        assert_eq!(repo.logins_for(id).await, vec!["kim@campus.edu".to_string()]);
        let p = svc.current_user(Caller::user(id)).await.unwrap().unwrap();
        assert_eq!(p.email.as_deref(), Some("kim@campus.edu"));
    }

    #[tokio::test]
    async fn demo_login_validation() {
        let (repo, svc) = setup();
        let id = Uuid::new_v4();
        let blank = svc
            .record_demo_login(Caller::user(id), DemoLoginInput { email: "   ".into(), password: "pw".into() })
            .await;
        assert!(matches!(blank, Err(UserError::Validation(_))));
        let no_pw = svc
            .record_demo_login(Caller::user(id), DemoLoginInput { email: "x@y.edu".into(), password: "".into() })
            .await;
        assert!(matches!(no_pw, Err(UserError::Validation(_))));
        let anon = svc
            .record_demo_login(Caller::anonymous(), DemoLoginInput { email: "x@y.edu".into(), password: "pw".into() })
            .await;
        assert!(matches!(anon, Err(UserError::Unauthenticated(_))));
        assert!(repo.logins_for(id).await.is_empty());
    }
}
