use sea_orm::{DatabaseConnection, EntityTrait, TransactionError, TransactionTrait};

use models::errors::ModelError;

use crate::identity::UserId;
use crate::users::domain::{ProfilePatch, UserProfile};
use crate::users::errors::UserError;
use crate::users::repository::UserRepository;

pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

fn to_profile(u: models::app_user::Model) -> UserProfile {
    UserProfile { id: u.id, email: u.email, name: u.name }
}

#[async_trait::async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find(&self, id: UserId) -> Result<Option<UserProfile>, UserError> {
        let res = models::app_user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| UserError::Repository(e.to_string()))?;
        Ok(res.map(to_profile))
    }

    async fn update_profile(&self, id: UserId, patch: ProfilePatch) -> Result<UserProfile, UserError> {
        let updated = models::app_user::update_profile(&self.db, id, patch.email, patch.name)
            .await
            .map_err(|e| UserError::Repository(e.to_string()))?;
        Ok(to_profile(updated))
    }

    async fn record_login(&self, id: UserId, email: &str) -> Result<(), UserError> {
        let email = email.to_string();
        self.db
            .transaction::<_, (), ModelError>(move |txn| {
                Box::pin(async move {
                    models::app_user::update_profile(txn, id, Some(email.clone()), None).await?;
                    models::demo_login::record(txn, id, &email).await?;
                    Ok(())
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Transaction(ModelError::Validation(msg)) => UserError::Validation(msg),
                TransactionError::Transaction(e) => UserError::Repository(e.to_string()),
                TransactionError::Connection(e) => UserError::Repository(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;
    use uuid::Uuid;

    #[tokio::test]
    async fn seaorm_failed_login_rolls_back_profile_email() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmUserRepository { db: db.clone() };
        let id = Uuid::new_v4();
        repo.update_profile(id, ProfilePatch { email: Some("old@campus.edu".into()), name: None }).await?;

        // the profile update succeeds inside the transaction, the audit insert rejects the blank email
        let err = repo.record_login(id, "  ").await.unwrap_err();
        assert!(matches!(err, UserError::Validation(_)));
        assert_eq!(repo.find(id).await?.and_then(|p| p.email).as_deref(), Some("old@campus.edu"));

        repo.record_login(id, "new@campus.edu").await?;
        assert_eq!(repo.find(id).await?.and_then(|p| p.email).as_deref(), Some("new@campus.edu"));

        models::app_user::Entity::delete_by_id(id).exec(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn seaorm_concurrent_first_updates_do_not_fail() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let repo = SeaOrmUserRepository { db: db.clone() };
        let id = Uuid::new_v4();
        let (a, b) = tokio::join!(
            repo.update_profile(id, ProfilePatch { name: Some("Lee".into()), email: None }),
            repo.record_login(id, "lee@campus.edu"),
        );
        a?;
        b?;
        assert!(repo.find(id).await?.is_some());

        models::app_user::Entity::delete_by_id(id).exec(&db).await?;
        Ok(())
    }
}
