use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{app_user, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "demo_login")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub last_login_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "app_user::Entity",
        from = "Column::UserId",
        to = "app_user::Column::Id",
        on_delete = "Cascade"
    )]
    AppUser,
}

impl Related<app_user::Entity> for Entity {
    fn to() -> RelationDef { Relation::AppUser.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn record<C: ConnectionTrait>(db: &C, user_id: Uuid, email: &str) -> Result<Model, errors::ModelError> {
    if email.trim().is_empty() { return Err(errors::ModelError::Validation("email required".into())); }
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        email: Set(email.to_string()),
        last_login_at: Set(Utc::now().into()),
    };
    Ok(am.insert(db).await?)
}
