use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::demo_login::Entity")]
    DemoLogin,
}

impl Related<crate::demo_login::Entity> for Entity {
    fn to() -> RelationDef { Relation::DemoLogin.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Fetch the profile row for `id`, creating an empty one if missing.
/// Concurrent first calls for the same id both succeed.
pub async fn ensure<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Model, errors::ModelError> {
    if let Some(found) = Entity::find_by_id(id).one(db).await? {
        return Ok(found);
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(id),
        email: Set(None),
        name: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };
    Entity::insert(am)
        .on_conflict(OnConflict::column(Column::Id).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| errors::ModelError::Db(format!("app_user {id} missing after upsert")))
}

/// Apply the given fields; `None` leaves the stored value untouched.
pub async fn update_profile<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    email: Option<String>,
    name: Option<String>,
) -> Result<Model, errors::ModelError> {
    let existing = ensure(db, id).await?;
    if email.is_none() && name.is_none() {
        return Ok(existing);
    }
    let mut am: ActiveModel = existing.into();
    if let Some(email) = email {
        am.email = Set(Some(email));
    }
    if let Some(name) = name {
        am.name = Set(Some(name));
    }
    am.updated_at = Set(Utc::now().into());
    Ok(am.update(db).await?)
}
