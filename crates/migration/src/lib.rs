//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240901_000001_create_app_user;
mod m20240901_000002_create_food_item;
mod m20240901_000003_create_demo_login;
mod m20240901_000004_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240901_000001_create_app_user::Migration),
            Box::new(m20240901_000002_create_food_item::Migration),
            Box::new(m20240901_000003_create_demo_login::Migration),
            // Indexes should always be applied last
            Box::new(m20240901_000004_add_indexes::Migration),
        ]
    }
}
