//! Create `demo_login` table.
//! Audit trail of demo sign-ins; passwords are never stored.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DemoLogin::Table)
                    .if_not_exists()
                    .col(uuid(DemoLogin::Id).primary_key())
                    .col(uuid(DemoLogin::UserId))
                    .col(string_len(DemoLogin::Email, 320))
                    .col(timestamp_with_time_zone(DemoLogin::LastLoginAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_demo_login_app_user")
                            .from(DemoLogin::Table, DemoLogin::UserId)
                            .to(AppUser::Table, AppUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(DemoLogin::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum DemoLogin {
    Table,
    Id,
    UserId,
    Email,
    LastLoginAt,
}

#[derive(DeriveIden)]
enum AppUser { Table, Id }
