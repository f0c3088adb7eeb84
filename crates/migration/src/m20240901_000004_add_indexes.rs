use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // FoodItem: one index per secondary lookup
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_food_item_status")
                    .table(FoodItem::Table)
                    .col(FoodItem::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_food_item_donor")
                    .table(FoodItem::Table)
                    .col(FoodItem::DonorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_food_item_claimed_by")
                    .table(FoodItem::Table)
                    .col(FoodItem::ClaimedBy)
                    .to_owned(),
            )
            .await?;

        // DemoLogin: index on user_id
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_demo_login_user")
                    .table(DemoLogin::Table)
                    .col(DemoLogin::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_demo_login_user").table(DemoLogin::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_food_item_claimed_by").table(FoodItem::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_food_item_donor").table(FoodItem::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_food_item_status").table(FoodItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum FoodItem {
    Table,
    Status,
    DonorId,
    ClaimedBy,
}

#[derive(DeriveIden)]
enum DemoLogin {
    Table,
    UserId,
}
