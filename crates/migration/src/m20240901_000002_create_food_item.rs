//! Create `food_item` table.
//! `donor_id` and `claimed_by` are identity ids, not foreign keys: a donor
//! does not need a profile row to list food.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(FoodItem::Table)
                    .if_not_exists()
                    .col(uuid(FoodItem::Id).primary_key())
                    .col(string_len(FoodItem::Title, 256))
                    .col(text(FoodItem::Description))
                    .col(string_len(FoodItem::Category, 128))
                    .col(double(FoodItem::Quantity))
                    .col(string_len(FoodItem::Unit, 64))
                    .col(string_len(FoodItem::ExpiryDate, 32))
                    .col(string_len(FoodItem::Location, 512))
                    .col(text_null(FoodItem::ImageUrl))
                    .col(json_binary(FoodItem::Allergens))
                    .col(uuid(FoodItem::DonorId))
                    .col(string_len(FoodItem::Status, 16).default("available"))
                    .col(uuid_null(FoodItem::ClaimedBy))
                    .col(timestamp_with_time_zone_null(FoodItem::ClaimedAt))
                    .col(timestamp_with_time_zone(FoodItem::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(FoodItem::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum FoodItem {
    Table,
    Id,
    Title,
    Description,
    Category,
    Quantity,
    Unit,
    ExpiryDate,
    Location,
    ImageUrl,
    Allergens,
    DonorId,
    Status,
    ClaimedBy,
    ClaimedAt,
    CreatedAt,
}
