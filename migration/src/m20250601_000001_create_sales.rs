//! Migration to create the sales table

use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // items is stored as serialized JSON text, not a native json column
        manager
            .create_table(
                Table::create()
                    .table(Sales::Table)
                    .if_not_exists()
                    .col(pk_auto(Sales::Id))
                    .col(text_uniq(Sales::TransactionId))
                    .col(text(Sales::Timestamp))
                    .col(text(Sales::Items))
                    .col(double(Sales::TotalAmount))
                    .col(double(Sales::PaymentReceived))
                    .col(double(Sales::ChangeAmount))
                    .col(double(Sales::DebtAmount))
                    .col(text(Sales::Status))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sales::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Sales {
    Table,
    Id,
    TransactionId,
    Timestamp,
    Items,
    TotalAmount,
    PaymentReceived,
    ChangeAmount,
    DebtAmount,
    Status,
}
