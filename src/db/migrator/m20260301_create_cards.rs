use crate::entities::{cards, prelude::*};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Create cards table; the entity's unique `code` column becomes a
        // store-level uniqueness guarantee backing the check-then-insert flow.
        manager
            .create_table(
                schema
                    .create_table_from_entity(Cards)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // The dashboard lists newest-first.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_cards_created_at")
                    .table(Cards)
                    .col(cards::Column::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_cards_created_at").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Cards).to_owned())
            .await?;

        Ok(())
    }
}
