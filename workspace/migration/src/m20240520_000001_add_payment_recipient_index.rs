use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The supporter list filters on (to_user, done) and the rename
        // cascade filters on to_user alone; one composite index serves both.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_to_user_done")
                    .table(Payments::Table)
                    .col(Payments::ToUser)
                    .col(Payments::Done)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_payments_to_user_done")
                    .table(Payments::Table)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    ToUser,
    Done,
}
