use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table. Username and email carry unique constraints:
        // the rename path treats the constraint as the authoritative guard,
        // the application-level availability check is only an early exit.
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .col(string(Users::Email).unique_key())
                    .col(string_null(Users::Name))
                    .col(string_null(Users::RazorpayId))
                    .col(string_null(Users::RazorpaySecret))
                    .col(string_null(Users::ProfilePic))
                    .col(string_null(Users::CoverPic))
                    .col(timestamp_with_time_zone_null(Users::CreatedAt))
                    .col(timestamp_with_time_zone_null(Users::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        // Create payments table. `oid` is the gateway order id and must be
        // unique so callback delivery can never complete two rows. `to_user`
        // is a denormalized username, deliberately not a foreign key.
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(pk_auto(Payments::Id))
                    .col(string(Payments::Oid).unique_key())
                    .col(decimal(Payments::Amount).decimal_len(16, 4))
                    .col(string(Payments::ToUser))
                    .col(string(Payments::Name))
                    .col(string(Payments::Message))
                    .col(boolean(Payments::Done).default(false))
                    .col(timestamp_with_time_zone_null(Payments::CreatedAt))
                    .col(timestamp_with_time_zone_null(Payments::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Define identifiers for all tables

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    Name,
    RazorpayId,
    RazorpaySecret,
    ProfilePic,
    CoverPic,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    Oid,
    Amount,
    ToUser,
    Name,
    Message,
    Done,
    CreatedAt,
    UpdatedAt,
}
