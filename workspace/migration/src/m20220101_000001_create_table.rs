use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create lockers table first; users reference it
        manager
            .create_table(
                Table::create()
                    .table(Lockers::Table)
                    .if_not_exists()
                    .col(integer(Lockers::Number).primary_key())
                    .col(string_null(Lockers::Location))
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(integer(Users::Rm).primary_key())
                    .col(string(Users::Name))
                    .col(string(Users::Email))
                    .col(string(Users::ClassGroup))
                    .col(integer_null(Users::LockerId).unique_key())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_locker")
                            .from(Users::Table, Users::LockerId)
                            .to(Lockers::Table, Lockers::Number)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Lockers::Table).to_owned())
            .await?;

        Ok(())
    }
}

// Define identifiers for all tables

#[derive(DeriveIden)]
enum Users {
    Table,
    Rm,
    Name,
    Email,
    ClassGroup,
    LockerId,
}

#[derive(DeriveIden)]
enum Lockers {
    Table,
    Number,
    Location,
}
