use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Usernames are deliberately not unique
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Exercises::Table)
                    .if_not_exists()
                    .col(pk_auto(Exercises::Id))
                    .col(integer(Exercises::UserId))
                    .col(string(Exercises::Description))
                    .col(integer(Exercises::Duration))
                    .col(date(Exercises::Date))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exercises_user")
                            .from(Exercises::Table, Exercises::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Log queries always filter on user and range over date
        manager
            .create_index(
                Index::create()
                    .name("idx_exercises_user_id_date")
                    .table(Exercises::Table)
                    .col(Exercises::UserId)
                    .col(Exercises::Date)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Exercises::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
}

#[derive(DeriveIden)]
enum Exercises {
    Table,
    Id,
    UserId,
    Description,
    Duration,
    Date,
}
