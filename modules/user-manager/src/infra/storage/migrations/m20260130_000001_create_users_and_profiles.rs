use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfiles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserProfiles::Unit).string_len(25).not_null())
                    .col(ColumnDef::new(UserProfiles::Team).string_len(25).not_null())
                    .col(
                        ColumnDef::new(UserProfiles::PhoneNumber)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Users::LastName).string_len(50).not_null())
                    .col(ColumnDef::new(Users::ProfileId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_users_profile_id")
                            .from(Users::Table, Users::ProfileId)
                            .to(UserProfiles::Table, UserProfiles::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    FirstName,
    LastName,
    ProfileId,
}

#[derive(DeriveIden)]
enum UserProfiles {
    Table,
    Id,
    Unit,
    Team,
    PhoneNumber,
    CreatedAt,
}
