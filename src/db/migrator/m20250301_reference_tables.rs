use sea_orm_migration::prelude::*;

use crate::constants::{bootstrap, roles};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Hash the bootstrap admin password using Argon2id
fn hash_bootstrap_password() -> Result<String, DbErr> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(bootstrap::ADMIN_PASSWORD.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DbErr::Migration(format!("Failed to hash bootstrap password: {e}")))
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
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
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(
                        ColumnDef::new(Users::Role)
                            .string()
                            .not_null()
                            .default(roles::OPERATOR),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ShiftHours::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShiftHours::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShiftHours::Name).string().not_null())
                    .col(ColumnDef::new(ShiftHours::StartTime).string().not_null())
                    .col(ColumnDef::new(ShiftHours::EndTime).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventTitles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventTitles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(EventTitles::Title)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // Seed the bootstrap admin so a fresh install can log in
        let now = chrono::Utc::now().to_rfc3339();
        let insert = Query::insert()
            .into_table(Users::Table)
            .columns([
                Users::Username,
                Users::PasswordHash,
                Users::FullName,
                Users::Role,
                Users::CreatedAt,
                Users::UpdatedAt,
            ])
            .values_panic([
                bootstrap::ADMIN_USERNAME.into(),
                hash_bootstrap_password()?.into(),
                bootstrap::ADMIN_FULL_NAME.into(),
                roles::ADMIN.into(),
                now.clone().into(),
                now.into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventTitles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShiftHours::Table).to_owned())
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
    PasswordHash,
    FullName,
    Role,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ShiftHours {
    Table,
    Id,
    Name,
    StartTime,
    EndTime,
}

#[derive(DeriveIden)]
enum EventTitles {
    Table,
    Id,
    Title,
}
