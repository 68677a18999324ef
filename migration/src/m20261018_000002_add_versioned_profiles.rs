use sea_orm_migration::prelude::*;

use crate::m20261018_000001_create_accounts::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(VersionedProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VersionedProfiles::AccountId)
                            .binary_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VersionedProfiles::Version)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(VersionedProfiles::Name).binary().null())
                    .col(ColumnDef::new(VersionedProfiles::About).binary().null())
                    .col(ColumnDef::new(VersionedProfiles::AboutEmoji).binary().null())
                    .col(
                        ColumnDef::new(VersionedProfiles::Avatar)
                            .string_len(256)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(VersionedProfiles::PhoneNumberSharing)
                            .binary()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(VersionedProfiles::PaymentAddress)
                            .binary()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(VersionedProfiles::Commitment)
                            .binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(VersionedProfiles::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_versioned_profiles")
                            .col(VersionedProfiles::AccountId)
                            .col(VersionedProfiles::Version),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_versioned_profiles_account")
                            .from(VersionedProfiles::Table, VersionedProfiles::AccountId)
                            .to(Accounts::Table, Accounts::AccountId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(VersionedProfiles::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum VersionedProfiles {
    Table,
    AccountId,
    Version,
    Name,
    About,
    AboutEmoji,
    Avatar,
    PhoneNumberSharing,
    PaymentAddress,
    Commitment,
    CreatedAt,
}
