use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::AccountId)
                            .binary_len(16)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::PhoneNumberIdentifier)
                            .binary_len(16)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Accounts::PrimaryIdentityKey).binary().null())
                    .col(
                        ColumnDef::new(Accounts::PseudonymousIdentityKey)
                            .binary()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::CurrentProfileVersion)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::UnidentifiedAccessKey)
                            .binary_len(16)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::UnrestrictedUnidentifiedAccess)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Accounts::Devices).json_binary().not_null())
                    .col(ColumnDef::new(Accounts::Badges).json_binary().not_null())
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Accounts {
    Table,
    AccountId,
    PhoneNumberIdentifier,
    PrimaryIdentityKey,
    PseudonymousIdentityKey,
    CurrentProfileVersion,
    UnidentifiedAccessKey,
    UnrestrictedUnidentifiedAccess,
    Devices,
    Badges,
    UpdatedAt,
}
