use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BadgeDefinitions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BadgeDefinitions::BadgeId)
                            .string_len(64)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BadgeDefinitions::Category)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BadgeDefinitions::Sprites)
                            .json_binary()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BadgeDefinitions::Svg)
                            .string_len(256)
                            .not_null(),
                    )
                    .col(ColumnDef::new(BadgeDefinitions::Svgs).json_binary().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BadgeTranslations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BadgeTranslations::BadgeId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BadgeTranslations::Locale)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BadgeTranslations::Name)
                            .string_len(128)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BadgeTranslations::Description)
                            .string_len(1024)
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .name("pk_badge_translations")
                            .col(BadgeTranslations::BadgeId)
                            .col(BadgeTranslations::Locale),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_badge_translations_badge")
                            .from(BadgeTranslations::Table, BadgeTranslations::BadgeId)
                            .to(BadgeDefinitions::Table, BadgeDefinitions::BadgeId)
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
            .drop_table(Table::drop().table(BadgeTranslations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BadgeDefinitions::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum BadgeDefinitions {
    Table,
    BadgeId,
    Category,
    Sprites,
    Svg,
    Svgs,
}

#[derive(DeriveIden)]
enum BadgeTranslations {
    Table,
    BadgeId,
    Locale,
    Name,
    Description,
}
