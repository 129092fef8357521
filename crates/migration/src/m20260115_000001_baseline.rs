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
                        ColumnDef::new(Accounts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::SteamId).text().not_null())
                    .col(ColumnDef::new(Accounts::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Accounts::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::AppId).big_integer().not_null())
                    .col(ColumnDef::new(Games::Title).text().not_null())
                    .col(ColumnDef::new(Games::Platform).text().not_null())
                    .col(ColumnDef::new(Games::InstallPath).text())
                    .col(
                        ColumnDef::new(Games::Installed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::Shared)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Games::Vr)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Games::Engine).text())
                    .col(ColumnDef::new(Games::LastPlayed).big_integer())
                    .col(ColumnDef::new(Games::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Games::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_games_app_id_platform")
                    .table(Games::Table)
                    .col(Games::AppId)
                    .col(Games::Platform)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Translations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Translations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Translations::GameId).integer().not_null())
                    .col(ColumnDef::new(Translations::FilePath).text().not_null())
                    .col(ColumnDef::new(Translations::SourceText).text().not_null())
                    .col(ColumnDef::new(Translations::TranslatedText).text())
                    .col(ColumnDef::new(Translations::SourceLang).text().not_null())
                    .col(ColumnDef::new(Translations::TargetLang).text().not_null())
                    .col(
                        ColumnDef::new(Translations::Status)
                            .text()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Translations::Confidence).double())
                    .col(
                        ColumnDef::new(Translations::ManualEdit)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Translations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Translations::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_translations_game")
                            .from(Translations::Table, Translations::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_translations_game_id")
                    .table(Translations::Table)
                    .col(Translations::GameId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AiSuggestions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AiSuggestions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AiSuggestions::TranslationId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiSuggestions::SuggestedText)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AiSuggestions::Confidence)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AiSuggestions::Provider).text().not_null())
                    .col(
                        ColumnDef::new(AiSuggestions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ai_suggestions_translation")
                            .from(AiSuggestions::Table, AiSuggestions::TranslationId)
                            .to(Translations::Table, Translations::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_ai_suggestions_translation_id")
                    .table(AiSuggestions::Table)
                    .col(AiSuggestions::TranslationId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AiSuggestions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Translations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    SteamId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
    AppId,
    Title,
    Platform,
    InstallPath,
    Installed,
    Shared,
    Vr,
    Engine,
    LastPlayed,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Translations {
    Table,
    Id,
    GameId,
    FilePath,
    SourceText,
    TranslatedText,
    SourceLang,
    TargetLang,
    Status,
    Confidence,
    ManualEdit,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AiSuggestions {
    Table,
    Id,
    TranslationId,
    SuggestedText,
    Confidence,
    CreatedAt,
    Provider,
}
