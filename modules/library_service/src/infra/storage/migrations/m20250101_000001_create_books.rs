use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Books::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Books::Isbn).string_len(32).unique_key())
                    .col(ColumnDef::new(Books::Title).string_len(255).not_null())
                    .col(ColumnDef::new(Books::Author).string_len(255))
                    .col(ColumnDef::new(Books::Description).text())
                    .col(ColumnDef::new(Books::PublishedDate).string_len(32))
                    .col(ColumnDef::new(Books::PageCount).integer())
                    .col(ColumnDef::new(Books::ThumbnailUrl).string_len(1024))
                    .col(
                        ColumnDef::new(Books::Status)
                            .string_len(32)
                            .not_null()
                            .default("TO_READ"),
                    )
                    .col(ColumnDef::new(Books::FinishedDate).date())
                    .col(ColumnDef::new(Books::Rating).integer())
                    .col(ColumnDef::new(Books::Notes).text())
                    .col(
                        ColumnDef::new(Books::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Books::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_books_title")
                    .table(Books::Table)
                    .col(Books::Title)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_books_status")
                    .table(Books::Table)
                    .col(Books::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Books::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Books {
    Table,
    Id,
    Isbn,
    Title,
    Author,
    Description,
    PublishedDate,
    PageCount,
    ThumbnailUrl,
    Status,
    FinishedDate,
    Rating,
    Notes,
    CreatedAt,
    UpdatedAt,
}
