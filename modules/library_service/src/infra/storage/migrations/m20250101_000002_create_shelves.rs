use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Shelves::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Shelves::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Shelves::Name)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Shelves::Description).string_len(500))
                    .col(
                        ColumnDef::new(Shelves::CreatedAt)
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
                    .table(BookShelf::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(BookShelf::BookId).big_integer().not_null())
                    .col(ColumnDef::new(BookShelf::ShelfId).big_integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(BookShelf::BookId)
                            .col(BookShelf::ShelfId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_shelf_book")
                            .from(BookShelf::Table, BookShelf::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_book_shelf_shelf")
                            .from(BookShelf::Table, BookShelf::ShelfId)
                            .to(Shelves::Table, Shelves::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_book_shelf_shelf_id")
                    .table(BookShelf::Table)
                    .col(BookShelf::ShelfId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookShelf::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Shelves::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Shelves {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BookShelf {
    Table,
    BookId,
    ShelfId,
}

#[derive(DeriveIden)]
enum Books {
    Table,
    Id,
}
