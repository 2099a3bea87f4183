use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReadingGoals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReadingGoals::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReadingGoals::TargetBooks).integer().not_null())
                    .col(ColumnDef::new(ReadingGoals::Year).integer().not_null())
                    .col(ColumnDef::new(ReadingGoals::StartDate).date().not_null())
                    .col(ColumnDef::new(ReadingGoals::EndDate).date().not_null())
                    .col(ColumnDef::new(ReadingGoals::Description).string_len(500))
                    .col(
                        ColumnDef::new(ReadingGoals::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ReadingGoals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ReadingGoals::UpdatedAt)
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
                    .name("idx_reading_goals_year")
                    .table(ReadingGoals::Table)
                    .col(ReadingGoals::Year)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReadingGoals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ReadingGoals {
    Table,
    Id,
    TargetBooks,
    Year,
    StartDate,
    EndDate,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
