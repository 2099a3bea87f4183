//! SeaORM repository implementations

use crate::contract::{
    Book, BookSearchCriteria, BookSort, NewBook, NewReadingGoal, NewShelf, Page, PageRequest,
    ReadingGoal, ReadingStatus, Shelf, SortDirection,
};
use crate::domain::repository::{
    BookRepository, ReadingGoalRepository, ShelfRepository, UniqueViolation,
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, JoinType,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, SqlErr,
    TransactionTrait,
};
use std::sync::Arc;

use super::entity::{book, book_shelf, reading_goal, shelf};
use super::mapper::{new_goal, to_books};

/// Surface unique-index collisions as [`UniqueViolation`]
fn unique_violation(err: DbErr) -> anyhow::Error {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => UniqueViolation(detail).into(),
        _ => err.into(),
    }
}

/// `lower(column) LIKE '%term%'`
fn contains_ci(column: book::Column, term: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col((book::Entity, column))))
        .like(format!("%{}%", term.to_lowercase()))
}

/// Translate search criteria into a WHERE condition; every filter is ANDed
fn criteria_condition(criteria: &BookSearchCriteria) -> Condition {
    let mut condition = Condition::all();

    if let Some(term) = criteria
        .search_term
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        condition = condition.add(
            Condition::any()
                .add(contains_ci(book::Column::Title, term))
                .add(contains_ci(book::Column::Author, term))
                .add(contains_ci(book::Column::Description, term)),
        );
    }
    if let Some(status) = criteria.status {
        condition = condition.add(book::Column::Status.eq(status.as_code()));
    }
    if let Some(author) = criteria
        .author
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
    {
        condition = condition.add(contains_ci(book::Column::Author, author));
    }
    if let Some(min) = criteria.min_rating {
        condition = condition.add(book::Column::Rating.gte(min));
    }
    if let Some(max) = criteria.max_rating {
        condition = condition.add(book::Column::Rating.lte(max));
    }
    // published_date is free text starting with the year
    if let Some(min) = criteria.min_year {
        condition = condition.add(book::Column::PublishedDate.gte(format!("{:04}", min)));
    }
    // No upper bound is needed once the year after max is unrepresentable
    if let Some(next) = criteria.max_year.and_then(|max| max.checked_add(1)) {
        condition = condition.add(book::Column::PublishedDate.lt(format!("{:04}", next)));
    }
    match criteria.has_isbn {
        Some(true) => condition = condition.add(book::Column::Isbn.is_not_null()),
        Some(false) => condition = condition.add(book::Column::Isbn.is_null()),
        None => {}
    }

    condition
}

fn sort_column(sort: BookSort) -> book::Column {
    match sort {
        BookSort::Title => book::Column::Title,
        BookSort::Author => book::Column::Author,
        BookSort::CreatedAt => book::Column::CreatedAt,
        BookSort::UpdatedAt => book::Column::UpdatedAt,
        BookSort::Rating => book::Column::Rating,
        BookSort::PublishedDate => book::Column::PublishedDate,
        BookSort::PageCount => book::Column::PageCount,
        BookSort::Status => book::Column::Status,
        BookSort::FinishedDate => book::Column::FinishedDate,
        BookSort::Id => book::Column::Id,
    }
}

// ===== Book Repository =====

pub struct SeaOrmBookRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmBookRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn create(&self, book: &NewBook) -> Result<Book> {
        let active: book::ActiveModel = book.into();
        let result = book::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(unique_violation)?;

        result.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Book>> {
        let result = book::Entity::find_by_id(id).one(&*self.db).await?;
        result.map(Book::try_from).transpose()
    }

    async fn exists_by_isbn(&self, isbn: &str) -> Result<bool> {
        let count = book::Entity::find()
            .filter(book::Column::Isbn.eq(isbn))
            .count(&*self.db)
            .await?;

        Ok(count > 0)
    }

    async fn list_all(&self) -> Result<Vec<Book>> {
        let results = book::Entity::find()
            .order_by_asc(book::Column::Title)
            .order_by_asc(book::Column::Id)
            .all(&*self.db)
            .await?;

        to_books(results)
    }

    async fn find_by_status(&self, status: ReadingStatus) -> Result<Vec<Book>> {
        let results = book::Entity::find()
            .filter(book::Column::Status.eq(status.as_code()))
            .order_by_asc(book::Column::Title)
            .order_by_asc(book::Column::Id)
            .all(&*self.db)
            .await?;

        to_books(results)
    }

    async fn search(
        &self,
        criteria: &BookSearchCriteria,
        page: &PageRequest,
    ) -> Result<Page<Book>> {
        let order = match page.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };
        let paginator = book::Entity::find()
            .filter(criteria_condition(criteria))
            .order_by(sort_column(page.sort), order)
            .order_by_asc(book::Column::Id)
            .paginate(&*self.db, page.size);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page).await?;

        Ok(Page::new(to_books(rows)?, page, total))
    }

    async fn find_finished_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Book>> {
        let results = book::Entity::find()
            .filter(book::Column::Status.eq(ReadingStatus::Finished.as_code()))
            .filter(book::Column::FinishedDate.between(start, end))
            .order_by_desc(book::Column::FinishedDate)
            .all(&*self.db)
            .await?;

        to_books(results)
    }

    async fn update(&self, book: &Book) -> Result<Book> {
        let active: book::ActiveModel = book.into();
        let result = book::Entity::update(active)
            .exec(&*self.db)
            .await
            .map_err(unique_violation)?;

        result.try_into()
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let txn = self.db.begin().await?;
        book_shelf::Entity::delete_many()
            .filter(book_shelf::Column::BookId.eq(id))
            .exec(&txn)
            .await?;
        book::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(())
    }
}

// ===== Shelf Repository =====

pub struct SeaOrmShelfRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmShelfRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ShelfRepository for SeaOrmShelfRepository {
    async fn create(&self, shelf: &NewShelf) -> Result<Shelf> {
        let active: shelf::ActiveModel = shelf.into();
        let result = shelf::Entity::insert(active)
            .exec_with_returning(&*self.db)
            .await
            .map_err(unique_violation)?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Shelf>> {
        let result = shelf::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(Shelf::from))
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool> {
        let count = shelf::Entity::find()
            .filter(shelf::Column::Name.eq(name))
            .count(&*self.db)
            .await?;

        Ok(count > 0)
    }

    async fn list_all(&self) -> Result<Vec<Shelf>> {
        let results = shelf::Entity::find()
            .order_by_asc(shelf::Column::Name)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(Shelf::from).collect())
    }

    async fn update(&self, shelf: &Shelf) -> Result<Shelf> {
        let active: shelf::ActiveModel = shelf.into();
        let result = shelf::Entity::update(active)
            .exec(&*self.db)
            .await
            .map_err(unique_violation)?;

        Ok(result.into())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let txn = self.db.begin().await?;
        book_shelf::Entity::delete_many()
            .filter(book_shelf::Column::ShelfId.eq(id))
            .exec(&txn)
            .await?;
        shelf::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(())
    }

    async fn books_on_shelf(&self, shelf_id: i64) -> Result<Vec<Book>> {
        let results = book::Entity::find()
            .join(JoinType::InnerJoin, book::Relation::BookShelf.def())
            .filter(book_shelf::Column::ShelfId.eq(shelf_id))
            .order_by_asc(book::Column::Title)
            .order_by_asc(book::Column::Id)
            .all(&*self.db)
            .await?;

        to_books(results)
    }

    async fn contains_book(&self, shelf_id: i64, book_id: i64) -> Result<bool> {
        let count = book_shelf::Entity::find()
            .filter(book_shelf::Column::ShelfId.eq(shelf_id))
            .filter(book_shelf::Column::BookId.eq(book_id))
            .count(&*self.db)
            .await?;

        Ok(count > 0)
    }

    async fn add_book(&self, shelf_id: i64, book_id: i64) -> Result<()> {
        let active = book_shelf::ActiveModel {
            book_id: Set(book_id),
            shelf_id: Set(shelf_id),
        };
        book_shelf::Entity::insert(active)
            .exec_without_returning(&*self.db)
            .await
            .map_err(unique_violation)?;

        Ok(())
    }

    async fn remove_book(&self, shelf_id: i64, book_id: i64) -> Result<()> {
        book_shelf::Entity::delete_many()
            .filter(book_shelf::Column::ShelfId.eq(shelf_id))
            .filter(book_shelf::Column::BookId.eq(book_id))
            .exec(&*self.db)
            .await?;

        Ok(())
    }
}

// ===== Reading Goal Repository =====

pub struct SeaOrmReadingGoalRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmReadingGoalRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReadingGoalRepository for SeaOrmReadingGoalRepository {
    async fn create(&self, goal: &NewReadingGoal, is_active: bool) -> Result<ReadingGoal> {
        let result = reading_goal::Entity::insert(new_goal(goal, is_active))
            .exec_with_returning(&*self.db)
            .await?;

        Ok(result.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ReadingGoal>> {
        let result = reading_goal::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(result.map(ReadingGoal::from))
    }

    async fn list_all(&self) -> Result<Vec<ReadingGoal>> {
        let results = reading_goal::Entity::find()
            .order_by_desc(reading_goal::Column::CreatedAt)
            .order_by_desc(reading_goal::Column::Id)
            .all(&*self.db)
            .await?;

        Ok(results.into_iter().map(ReadingGoal::from).collect())
    }

    async fn find_active(&self) -> Result<Option<ReadingGoal>> {
        let result = reading_goal::Entity::find()
            .filter(reading_goal::Column::IsActive.eq(true))
            .order_by_desc(reading_goal::Column::CreatedAt)
            .order_by_desc(reading_goal::Column::Id)
            .one(&*self.db)
            .await?;

        Ok(result.map(ReadingGoal::from))
    }

    async fn find_current(&self, date: NaiveDate) -> Result<Option<ReadingGoal>> {
        let result = reading_goal::Entity::find()
            .filter(reading_goal::Column::StartDate.lte(date))
            .filter(reading_goal::Column::EndDate.gte(date))
            .order_by_desc(reading_goal::Column::StartDate)
            .one(&*self.db)
            .await?;

        Ok(result.map(ReadingGoal::from))
    }

    async fn exists_overlapping(
        &self,
        exclude_id: Option<i64>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<bool> {
        let mut query = reading_goal::Entity::find()
            .filter(reading_goal::Column::StartDate.lte(end))
            .filter(reading_goal::Column::EndDate.gte(start));

        if let Some(id) = exclude_id {
            query = query.filter(reading_goal::Column::Id.ne(id));
        }

        Ok(query.count(&*self.db).await? > 0)
    }

    async fn deactivate_all_except(&self, keep_id: Option<i64>) -> Result<u64> {
        let mut update = reading_goal::Entity::update_many()
            .col_expr(reading_goal::Column::IsActive, Expr::value(false))
            .filter(reading_goal::Column::IsActive.eq(true));

        if let Some(id) = keep_id {
            update = update.filter(reading_goal::Column::Id.ne(id));
        }

        Ok(update.exec(&*self.db).await?.rows_affected)
    }

    async fn update(&self, goal: &ReadingGoal) -> Result<ReadingGoal> {
        let active: reading_goal::ActiveModel = goal.into();
        let result = reading_goal::Entity::update(active).exec(&*self.db).await?;

        Ok(result.into())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        reading_goal::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await?;

        Ok(())
    }
}
