//! Library-wide reading statistics

use super::progress::round1;
use crate::contract::{AuthorCount, Book, ReadingStats, ReadingStatus};
use chrono::{Datelike, NaiveDate};
use std::collections::{BTreeMap, HashMap};

const TOP_AUTHORS_LIMIT: usize = 5;

pub fn compute_stats(books: &[Book], today: NaiveDate) -> ReadingStats {
    let count_status = |status: ReadingStatus| {
        books.iter().filter(|b| b.status == status).count() as i64
    };

    let current_year = today.year();
    let books_read_this_year = books
        .iter()
        .filter(|b| b.finished_date.is_some_and(|d| d.year() == current_year))
        .count() as i64;
    let books_added_this_year = books
        .iter()
        .filter(|b| b.created_at.year() == current_year)
        .count() as i64;

    let ratings: Vec<i32> = books.iter().filter_map(|b| b.rating).collect();
    let average_rating = if ratings.is_empty() {
        0.0
    } else {
        round1(ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / ratings.len() as f64)
    };
    let mut rating_distribution: BTreeMap<i32, i64> = BTreeMap::new();
    for rating in &ratings {
        *rating_distribution.entry(*rating).or_default() += 1;
    }

    let mut per_author: HashMap<&str, i64> = HashMap::new();
    for author in books
        .iter()
        .filter_map(|b| b.author.as_deref())
        .map(str::trim)
        .filter(|a| !a.is_empty())
    {
        *per_author.entry(author).or_default() += 1;
    }
    let unique_authors = per_author.len() as i64;
    let mut top_authors: Vec<AuthorCount> = per_author
        .into_iter()
        .map(|(author, count)| AuthorCount {
            author: author.to_string(),
            count,
        })
        .collect();
    top_authors.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.author.cmp(&b.author)));
    top_authors.truncate(TOP_AUTHORS_LIMIT);

    let books_per_month = round1(books_read_this_year as f64 / f64::from(today.month()));

    let pages: Vec<i32> = books
        .iter()
        .filter_map(|b| b.page_count)
        .filter(|p| *p > 0)
        .collect();
    let average_pages_per_book = if pages.is_empty() {
        0.0
    } else {
        (pages.iter().map(|p| f64::from(*p)).sum::<f64>() / pages.len() as f64).round()
    };

    let mut books_read_by_year: BTreeMap<i32, i64> = BTreeMap::new();
    for date in books.iter().filter_map(|b| b.finished_date) {
        *books_read_by_year.entry(date.year()).or_default() += 1;
    }

    ReadingStats {
        total_books: books.len() as i64,
        books_read: count_status(ReadingStatus::Finished),
        books_to_read: count_status(ReadingStatus::ToRead),
        currently_reading: count_status(ReadingStatus::CurrentlyReading),
        books_did_not_finish: count_status(ReadingStatus::Dnf),
        current_year,
        books_read_this_year,
        books_added_this_year,
        average_rating,
        rated_books: ratings.len() as i64,
        rating_distribution,
        unique_authors,
        top_authors,
        books_per_month,
        average_pages_per_book,
        books_read_by_year,
    }
}
