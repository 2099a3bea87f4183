//! Reading goal progress and pace

use crate::contract::{Book, GoalProgress, ReadingGoal};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Average month length used for pace figures
const DAYS_PER_MONTH: f64 = 30.0;
const DAYS_PER_WEEK: f64 = 7.0;
/// A goal is on track at 90% of the linear expectation
const ON_TRACK_RATIO: f64 = 0.9;
const RECENTLY_FINISHED_LIMIT: usize = 5;

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Compute progress of `goal` from the books finished inside its period
pub fn compute_progress(goal: &ReadingGoal, finished: Vec<Book>, today: NaiveDate) -> GoalProgress {
    let target = goal.target_books;
    let books_read = i32::try_from(finished.len()).unwrap_or(i32::MAX);
    let books_remaining = (target - books_read).max(0);
    let percentage_complete = if target > 0 {
        f64::from(books_read) * 100.0 / f64::from(target)
    } else {
        0.0
    };

    let total_days = goal.total_days();
    let days_elapsed = goal.days_elapsed(today);
    let days_remaining = goal.days_remaining(today);

    let months_in_goal = total_days as f64 / DAYS_PER_MONTH;
    let books_per_month = if months_in_goal > 0.0 {
        f64::from(target) / months_in_goal
    } else {
        0.0
    };
    let weeks_in_goal = total_days as f64 / DAYS_PER_WEEK;
    let books_per_week = if weeks_in_goal > 0.0 {
        f64::from(target) / weeks_in_goal
    } else {
        0.0
    };

    let months_elapsed = days_elapsed as f64 / DAYS_PER_MONTH;
    let average_books_per_month = if months_elapsed > 0.0 {
        f64::from(books_read) / months_elapsed
    } else {
        0.0
    };

    let expected_books = if days_elapsed > 0 && total_days > 0 {
        f64::from(target) * days_elapsed as f64 / total_days as f64
    } else {
        0.0
    };
    let on_track = f64::from(books_read) >= expected_books * ON_TRACK_RATIO;

    let mut monthly_breakdown: BTreeMap<String, i32> = BTreeMap::new();
    for date in finished.iter().filter_map(|b| b.finished_date) {
        *monthly_breakdown
            .entry(format!("{:04}-{:02}", date.year(), date.month()))
            .or_default() += 1;
    }

    let mut recently_finished = finished;
    recently_finished.sort_by(|a, b| b.finished_date.cmp(&a.finished_date).then(b.id.cmp(&a.id)));
    recently_finished.truncate(RECENTLY_FINISHED_LIMIT);

    GoalProgress {
        goal_id: goal.id,
        target_books: target,
        year: goal.year,
        start_date: goal.start_date,
        end_date: goal.end_date,
        description: goal.description.clone(),
        is_active: goal.is_active,
        is_current: goal.is_current(today),
        books_read,
        books_remaining,
        percentage_complete: round1(percentage_complete),
        days_elapsed,
        days_remaining,
        total_days,
        books_per_month: round1(books_per_month),
        books_per_week: round1(books_per_week),
        average_books_per_month: round1(average_books_per_month),
        on_track,
        recently_finished,
        monthly_breakdown,
    }
}
