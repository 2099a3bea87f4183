use super::{internal, Service};
use crate::contract::{GoalProgress, LibraryError, NewReadingGoal, ReadingGoal, ReadingGoalPatch};
use crate::domain::progress::compute_progress;
use crate::domain::validation;
use chrono::NaiveDate;
use tracing::info;

const OVERLAP_MESSAGE: &str = "A goal already exists for this date range";

impl Service {
    // ===== Reading Goal Operations =====

    /// Create a goal; it becomes the only active goal
    pub async fn create_goal(&self, new: NewReadingGoal) -> Result<ReadingGoal, LibraryError> {
        validation::validate_new_goal(&new)?;
        self.ensure_no_overlap(None, new.start_date, new.end_date)
            .await?;

        let deactivated = self
            .goals
            .deactivate_all_except(None)
            .await
            .map_err(internal)?;
        let goal = self.goals.create(&new, true).await.map_err(internal)?;
        info!(
            goal_id = goal.id,
            target = goal.target_books,
            deactivated,
            "Created reading goal"
        );
        Ok(goal)
    }

    /// Goals, newest first
    pub async fn list_goals(&self) -> Result<Vec<ReadingGoal>, LibraryError> {
        self.goals.list_all().await.map_err(internal)
    }

    pub async fn get_goal(&self, id: i64) -> Result<ReadingGoal, LibraryError> {
        self.goals
            .find_by_id(id)
            .await
            .map_err(internal)?
            .ok_or_else(|| LibraryError::not_found("reading goal", id))
    }

    /// The goal flagged active
    pub async fn active_goal(&self) -> Result<ReadingGoal, LibraryError> {
        self.goals
            .find_active()
            .await
            .map_err(internal)?
            .ok_or_else(|| LibraryError::not_found("reading goal", "active"))
    }

    /// The goal whose period contains today
    pub async fn current_goal(&self) -> Result<ReadingGoal, LibraryError> {
        self.goals
            .find_current(self.today())
            .await
            .map_err(internal)?
            .ok_or_else(|| LibraryError::not_found("reading goal", "current"))
    }

    pub async fn update_goal(
        &self,
        id: i64,
        patch: ReadingGoalPatch,
    ) -> Result<ReadingGoal, LibraryError> {
        validation::validate_goal_patch(&patch)?;
        let mut goal = self.get_goal(id).await?;

        let start = patch.start_date.unwrap_or(goal.start_date);
        let end = patch.end_date.unwrap_or(goal.end_date);
        validation::validate_date_range(start, end)?;
        if start != goal.start_date || end != goal.end_date {
            self.ensure_no_overlap(Some(id), start, end).await?;
        }

        goal.start_date = start;
        goal.end_date = end;
        if let Some(target) = patch.target_books {
            goal.target_books = target;
        }
        if let Some(description) = patch.description {
            goal.description = Some(description);
        }
        if let Some(is_active) = patch.is_active {
            if is_active && !goal.is_active {
                self.goals
                    .deactivate_all_except(Some(id))
                    .await
                    .map_err(internal)?;
            }
            goal.is_active = is_active;
        }

        let goal = self.goals.update(&goal).await.map_err(internal)?;
        info!(goal_id = goal.id, active = goal.is_active, "Updated reading goal");
        Ok(goal)
    }

    pub async fn delete_goal(&self, id: i64) -> Result<(), LibraryError> {
        self.get_goal(id).await?;
        self.goals.delete(id).await.map_err(internal)?;
        info!(goal_id = id, "Deleted reading goal");
        Ok(())
    }

    /// Progress and pace of a goal from the books finished inside its period
    pub async fn goal_progress(&self, id: i64) -> Result<GoalProgress, LibraryError> {
        let goal = self.get_goal(id).await?;
        let finished = self
            .books
            .find_finished_between(goal.start_date, goal.end_date)
            .await
            .map_err(internal)?;
        Ok(compute_progress(&goal, finished, self.today()))
    }

    async fn ensure_no_overlap(
        &self,
        exclude_id: Option<i64>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<(), LibraryError> {
        if self
            .goals
            .exists_overlapping(exclude_id, start, end)
            .await
            .map_err(internal)?
        {
            return Err(LibraryError::validation(OVERLAP_MESSAGE));
        }
        Ok(())
    }
}
