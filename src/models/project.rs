use chrono::{DateTime, NaiveDate, Utc};

use super::{CommentLog, Step, StepStatus};

/// Most recent change made to a project. Overwritten on every mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastUpdate {
    pub user: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

impl LastUpdate {
    pub fn now(user: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            action: action.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: u32,
    pub client_name: String,
    pub stone_type: String,
    pub start_date: NaiveDate,
    pub expected_end_date: NaiveDate,
    pub steps: Vec<Step>,
    pub last_update: LastUpdate,
    pub comments: CommentLog,
}

impl Project {
    pub fn title(&self) -> String {
        format!("{} - {}", self.client_name, self.stone_type)
    }

    pub fn status(&self) -> ProjectStatus {
        ProjectStatus::from_steps(&self.steps)
    }
}

/// Fields collected by the creation wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub client_name: String,
    pub stone_type: String,
    pub start_date: NaiveDate,
    pub expected_end_date: NaiveDate,
}

/// Aggregate status shown on both the panel cards and the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectStatus {
    Pending,
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub fn from_steps(steps: &[Step]) -> Self {
        if !steps.is_empty() && steps.iter().all(|s| s.status == StepStatus::Completed) {
            ProjectStatus::Completed
        } else if steps.iter().any(|s| s.status.is_advanced()) {
            ProjectStatus::InProgress
        } else {
            ProjectStatus::Pending
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Pending => "Pending",
            ProjectStatus::InProgress => "In progress",
            ProjectStatus::Completed => "Completed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn steps(statuses: &[StepStatus]) -> Vec<Step> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, s)| Step::pending(format!("Step {}", i + 1)).with_status(*s))
            .collect()
    }

    #[test]
    fn test_all_pending_is_pending() {
        let s = steps(&[StepStatus::Pending, StepStatus::Pending]);
        assert_eq!(ProjectStatus::from_steps(&s), ProjectStatus::Pending);
    }

    #[test]
    fn test_partial_progress_is_in_progress() {
        let s = steps(&[StepStatus::Completed, StepStatus::Pending]);
        assert_eq!(ProjectStatus::from_steps(&s), ProjectStatus::InProgress);

        let s = steps(&[StepStatus::InProgress, StepStatus::Pending]);
        assert_eq!(ProjectStatus::from_steps(&s), ProjectStatus::InProgress);
    }

    #[test]
    fn test_all_completed_is_completed() {
        let s = steps(&[StepStatus::Completed, StepStatus::Completed]);
        assert_eq!(ProjectStatus::from_steps(&s), ProjectStatus::Completed);
    }

    #[test]
    fn test_empty_steps_are_pending() {
        assert_eq!(ProjectStatus::from_steps(&[]), ProjectStatus::Pending);
    }
}
