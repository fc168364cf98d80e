use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::models::{CommentLog, LastUpdate, Project, Step, StepStatus};

use super::describe_change;
use crate::models::StepStatus::{Completed, InProgress, Pending};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

// Statuses are laid over the template by position; extra template steps stay pending.
fn steps_with(template: &[String], statuses: &[StepStatus]) -> Vec<Step> {
    template
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let status = statuses.get(i).copied().unwrap_or(Pending);
            Step::pending(name.as_str()).with_status(status)
        })
        .collect()
}

// The most recent change is taken to be the last step that left pending.
fn last_change(steps: &[Step]) -> String {
    match steps.iter().rev().find(|s| s.status.is_advanced()) {
        Some(step) if step.status == Completed => describe_change(&step.name, InProgress, Completed),
        Some(step) => describe_change(&step.name, Pending, step.status),
        None => "created the project".to_string(),
    }
}

/// Demo data shown when the dashboard starts with fixtures enabled.
pub fn sample_projects(template: &[String]) -> Vec<Project> {
    let mut comments = CommentLog::new();
    comments.append("João", "Project started as planned.", at(2024, 6, 1, 9, 0));
    comments.append("Maria", "Cutting finished, starting polishing.", at(2024, 6, 2, 14, 30));

    let carrara_steps = steps_with(template, &[Completed]);
    let granite_steps = steps_with(template, &[Completed, Completed, InProgress]);

    vec![
        Project {
            id: 1,
            client_name: "João Silva".to_string(),
            stone_type: "Carrara Marble".to_string(),
            start_date: date(2024, 6, 1),
            expected_end_date: date(2024, 6, 15),
            last_update: LastUpdate {
                user: "Vagner".to_string(),
                action: last_change(&carrara_steps),
                timestamp: at(2024, 6, 2, 14, 30),
            },
            steps: carrara_steps,
            comments,
        },
        Project {
            id: 2,
            client_name: "Maria Santos".to_string(),
            stone_type: "São Gabriel Black Granite".to_string(),
            start_date: date(2024, 10, 5),
            expected_end_date: date(2024, 11, 20),
            last_update: LastUpdate {
                user: "Ana".to_string(),
                action: last_change(&granite_steps),
                timestamp: at(2024, 11, 7, 11, 15),
            },
            steps: granite_steps,
            comments: CommentLog::new(),
        },
    ]
}
