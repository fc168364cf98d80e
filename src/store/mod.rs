//! In-memory project collection
//!
//! `ProjectStore` is the only place a project may change. Views read borrowed
//! snapshots and go through these operations for every mutation.

mod fixtures;

use tracing::{info, warn};

use crate::domain::{apply_transition, check_transition, StepOrderViolation};
use crate::models::{steps_from_template, Comment, LastUpdate, NewProject, Project, StepStatus};

pub use fixtures::sample_projects;

pub struct ProjectStore {
    projects: Vec<Project>,
    step_template: Vec<String>,
}

impl ProjectStore {
    /// Creates an empty store whose new projects use `step_template`.
    pub fn new(step_template: Vec<String>) -> Self {
        Self {
            projects: Vec::new(),
            step_template,
        }
    }

    /// Creates a store seeded with the sample projects.
    pub fn with_fixtures(step_template: Vec<String>) -> Self {
        let mut store = Self::new(step_template);
        store.projects = sample_projects(&store.step_template);
        store
    }

    pub fn get_all(&self) -> &[Project] {
        &self.projects
    }

    pub fn get_by_id(&self, id: u32) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Changes the status of one step of one project.
    ///
    /// Returns `Ok(None)` when the project or step does not exist, and
    /// `Err` when an earlier step is not completed. In both cases nothing
    /// changes. On success the project's steps and last update are replaced.
    pub fn update_step_status(
        &mut self,
        actor: &str,
        project_id: u32,
        step_index: usize,
        new_status: StepStatus,
    ) -> Result<Option<&Project>, StepOrderViolation> {
        let Some(position) = self.projects.iter().position(|p| p.id == project_id) else {
            warn!(project_id, "status update for unknown project ignored");
            return Ok(None);
        };

        let project = &self.projects[position];
        let Some(step) = project.steps.get(step_index) else {
            warn!(project_id, step_index, "status update for unknown step ignored");
            return Ok(None);
        };
        let old_status = step.status;
        let step_name = step.name.clone();

        if let Err(violation) = check_transition(&project.steps, step_index, new_status) {
            warn!(project_id, step = %step_name, target = %new_status, "transition rejected");
            return Err(violation);
        }

        let next_steps = apply_transition(&project.steps, step_index, new_status);
        let action = describe_change(&step_name, old_status, new_status);
        info!(project_id, %actor, %action, "step status updated");

        let updated = Project {
            steps: next_steps,
            last_update: LastUpdate::now(actor, action),
            ..project.clone()
        };
        self.projects[position] = updated;

        Ok(Some(&self.projects[position]))
    }

    /// Appends a new project with every step pending and returns a copy of it.
    pub fn add_project(&mut self, actor: &str, fields: NewProject) -> Project {
        let id = self.next_id();
        let project = Project {
            id,
            client_name: fields.client_name,
            stone_type: fields.stone_type,
            start_date: fields.start_date,
            expected_end_date: fields.expected_end_date,
            steps: steps_from_template(&self.step_template),
            last_update: LastUpdate::now(actor, "created the project"),
            comments: Default::default(),
        };
        info!(project_id = id, %actor, client = %project.client_name, "project created");

        self.projects.push(project.clone());
        project
    }

    /// Appends a comment to a project's feed. Blank text is ignored.
    pub fn add_comment(&mut self, actor: &str, project_id: u32, text: &str) -> Option<Comment> {
        let text = text.trim();
        if text.is_empty() {
            warn!(project_id, "empty comment ignored");
            return None;
        }

        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            warn!(project_id, "comment for unknown project ignored");
            return None;
        };

        info!(project_id, %actor, "comment added");
        Some(project.comments.append(actor, text, chrono::Utc::now()))
    }

    fn next_id(&self) -> u32 {
        self.projects.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }
}

/// Audit text for a step status change, e.g. `changed Cut from pending to completed`.
pub(crate) fn describe_change(step_name: &str, from: StepStatus, to: StepStatus) -> String {
    format!(
        "changed {} from {} to {}",
        step_name,
        from.label().to_lowercase(),
        to.label().to_lowercase()
    )
}
