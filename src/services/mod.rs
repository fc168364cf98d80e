//! Collaborators the dashboard calls out to: project lookup, user
//! notifications and share links.

use crate::models::Project;
use crate::store::ProjectStore;

/// Looks a project up by id.
pub trait ProjectSource {
    fn fetch_project(&self, id: u32) -> Option<Project>;
}

impl ProjectSource for ProjectStore {
    fn fetch_project(&self, id: u32) -> Option<Project> {
        self.get_by_id(id).cloned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub text: String,
}

impl Notification {
    pub fn normal(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Normal,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn destructive(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            severity: Severity::Destructive,
            title: title.into(),
            text: text.into(),
        }
    }
}

/// Presents a message to the user.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Produces a shareable link for a project.
pub trait ShareLinks {
    fn share_url(&self, project_id: u32) -> String;
}

pub struct BaseUrlLinks {
    base_url: String,
}

impl BaseUrlLinks {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }
}

impl ShareLinks for BaseUrlLinks {
    fn share_url(&self, project_id: u32) -> String {
        format!("{}/projects/{}", self.base_url, project_id)
    }
}
