mod comment;
mod project;
mod step;

pub use comment::{Comment, CommentLog};
pub use project::{LastUpdate, NewProject, Project, ProjectStatus};
pub use step::{steps_from_template, Step, StepStatus};
