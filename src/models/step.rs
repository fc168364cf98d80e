use std::fmt;

/// Lifecycle of a single fabrication step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
}

impl StepStatus {
    /// Menu order used by the status dropdown.
    pub const ALL: [StepStatus; 3] = [
        StepStatus::Pending,
        StepStatus::InProgress,
        StepStatus::Completed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StepStatus::Pending => "Pending",
            StepStatus::InProgress => "In progress",
            StepStatus::Completed => "Completed",
        }
    }

    /// Statuses other than pending require every earlier step to be done.
    pub fn is_advanced(self) -> bool {
        !matches!(self, StepStatus::Pending)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub name: String,
    pub status: StepStatus,
}

impl Step {
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: StepStatus::Pending,
        }
    }

    pub fn with_status(mut self, status: StepStatus) -> Self {
        self.status = status;
        self
    }
}

/// Builds a fresh, all-pending step sequence from a template of names.
pub fn steps_from_template<S: AsRef<str>>(template: &[S]) -> Vec<Step> {
    template.iter().map(|name| Step::pending(name.as_ref())).collect()
}
