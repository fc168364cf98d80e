//! Step ordering rules for a project's fabrication sequence

mod transitions;


pub use transitions::{apply_transition, can_transition, check_transition, StepOrderViolation};
