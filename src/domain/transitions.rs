//! Step status transitions
//!
//! Pure functions over a borrowed step sequence. Nothing here mutates its input.

use thiserror::Error;

use crate::models::{Step, StepStatus};

/// A step was asked to leave `pending` while an earlier step is not completed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot mark {step_name} as {target_status}: {reason}", reason = StepOrderViolation::REASON)]
pub struct StepOrderViolation {
    pub step_name: String,
    pub target_status: StepStatus,
}

impl StepOrderViolation {
    pub const REASON: &'static str = "prior steps incomplete";
}

/// Whether step `index` may move to `new_status`.
///
/// Moving back to pending is always allowed. Any other status requires every
/// step before `index` to be completed.
pub fn can_transition(steps: &[Step], index: usize, new_status: StepStatus) -> bool {
    if !new_status.is_advanced() {
        return true;
    }
    steps
        .iter()
        .take(index)
        .all(|step| step.status == StepStatus::Completed)
}

/// Applies an allowed transition and returns the new sequence.
///
/// Resetting a step to pending also resets every later step. Earlier steps are
/// copied through untouched. Callers check `can_transition` first; an
/// out-of-range index returns an unchanged copy.
pub fn apply_transition(steps: &[Step], index: usize, new_status: StepStatus) -> Vec<Step> {
    let mut next = steps.to_vec();
    let Some(target) = next.get_mut(index) else {
        return next;
    };
    target.status = new_status;

    if new_status == StepStatus::Pending {
        for later in next.iter_mut().skip(index + 1) {
            if later.status != StepStatus::Pending {
                later.status = StepStatus::Pending;
            }
        }
    }

    next
}

/// Guard plus structured rejection, for callers that want a `Result`.
pub fn check_transition(
    steps: &[Step],
    index: usize,
    new_status: StepStatus,
) -> Result<(), StepOrderViolation> {
    if can_transition(steps, index, new_status) {
        return Ok(());
    }
    Err(StepOrderViolation {
        step_name: steps
            .get(index)
            .map(|s| s.name.clone())
            .unwrap_or_default(),
        target_status: new_status,
    })
}
