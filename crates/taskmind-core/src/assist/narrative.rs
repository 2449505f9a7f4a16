//! Summary and tip sentences.
//!
//! Pure templates over a handful of counts. Same counts, same sentence.

use chrono::NaiveDate;

use crate::task::TaskRecord;

/// High-priority backlog above this size changes the tip.
pub const HIGH_PRIORITY_TIP_THRESHOLD: usize = 3;

/// High-priority backlog above this size adds an insight warning.
pub const HIGH_PRIORITY_WARNING_THRESHOLD: usize = 5;

pub const NO_ACTIVE_TASKS_SUMMARY: &str = "No active tasks. Great job!";

/// Counts the narrative is built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub active: usize,
    pub overdue: usize,
    pub high_priority: usize,
}

impl TaskCounts {
    pub fn tally(tasks: &[TaskRecord], today: NaiveDate) -> Self {
        tasks
            .iter()
            .filter(|t| t.is_active())
            .fold(TaskCounts::default(), |mut acc, task| {
                acc.active += 1;
                if task.is_overdue(today) {
                    acc.overdue += 1;
                }
                if task.is_high_priority() {
                    acc.high_priority += 1;
                }
                acc
            })
    }
}

pub fn build_summary(counts: &TaskCounts) -> String {
    if counts.overdue > 0 {
        format!(
            "You have {} overdue task(s). Focus on clearing or rescheduling them.",
            counts.overdue
        )
    } else if counts.high_priority > 0 {
        format!(
            "You have {} high-priority task(s). Aim to complete the most urgent.",
            counts.high_priority
        )
    } else if counts.active == 0 {
        NO_ACTIVE_TASKS_SUMMARY.to_string()
    } else {
        format!(
            "You have {} active task(s). Prioritize by due date and priority.",
            counts.active
        )
    }
}

pub fn build_tip(counts: &TaskCounts) -> String {
    let tip = if counts.overdue > 0 {
        "Address overdue tasks first or reschedule them."
    } else if counts.high_priority > HIGH_PRIORITY_TIP_THRESHOLD {
        "Re-evaluate high-priority tasks; avoid overload."
    } else {
        "Focus on 1-2 tasks today and make steady progress."
    };
    tip.to_string()
}

/// Short warning labels shown next to the insight summary.
pub fn build_warnings(counts: &TaskCounts) -> Vec<String> {
    let mut warnings = Vec::new();
    if counts.overdue > 0 {
        warnings.push("Overdue tasks exist".to_string());
    }
    if counts.high_priority > HIGH_PRIORITY_WARNING_THRESHOLD {
        warnings.push("Too many high priority tasks".to_string());
    }
    warnings
}
