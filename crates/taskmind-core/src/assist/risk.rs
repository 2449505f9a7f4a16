//! Deadline risk detection.
//!
//! Read-only early warning over the user's active tasks. Produces at most
//! three calm, explainable warnings and a coarse risk tier.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::task::TaskRecord;

/// Upper bound on emitted warnings.
pub const MAX_WARNINGS: usize = 3;

/// Tasks due within this many days (today included) are "upcoming".
pub const UPCOMING_WINDOW_DAYS: i64 = 3;

/// High-priority tasks due within this many days count toward overload.
pub const OVERLOAD_WINDOW_DAYS: i64 = 7;

/// Overload warning fires at this many qualifying tasks.
pub const OVERLOAD_WARNING_THRESHOLD: usize = 4;

/// Overload alone makes the risk high at this many qualifying tasks.
pub const OVERLOAD_HIGH_THRESHOLD: usize = 5;

/// Overload alone makes the risk medium at this many qualifying tasks.
pub const OVERLOAD_MEDIUM_THRESHOLD: usize = 3;

/// Shown whenever at least one warning was emitted.
pub const RISK_NOTE: &str =
    "This is an early warning only. You're in control, and no changes have been made to your tasks.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningKind {
    Overdue,
    Upcoming,
    Overload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineWarning {
    #[serde(rename = "type")]
    pub kind: WarningKind,
    pub message: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    pub overall_risk: RiskLevel,
    pub warnings: Vec<DeadlineWarning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RiskResult {
    /// No warnings, low risk.
    pub fn calm() -> Self {
        Self {
            overall_risk: RiskLevel::Low,
            warnings: Vec::new(),
            note: None,
        }
    }
}

/// Per-rule counts over the active tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskCounts {
    pub overdue: usize,
    pub upcoming: usize,
    pub overload: usize,
}

impl RiskCounts {
    pub fn tally(tasks: &[TaskRecord], today: NaiveDate) -> Self {
        let mut counts = RiskCounts::default();
        for task in tasks.iter().filter(|t| t.is_active()) {
            let Some(days) = task.days_until_due(today) else {
                continue;
            };
            if days < 0 {
                counts.overdue += 1;
            }
            if (0..=UPCOMING_WINDOW_DAYS).contains(&days) {
                counts.upcoming += 1;
            }
            if task.is_high_priority() && (0..=OVERLOAD_WINDOW_DAYS).contains(&days) {
                counts.overload += 1;
            }
        }
        counts
    }
}

/// Analyze deadline risk for `tasks` as of `today`.
///
/// Never fails; an empty list is low risk with no warnings and no note.
pub fn analyze_deadline_risk(tasks: &[TaskRecord], today: NaiveDate) -> RiskResult {
    let counts = RiskCounts::tally(tasks, today);
    let mut warnings = Vec::with_capacity(MAX_WARNINGS);

    if counts.overdue > 0 {
        warnings.push(DeadlineWarning {
            kind: WarningKind::Overdue,
            message: format!("{} past due.", count_phrase(counts.overdue)),
            reason: "Completing or rescheduling them can reduce stress and keep your plan accurate."
                .to_string(),
        });
    }

    if counts.upcoming > 0 && warnings.len() < MAX_WARNINGS {
        warnings.push(DeadlineWarning {
            kind: WarningKind::Upcoming,
            message: format!("{} due in the next few days.", count_phrase(counts.upcoming)),
            reason: "A quick check can help you decide what to tackle first without last-minute pressure."
                .to_string(),
        });
    }

    if counts.overload >= OVERLOAD_WARNING_THRESHOLD && warnings.len() < MAX_WARNINGS {
        warnings.push(DeadlineWarning {
            kind: WarningKind::Overload,
            message: "Several high-priority tasks are due in the same week.".to_string(),
            reason: "Spreading focus across too many urgent items at once can make it harder to finish any one of them."
                .to_string(),
        });
    }

    warnings.truncate(MAX_WARNINGS);

    let overall_risk = overall_risk(&counts, warnings.len());
    let note = (!warnings.is_empty()).then(|| RISK_NOTE.to_string());

    RiskResult {
        overall_risk,
        warnings,
        note,
    }
}

/// First matching tier wins: high, then medium, then low.
fn overall_risk(counts: &RiskCounts, warning_count: usize) -> RiskLevel {
    if counts.overdue > 0 || counts.overload >= OVERLOAD_HIGH_THRESHOLD {
        RiskLevel::High
    } else if warning_count >= 2 || counts.overload >= OVERLOAD_MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn count_phrase(count: usize) -> String {
    if count == 1 {
        "1 task is".to_string()
    } else {
        format!("{count} tasks are")
    }
}
