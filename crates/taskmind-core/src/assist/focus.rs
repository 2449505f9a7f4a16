//! Focus ranking.
//!
//! Picks at most three active tasks to work on today. Candidates are drawn
//! from fixed pools in order (overdue, due today, high priority, due soon,
//! then everything else) and each pool is walked alphabetically, so the
//! same input always yields the same list.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;

use crate::task::TaskRecord;

/// Upper bound on recommended tasks.
pub const MAX_FOCUS_ITEMS: usize = 3;

/// Tasks due within this many days (but not today) count as "due soon".
pub const DUE_SOON_DAYS: i64 = 2;

/// Why a task was put in front of the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusReason {
    /// Past due by at least one day
    Overdue { days: i64 },
    DueToday,
    HighPriority,
    /// Due in 1..=2 days
    DueSoon { days: i64 },
    Recommended,
}

impl FocusReason {
    /// Highest-precedence reason that applies to `task` on `today`.
    pub fn for_task(task: &TaskRecord, today: NaiveDate) -> Self {
        match task.days_until_due(today) {
            Some(days) if days < 0 => FocusReason::Overdue { days: (-days).max(1) },
            Some(0) => FocusReason::DueToday,
            _ if task.is_high_priority() => FocusReason::HighPriority,
            Some(days) if (1..=DUE_SOON_DAYS).contains(&days) => FocusReason::DueSoon { days },
            _ => FocusReason::Recommended,
        }
    }
}

impl fmt::Display for FocusReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FocusReason::Overdue { days } => write!(f, "Overdue by {days} day(s)"),
            FocusReason::DueToday => f.write_str("Due today"),
            FocusReason::HighPriority => f.write_str("High priority"),
            FocusReason::DueSoon { days } => write!(f, "Due in {days} day(s)"),
            FocusReason::Recommended => f.write_str("Recommended for today"),
        }
    }
}

impl Serialize for FocusReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A recommended task with a short explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusItem {
    pub title: String,
    pub reason: FocusReason,
}

/// Candidate pools, in the order they are drained.
#[derive(Debug, Clone, Copy)]
enum Pool {
    Overdue,
    DueToday,
    HighPriority,
    DueSoon,
    Any,
}

impl Pool {
    const ORDER: [Pool; 5] = [
        Pool::Overdue,
        Pool::DueToday,
        Pool::HighPriority,
        Pool::DueSoon,
        Pool::Any,
    ];

    fn admits(self, task: &TaskRecord, today: NaiveDate) -> bool {
        let days = task.days_until_due(today);
        match self {
            Pool::Overdue => days.is_some_and(|d| d < 0),
            Pool::DueToday => days == Some(0),
            Pool::HighPriority => task.is_high_priority(),
            Pool::DueSoon => days.is_some_and(|d| (1..=DUE_SOON_DAYS).contains(&d)),
            Pool::Any => true,
        }
    }
}

/// Select up to [`MAX_FOCUS_ITEMS`] tasks to focus on.
///
/// Done tasks are never returned. Titles are unique in the output; when two
/// active tasks share a title only the first in alphabetical order is kept.
pub fn select_focus_tasks(tasks: &[TaskRecord], today: NaiveDate) -> Vec<FocusItem> {
    select_focus_records(tasks, today)
        .into_iter()
        .map(|task| FocusItem {
            title: task.title().to_string(),
            reason: FocusReason::for_task(task, today),
        })
        .collect()
}

pub(crate) fn select_focus_records(tasks: &[TaskRecord], today: NaiveDate) -> Vec<&TaskRecord> {
    let mut active: Vec<&TaskRecord> = tasks.iter().filter(|t| t.is_active()).collect();
    active.sort_by(|a, b| {
        a.title()
            .cmp(b.title())
            .then_with(|| a.created_at().cmp(&b.created_at()))
            .then_with(|| a.id().cmp(b.id()))
    });

    let mut chosen: Vec<&TaskRecord> = Vec::with_capacity(MAX_FOCUS_ITEMS);
    let mut seen: HashSet<&str> = HashSet::new();

    'pools: for pool in Pool::ORDER {
        for &task in &active {
            if chosen.len() >= MAX_FOCUS_ITEMS {
                break 'pools;
            }
            if pool.admits(task, today) && seen.insert(task.title()) {
                chosen.push(task);
            }
        }
    }

    chosen
}
