//! Weekly recap over tasks created in the last seven days.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::task::TaskRecord;

pub const WEEK_DAYS: i64 = 7;
pub const MAX_HIGHLIGHTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    pub summary: String,
    pub highlights: Vec<String>,
    pub suggestion: String,
}

/// Summarize tasks created in the seven calendar days ending on `week_end`,
/// with creation times read as UTC days.
pub fn weekly_summary(tasks: &[TaskRecord], week_end: NaiveDate) -> WeeklySummary {
    weekly_summary_in(tasks, week_end, &Utc)
}

/// Like [`weekly_summary`], but creation times are turned into calendar days
/// in `tz`, the zone `week_end` was taken in.
pub fn weekly_summary_in<Tz: TimeZone>(
    tasks: &[TaskRecord],
    week_end: NaiveDate,
    tz: &Tz,
) -> WeeklySummary {
    let week_start = week_end - Duration::days(WEEK_DAYS - 1);
    let in_week: Vec<&TaskRecord> = tasks
        .iter()
        .filter(|t| {
            let created = t.created_at().with_timezone(tz).date_naive();
            created >= week_start && created <= week_end
        })
        .collect();

    if in_week.is_empty() {
        return WeeklySummary {
            summary: "You haven't created any tasks this week. Start by adding a few tasks to track your progress."
                .to_string(),
            highlights: vec![
                "A fresh start is a great opportunity to organize your priorities".to_string(),
            ],
            suggestion: "Consider adding 2-3 tasks to get started".to_string(),
        };
    }

    let total = in_week.len();
    let completed = in_week.iter().filter(|t| !t.is_active()).count();
    let pending = total - completed;
    let overdue = in_week.iter().filter(|t| t.is_overdue(week_end)).count();

    let summary = format!(
        "This week you worked on {}. You completed {} and have {pending} still in progress.",
        tasks_phrase(total),
        tasks_phrase(completed),
    );

    let mut highlights = Vec::new();
    if completed > 0 {
        highlights.push(format!("You completed {} this week", tasks_phrase(completed)));
    }
    if overdue == 0 && pending > 0 {
        highlights.push("You stayed on top of deadlines".to_string());
    }
    if highlights.is_empty() {
        highlights.push("You're making progress on your tasks".to_string());
    }
    highlights.truncate(MAX_HIGHLIGHTS);

    let suggestion = if pending > 3 {
        "Consider focusing on 2-3 high-priority tasks at a time"
    } else {
        "Keep up the momentum by tackling your next priority"
    };

    WeeklySummary {
        summary,
        highlights,
        suggestion: suggestion.to_string(),
    }
}

fn tasks_phrase(n: usize) -> String {
    if n == 1 {
        "1 task".to_string()
    } else {
        format!("{n} tasks")
    }
}
