//! Daily insight card: summary, focus list, warnings and one tip.

use chrono::NaiveDate;
use serde::Serialize;

use super::focus::{select_focus_tasks, FocusItem};
use super::narrative::{build_summary, build_tip, build_warnings, TaskCounts};
use crate::task::TaskRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResult {
    pub summary: String,
    pub focus_tasks: Vec<FocusItem>,
    pub warnings: Vec<String>,
    pub productivity_tip: String,
}

pub fn build_insights(tasks: &[TaskRecord], today: NaiveDate) -> InsightResult {
    let counts = TaskCounts::tally(tasks, today);
    InsightResult {
        summary: build_summary(&counts),
        focus_tasks: select_focus_tasks(tasks, today),
        warnings: build_warnings(&counts),
        productivity_tip: build_tip(&counts),
    }
}
