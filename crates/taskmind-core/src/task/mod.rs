//! Task records consumed by the assistant.
//!
//! A [`TaskRecord`] is a validated, read-only snapshot of one task. Loose
//! input (JSON from a transport layer, rows from SQLite) goes through
//! [`RawTaskRecord`] and is checked once here so the analysis code never has
//! to deal with missing titles or unknown status strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Category given to tasks that don't name one.
pub const DEFAULT_CATEGORY: &str = "General";

/// Workflow status of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" | "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Priority of a task. Ordered `Low < Medium < High`.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            other => Err(ValidationError::UnknownPriority(other.to_string())),
        }
    }
}

/// Validated task snapshot.
///
/// Fields are private so a record can only exist with a non-empty id and
/// title. The `with_*` methods consume the record and return a new one; the
/// analysis functions only ever see `&[TaskRecord]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTaskRecord")]
pub struct TaskRecord {
    id: String,
    title: String,
    description: Option<String>,
    category: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
}

impl TaskRecord {
    /// Build a record, rejecting an empty id or title.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        status: TaskStatus,
        priority: TaskPriority,
        due_date: Option<NaiveDate>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyField("id"));
        }
        Ok(Self {
            id,
            title: validate_title(title.into())?,
            description: None,
            category: DEFAULT_CATEGORY.to_string(),
            status,
            priority,
            due_date,
            created_at,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    /// Blank input resets the category to [`DEFAULT_CATEGORY`].
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        let trimmed = category.trim();
        self.category = if trimmed.is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            trimmed.to_string()
        };
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Result<Self, ValidationError> {
        self.title = validate_title(title.into())?;
        Ok(self)
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Anything not done counts as active.
    pub fn is_active(&self) -> bool {
        self.status != TaskStatus::Done
    }

    pub fn is_high_priority(&self) -> bool {
        self.priority == TaskPriority::High
    }

    /// Whole days from `today` to the due date; negative when past due.
    pub fn days_until_due(&self, today: NaiveDate) -> Option<i64> {
        self.due_date.map(|due| (due - today).num_days())
    }

    /// Active and due strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_active() && self.due_date.is_some_and(|due| due < today)
    }

    /// Minimal view handed to external advisors.
    pub fn projection(&self) -> TaskProjection {
        TaskProjection {
            title: self.title.clone(),
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
        }
    }
}

fn validate_title(title: String) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("title"));
    }
    Ok(trimmed.to_string())
}

/// Title, status, priority and due date only. Nothing else about a task
/// leaves the process when an external advisor is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProjection {
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
}

/// Loosely typed task as it arrives from a transport or storage layer.
///
/// `status`, `priority` and `category` default to `pending`, `medium` and
/// [`DEFAULT_CATEGORY`] when absent.
/// `dueDate` accepts `YYYY-MM-DD`, RFC 3339 or a naive ISO timestamp; any
/// other text is treated as "no due date".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    pub created_at: String,
}

impl TryFrom<RawTaskRecord> for TaskRecord {
    type Error = ValidationError;

    fn try_from(raw: RawTaskRecord) -> Result<Self, Self::Error> {
        let status = match raw.status.as_deref() {
            Some(s) if !s.trim().is_empty() => s.parse()?,
            _ => TaskStatus::default(),
        };
        let priority = match raw.priority.as_deref() {
            Some(p) if !p.trim().is_empty() => p.parse()?,
            _ => TaskPriority::default(),
        };
        let created_at =
            parse_timestamp(&raw.created_at).ok_or_else(|| ValidationError::InvalidValue {
                field: "createdAt".to_string(),
                message: format!("cannot parse '{}' as a timestamp", raw.created_at),
            })?;
        let due_date = raw.due_date.as_deref().and_then(parse_due_date);

        let task = TaskRecord::new(raw.id, raw.title, status, priority, due_date, created_at)?
            .with_description(raw.description);
        Ok(match raw.category {
            Some(category) => task.with_category(category),
            None => task,
        })
    }
}

/// Parse a due date at day granularity.
///
/// Timestamps are reduced to their UTC calendar day. Unparsable input
/// yields `None` rather than an error.
pub fn parse_due_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Some(ts) = parse_timestamp(s) {
        return Some(ts.date_naive());
    }
    tracing::debug!(due_date = s, "ignoring malformed due date");
    None
}

/// Parse an RFC 3339 timestamp, a naive ISO timestamp (taken as UTC) or a
/// bare date (midnight UTC).
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let s = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn new_rejects_empty_title_and_id() {
        let err = TaskRecord::new("t1", "   ", TaskStatus::Pending, TaskPriority::Low, None, created())
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("title"));

        let err = TaskRecord::new("", "Write", TaskStatus::Pending, TaskPriority::Low, None, created())
            .unwrap_err();
        assert_eq!(err, ValidationError::EmptyField("id"));
    }

    #[test]
    fn new_trims_title() {
        let task =
            TaskRecord::new("t1", "  Write report ", TaskStatus::Pending, TaskPriority::Low, None, created())
                .unwrap();
        assert_eq!(task.title(), "Write report");
    }

    #[test]
    fn status_and_priority_parse() {
        assert_eq!("in-progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("DONE".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
        assert_eq!("High".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert!("urgent".parse::<TaskPriority>().is_err());
        assert!("blocked".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn priority_ordering() {
        assert!(TaskPriority::High > TaskPriority::Medium);
        assert!(TaskPriority::Medium > TaskPriority::Low);
    }

    #[test]
    fn parse_due_date_accepts_dates_and_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        assert_eq!(parse_due_date("2025-03-14"), Some(expected));
        assert_eq!(parse_due_date("2025-03-14T23:30:00Z"), Some(expected));
        assert_eq!(parse_due_date("2025-03-14T10:00:00"), Some(expected));
        // 01:00 at +02:00 is still the 13th in UTC
        assert_eq!(
            parse_due_date("2025-03-14T01:00:00+02:00"),
            NaiveDate::from_ymd_opt(2025, 3, 13)
        );
    }

    #[test]
    fn parse_due_date_ignores_garbage() {
        assert_eq!(parse_due_date("next tuesday"), None);
        assert_eq!(parse_due_date(""), None);
        assert_eq!(parse_due_date("2025-13-40"), None);
    }

    #[test]
    fn raw_record_defaults_and_malformed_due_date() {
        let json = r#"{
            "id": "a1",
            "title": "Plan sprint",
            "dueDate": "not a date",
            "createdAt": "2025-03-01T09:00:00Z"
        }"#;
        let task: TaskRecord = serde_json::from_str(json).unwrap();
        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(task.priority(), TaskPriority::Medium);
        assert_eq!(task.due_date(), None);
        assert_eq!(task.category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn category_is_kept_and_blank_resets() {
        let json = r#"{
            "id": "a1",
            "title": "Plan sprint",
            "category": " Work ",
            "createdAt": "2025-03-01T09:00:00Z"
        }"#;
        let task: TaskRecord = serde_json::from_str(json).unwrap();
        assert_eq!(task.category(), "Work");
        assert_eq!(serde_json::to_value(&task).unwrap()["category"], "Work");
        assert_eq!(task.with_category("  ").category(), DEFAULT_CATEGORY);
    }

    #[test]
    fn raw_record_rejects_unknown_status() {
        let json = r#"{
            "id": "a1",
            "title": "Plan sprint",
            "status": "archived",
            "createdAt": "2025-03-01T09:00:00Z"
        }"#;
        let err = serde_json::from_str::<TaskRecord>(json).unwrap_err();
        assert!(err.to_string().contains("archived"));
    }

    #[test]
    fn raw_record_rejects_bad_created_at() {
        let raw = RawTaskRecord {
            id: "a1".into(),
            title: "Plan".into(),
            created_at: "yesterday".into(),
            ..Default::default()
        };
        assert!(matches!(
            TaskRecord::try_from(raw),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn serializes_with_camel_case_and_plain_dates() {
        let task = TaskRecord::new(
            "a1",
            "Ship",
            TaskStatus::InProgress,
            TaskPriority::High,
            NaiveDate::from_ymd_opt(2025, 3, 14),
            created(),
        )
        .unwrap();
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["dueDate"], "2025-03-14");
        assert_eq!(value["status"], "in-progress");
        assert_eq!(value["priority"], "high");
    }

    #[test]
    fn overdue_and_days_until_due() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let task = TaskRecord::new(
            "a1",
            "Ship",
            TaskStatus::Pending,
            TaskPriority::High,
            NaiveDate::from_ymd_opt(2025, 3, 8),
            created(),
        )
        .unwrap();
        assert!(task.is_overdue(today));
        assert_eq!(task.days_until_due(today), Some(-2));

        let done = task.with_status(TaskStatus::Done);
        assert!(!done.is_overdue(today));
    }

    #[test]
    fn projection_drops_identity_and_description() {
        let task = TaskRecord::new("a1", "Ship", TaskStatus::Pending, TaskPriority::Low, None, created())
            .unwrap()
            .with_description(Some("secret notes".into()));
        let value = serde_json::to_value(task.projection()).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("description"));
        assert_eq!(obj["title"], "Ship");
    }
}
