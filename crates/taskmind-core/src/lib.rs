//! # TaskMind Core Library
//!
//! Task records, their SQLite storage and the rule-based assistant that
//! reads them. The assistant is deterministic: given the same tasks and the
//! same reference date it returns the same focus list, risk result and
//! replies. The CLI binary is a thin layer over this crate.
//!
//! ## Key Components
//!
//! - [`TaskRecord`]: validated, read-only task snapshot
//! - [`assist`]: focus ranking, deadline risk, insights, chat replies
//! - [`TaskDb`]: SQLite task persistence
//! - [`Config`]: TOML configuration

pub mod assist;
pub mod error;
pub mod storage;
pub mod task;

pub use assist::{
    analyze_deadline_risk, build_insights, select_focus_tasks, weekly_summary, weekly_summary_in,
    Advisor, DeadlineWarning, ExternalAdvisor, FallbackAdvisor, FocusItem, FocusReason,
    InsightResult, IntentResponder, ResponseCache, RiskLevel, RiskResult, RuleAdvisor,
    TextBackend, WarningKind, WeeklySummary,
};
pub use error::{AdvisorError, ConfigError, CoreError, DatabaseError, ValidationError};
pub use storage::{Config, TaskDb, TaskFilter};
pub use task::{
    RawTaskRecord, TaskPriority, TaskProjection, TaskRecord, TaskStatus, DEFAULT_CATEGORY,
};
