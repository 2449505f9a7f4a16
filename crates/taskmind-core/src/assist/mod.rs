//! Rule-based assistant.
//!
//! Everything here is a pure function of a task slice and a reference date:
//!
//! - [`select_focus_tasks`]: up to three tasks to work on next
//! - [`analyze_deadline_risk`]: bounded deadline warnings and a risk tier
//! - [`build_insights`]: summary, focus list, warnings and a tip
//! - [`IntentResponder`]: canned answers to a few chat questions
//! - [`weekly_summary`]: recap of the last seven days
//!
//! None of these functions mutate tasks or touch the network.

mod advisor;
mod cache;
mod focus;
mod insights;
mod intent;
mod narrative;
mod risk;
mod weekly;

pub use advisor::{Advisor, ExternalAdvisor, FallbackAdvisor, RuleAdvisor, TextBackend};
pub use cache::{CacheKey, ResponseCache, DEFAULT_CAPACITY, DEFAULT_TTL};
pub use focus::{select_focus_tasks, FocusItem, FocusReason, MAX_FOCUS_ITEMS};
pub use insights::{build_insights, InsightResult};
pub use intent::{
    classify, normalize_message, respond, Intent, IntentResponder, CREATE_TASK_PROMPT,
    FALLBACK_REPLY, NO_OVERDUE_REPLY, PLAN_REPLY,
};
pub use narrative::{build_summary, build_tip, build_warnings, TaskCounts};
pub use risk::{
    analyze_deadline_risk, DeadlineWarning, RiskCounts, RiskLevel, RiskResult, WarningKind,
    MAX_WARNINGS, RISK_NOTE,
};
pub use weekly::{weekly_summary, weekly_summary_in, WeeklySummary};
