//! Canned chat replies.
//!
//! A message is matched against a few keyword intents and answered from the
//! focus ranker or the overdue rule. There is no conversation state; the
//! optional cache only saves recomputation.

use chrono::NaiveDate;

use super::cache::{CacheKey, ResponseCache};
use super::focus::select_focus_tasks;
use crate::task::TaskRecord;

pub const CREATE_TASK_PROMPT: &str =
    "I don't see any active tasks. Create one and I'll help prioritize.";

pub const NO_OVERDUE_REPLY: &str = "You have no overdue tasks.";

pub const PLAN_REPLY: &str = "Here's a simple plan: 1) Pick your top 1-3 tasks from your priorities; \
2) Estimate time and block focused slots; 3) Break any complex task into subtasks. \
I can suggest breaking tasks if you want.";

pub const FALLBACK_REPLY: &str = "I didn't understand that. Ask about which tasks are overdue, \
what to work on today, or say 'help me plan my day'.";

/// Descriptions are cut to this many characters in task lookups.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 200;

const FOCUS_PHRASES: [&str; 5] = [
    "focus",
    "what should i work",
    "what should i do",
    "what to work",
    "work on",
];

/// What a message is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent<'a> {
    Focus,
    Overdue,
    Plan,
    /// The message names this task
    TaskLookup(&'a TaskRecord),
    Unknown,
}

/// Trim and lowercase.
pub fn normalize_message(message: &str) -> String {
    message.trim().to_lowercase()
}

/// Classify an already normalized message.
pub fn classify<'a>(normalized: &str, tasks: &'a [TaskRecord]) -> Intent<'a> {
    if FOCUS_PHRASES.iter().any(|p| normalized.contains(p)) {
        Intent::Focus
    } else if normalized.contains("overdue") {
        Intent::Overdue
    } else if normalized.contains("plan") {
        Intent::Plan
    } else if let Some(task) = tasks
        .iter()
        .find(|t| normalized.contains(&t.title().to_lowercase()))
    {
        Intent::TaskLookup(task)
    } else {
        Intent::Unknown
    }
}

/// Reply to `message` without caching.
pub fn respond(tasks: &[TaskRecord], message: &str, today: NaiveDate) -> String {
    let normalized = normalize_message(message);
    render(tasks, &normalized, today)
}

fn render(tasks: &[TaskRecord], normalized: &str, today: NaiveDate) -> String {
    match classify(normalized, tasks) {
        Intent::Focus => focus_reply(tasks, today),
        Intent::Overdue => overdue_reply(tasks, today),
        Intent::Plan => PLAN_REPLY.to_string(),
        Intent::TaskLookup(task) => task_reply(task),
        Intent::Unknown => FALLBACK_REPLY.to_string(),
    }
}

fn focus_reply(tasks: &[TaskRecord], today: NaiveDate) -> String {
    let top = select_focus_tasks(tasks, today);
    if top.is_empty() {
        return CREATE_TASK_PROMPT.to_string();
    }
    let titles = top
        .iter()
        .map(|item| format!("\"{}\"", item.title))
        .collect::<Vec<_>>()
        .join(" then ");
    let reasons = top
        .iter()
        .map(|item| item.reason.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    format!("Start with {titles}. Reason: {reasons}.")
}

fn overdue_reply(tasks: &[TaskRecord], today: NaiveDate) -> String {
    let overdue: Vec<&TaskRecord> = tasks.iter().filter(|t| t.is_overdue(today)).collect();
    if overdue.is_empty() {
        return NO_OVERDUE_REPLY.to_string();
    }
    let titles = overdue
        .iter()
        .map(|t| format!("\"{}\"", t.title()))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "There are {} overdue task(s): {titles}. Consider rescheduling or completing them.",
        overdue.len()
    )
}

fn task_reply(task: &TaskRecord) -> String {
    let details = task
        .description()
        .map(|d| d.chars().take(DESCRIPTION_PREVIEW_CHARS).collect::<String>())
        .unwrap_or_else(|| "no details".to_string());
    format!(
        "Task \"{}\" (priority: {}, status: {}): {details}.",
        task.title(),
        task.priority(),
        task.status()
    )
}

/// Intent responder with an optional reply cache.
#[derive(Debug, Default)]
pub struct IntentResponder {
    cache: Option<ResponseCache>,
}

impl IntentResponder {
    /// Responder that always computes.
    pub fn uncached() -> Self {
        Self { cache: None }
    }

    pub fn with_cache(cache: ResponseCache) -> Self {
        Self { cache: Some(cache) }
    }

    pub fn cache(&self) -> Option<&ResponseCache> {
        self.cache.as_ref()
    }

    pub fn respond(&self, tasks: &[TaskRecord], message: &str, today: NaiveDate) -> String {
        let normalized = normalize_message(message);
        let Some(cache) = &self.cache else {
            return render(tasks, &normalized, today);
        };

        let key = CacheKey::new(&normalized, tasks, today);
        if let Some(hit) = cache.get(&key) {
            tracing::debug!(message = %normalized, "reply cache hit");
            return hit;
        }
        let reply = render(tasks, &normalized, today);
        cache.insert(key, reply.clone());
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{TaskPriority, TaskStatus};
    use chrono::{Duration, TimeZone, Utc};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn task(title: &str, priority: TaskPriority, due_in: Option<i64>) -> TaskRecord {
        TaskRecord::new(
            format!("id-{title}"),
            title,
            TaskStatus::Pending,
            priority,
            due_in.map(|d| today() + Duration::days(d)),
            Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn focus_with_no_tasks_prompts_for_one() {
        assert_eq!(
            respond(&[], "What should I focus on today?", today()),
            CREATE_TASK_PROMPT
        );
    }

    #[test]
    fn focus_lists_titles_and_reasons() {
        let tasks = vec![
            task("Write tests", TaskPriority::High, None),
            task("Fix bug", TaskPriority::Low, Some(-2)),
        ];
        assert_eq!(
            respond(&tasks, "  What should I work on?  ", today()),
            "Start with \"Fix bug\" then \"Write tests\". Reason: Overdue by 2 day(s); High priority."
        );
    }

    #[test]
    fn overdue_intent() {
        let tasks = vec![
            task("A", TaskPriority::Low, Some(-1)),
            task("B", TaskPriority::Low, Some(1)),
            task("C", TaskPriority::Low, Some(-3)).with_status(TaskStatus::Done),
        ];
        assert_eq!(
            respond(&tasks, "anything OVERDUE?", today()),
            "There are 1 overdue task(s): \"A\". Consider rescheduling or completing them."
        );
        assert_eq!(respond(&[], "overdue", today()), NO_OVERDUE_REPLY);
    }

    #[test]
    fn plan_intent_is_fixed() {
        assert_eq!(respond(&[], "help me plan my day", today()), PLAN_REPLY);
    }

    #[test]
    fn title_lookup_truncates_description() {
        let long = "x".repeat(250);
        let tasks = vec![task("Quarterly Report", TaskPriority::High, None)
            .with_description(Some(long))];
        let reply = respond(&tasks, "tell me about the quarterly report", today());
        assert!(reply.starts_with("Task \"Quarterly Report\" (priority: high, status: pending): "));
        assert!(reply.contains(&"x".repeat(200)));
        assert!(!reply.contains(&"x".repeat(201)));
    }

    #[test]
    fn title_lookup_without_description() {
        let tasks = vec![task("Gym", TaskPriority::Low, None)];
        assert_eq!(
            respond(&tasks, "gym?", today()),
            "Task \"Gym\" (priority: low, status: pending): no details."
        );
    }

    #[test]
    fn unknown_falls_back() {
        assert_eq!(respond(&[], "hello there", today()), FALLBACK_REPLY);
    }

    #[test]
    fn focus_beats_overdue_keyword() {
        let normalized = normalize_message("What should I do about overdue things?");
        assert_eq!(classify(&normalized, &[]), Intent::Focus);
    }

    #[test]
    fn cached_and_uncached_agree() {
        let tasks = vec![task("Fix bug", TaskPriority::Low, Some(-2))];
        let cached = IntentResponder::with_cache(ResponseCache::default());
        let plain = IntentResponder::uncached();
        for msg in ["what should i work on", "overdue?", "plan", "fix bug", "?"] {
            let first = cached.respond(&tasks, msg, today());
            let second = cached.respond(&tasks, msg, today());
            assert_eq!(first, second);
            assert_eq!(first, plain.respond(&tasks, msg, today()));
        }
        assert_eq!(cached.cache().unwrap().len(), 5);
    }

    #[test]
    fn cache_does_not_leak_across_task_changes() {
        let responder = IntentResponder::with_cache(ResponseCache::default());
        let open = vec![task("Fix bug", TaskPriority::Low, Some(-2))];
        let closed = vec![open[0].clone().with_status(TaskStatus::Done)];
        let before = responder.respond(&open, "overdue", today());
        let after = responder.respond(&closed, "overdue", today());
        assert_ne!(before, after);
        assert_eq!(after, NO_OVERDUE_REPLY);
    }
}
