//! Advisor capability.
//!
//! [`Advisor`] has two implementations. [`RuleAdvisor`] is deterministic and
//! cannot fail. [`ExternalAdvisor`] wraps a [`TextBackend`] such as a hosted
//! language model; the backend only ever sees [`TaskProjection`]s (title,
//! status, priority, due date). A [`FallbackAdvisor`] asks the external
//! advisor first and replaces any error with the rule-based answer.

use chrono::NaiveDate;

use super::insights::{build_insights, InsightResult};
use super::intent::IntentResponder;
use crate::error::AdvisorError;
use crate::task::{TaskProjection, TaskRecord};

/// A source of insights and chat replies.
pub trait Advisor: Send + Sync {
    /// Short identifier used in logs (e.g. "rules").
    fn name(&self) -> &str;

    fn insights(&self, tasks: &[TaskRecord], today: NaiveDate)
        -> Result<InsightResult, AdvisorError>;

    fn reply(
        &self,
        tasks: &[TaskRecord],
        message: &str,
        today: NaiveDate,
    ) -> Result<String, AdvisorError>;
}

/// Out-of-process text generation. Implementations receive projections only.
pub trait TextBackend: Send + Sync {
    fn name(&self) -> &str;

    fn insights(
        &self,
        tasks: &[TaskProjection],
        today: NaiveDate,
    ) -> Result<InsightResult, AdvisorError>;

    fn reply(
        &self,
        tasks: &[TaskProjection],
        message: &str,
        today: NaiveDate,
    ) -> Result<String, AdvisorError>;
}

/// Deterministic advisor backed by the ranker and the intent responder.
#[derive(Debug, Default)]
pub struct RuleAdvisor {
    responder: IntentResponder,
}

impl RuleAdvisor {
    pub fn new(responder: IntentResponder) -> Self {
        Self { responder }
    }

    pub fn responder(&self) -> &IntentResponder {
        &self.responder
    }
}

impl Advisor for RuleAdvisor {
    fn name(&self) -> &str {
        "rules"
    }

    fn insights(
        &self,
        tasks: &[TaskRecord],
        today: NaiveDate,
    ) -> Result<InsightResult, AdvisorError> {
        Ok(build_insights(tasks, today))
    }

    fn reply(
        &self,
        tasks: &[TaskRecord],
        message: &str,
        today: NaiveDate,
    ) -> Result<String, AdvisorError> {
        Ok(self.responder.respond(tasks, message, today))
    }
}

/// Advisor that projects tasks and forwards them to a [`TextBackend`].
pub struct ExternalAdvisor {
    backend: Box<dyn TextBackend>,
}

impl ExternalAdvisor {
    pub fn new(backend: Box<dyn TextBackend>) -> Self {
        Self { backend }
    }
}

impl Advisor for ExternalAdvisor {
    fn name(&self) -> &str {
        self.backend.name()
    }

    fn insights(
        &self,
        tasks: &[TaskRecord],
        today: NaiveDate,
    ) -> Result<InsightResult, AdvisorError> {
        self.backend.insights(&project(tasks), today)
    }

    fn reply(
        &self,
        tasks: &[TaskRecord],
        message: &str,
        today: NaiveDate,
    ) -> Result<String, AdvisorError> {
        self.backend.reply(&project(tasks), message, today)
    }
}

fn project(tasks: &[TaskRecord]) -> Vec<TaskProjection> {
    tasks.iter().map(TaskRecord::projection).collect()
}

/// Tries the external advisor first and substitutes the rule-based answer on
/// failure.
pub struct FallbackAdvisor {
    primary: Option<ExternalAdvisor>,
    rules: RuleAdvisor,
}

impl FallbackAdvisor {
    pub fn new(backend: Option<Box<dyn TextBackend>>, rules: RuleAdvisor) -> Self {
        Self {
            primary: backend.map(ExternalAdvisor::new),
            rules,
        }
    }

    /// No external backend; answers come straight from the rules.
    pub fn rules_only(rules: RuleAdvisor) -> Self {
        Self::new(None, rules)
    }

    pub fn insights(&self, tasks: &[TaskRecord], today: NaiveDate) -> InsightResult {
        if let Some(primary) = &self.primary {
            match primary.insights(tasks, today) {
                Ok(result) => return result,
                Err(e) => {
                    tracing::warn!(advisor = primary.name(), error = %e, "insights failed, using rules");
                }
            }
        }
        build_insights(tasks, today)
    }

    pub fn reply(&self, tasks: &[TaskRecord], message: &str, today: NaiveDate) -> String {
        if let Some(primary) = &self.primary {
            match primary.reply(tasks, message, today) {
                Ok(reply) => return reply,
                Err(e) => {
                    tracing::warn!(advisor = primary.name(), error = %e, "reply failed, using rules");
                }
            }
        }
        self.rules.responder().respond(tasks, message, today)
    }
}
