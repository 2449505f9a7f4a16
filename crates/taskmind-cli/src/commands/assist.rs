//! Assistant commands: focus list, deadline risk, insights, questions.

use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use serde::Serialize;

use taskmind_core::storage::ResponseStyle;
use taskmind_core::{
    analyze_deadline_risk, select_focus_tasks, weekly_summary_in, Config, FallbackAdvisor, TaskDb,
};

#[derive(Args, Clone, Copy)]
pub struct CommonArgs {
    /// Reference date (YYYY-MM-DD), defaults to today in the local time zone
    #[arg(long)]
    today: Option<NaiveDate>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

impl CommonArgs {
    fn date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Subcommand)]
pub enum AssistAction {
    /// Up to three tasks to focus on
    Focus {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Deadline risk warnings
    Risk {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Daily summary, focus list and tip
    Insights {
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Ask a question about your tasks
    Ask {
        /// e.g. "what should I work on?", "anything overdue?", "help me plan my day"
        message: String,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Recap of the last seven days
    Weekly {
        #[command(flatten)]
        common: CommonArgs,
    },
}

pub fn run(action: AssistAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    if !config.assistant.enabled {
        println!("Assistant is disabled. Enable it with: taskmind-cli config set assistant.enabled true");
        return Ok(());
    }
    let detailed = config.assistant.response_style == ResponseStyle::Detailed;

    let tasks = TaskDb::open()?.list_tasks()?;
    tracing::debug!(tasks = tasks.len(), "loaded tasks");
    let advisor = FallbackAdvisor::rules_only(config.rule_advisor());

    match action {
        AssistAction::Focus { common } => {
            let focus = select_focus_tasks(&tasks, common.date());
            if common.json {
                return print_json(&focus);
            }
            if focus.is_empty() {
                println!("No active tasks. Create one with: taskmind-cli task add <title>");
            }
            for (i, item) in focus.iter().enumerate() {
                println!("{}. {} ({})", i + 1, item.title, item.reason);
            }
        }
        AssistAction::Risk { common } => {
            let risk = analyze_deadline_risk(&tasks, common.date());
            if common.json {
                return print_json(&risk);
            }
            println!("Overall risk: {}", risk.overall_risk);
            for warning in &risk.warnings {
                println!("  - {}", warning.message);
                if detailed {
                    println!("    {}", warning.reason);
                }
            }
            if let Some(note) = &risk.note {
                println!("{note}");
            }
        }
        AssistAction::Insights { common } => {
            let insights = advisor.insights(&tasks, common.date());
            if common.json {
                return print_json(&insights);
            }
            println!("{}", insights.summary);
            for item in &insights.focus_tasks {
                if detailed {
                    println!("  * {} ({})", item.title, item.reason);
                } else {
                    println!("  * {}", item.title);
                }
            }
            for warning in &insights.warnings {
                println!("  ! {warning}");
            }
            println!("Tip: {}", insights.productivity_tip);
        }
        AssistAction::Ask { message, common } => {
            let reply = advisor.reply(&tasks, &message, common.date());
            if common.json {
                return print_json(&serde_json::json!({ "reply": reply }));
            }
            println!("{reply}");
        }
        AssistAction::Weekly { common } => {
            // creation times are read in the same local zone as the reference date
            let recap = weekly_summary_in(&tasks, common.date(), &Local);
            if common.json {
                return print_json(&recap);
            }
            println!("{}", recap.summary);
            for highlight in &recap.highlights {
                println!("  + {highlight}");
            }
            println!("{}", recap.suggestion);
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
