//! Task management commands for CLI.

use chrono::{Local, NaiveDate, Utc};
use clap::Subcommand;
use taskmind_core::storage::InsightsFrequency;
use taskmind_core::{
    build_insights, Config, TaskDb, TaskFilter, TaskPriority, TaskRecord, TaskStatus,
};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Category (defaults to "General")
        #[arg(long)]
        category: Option<String>,
        /// Priority: low, medium or high
        #[arg(long, default_value = "medium")]
        priority: TaskPriority,
        /// Status: pending, in-progress or done
        #[arg(long, default_value = "pending")]
        status: TaskStatus,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// List tasks, newest first
    List {
        /// Filter by status
        #[arg(long)]
        status: Option<TaskStatus>,
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Get task details
    Get {
        /// Task ID
        id: String,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New status
        #[arg(long)]
        status: Option<TaskStatus>,
        /// New priority
        #[arg(long)]
        priority: Option<TaskPriority>,
        /// New due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },
    /// Mark a task as done
    Done {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = TaskDb::open()?;

    match action {
        TaskAction::Add {
            title,
            description,
            category,
            priority,
            status,
            due,
        } => {
            let task = TaskRecord::new(
                Uuid::new_v4().to_string(),
                title,
                status,
                priority,
                due,
                Utc::now(),
            )?
            .with_description(description);
            let task = match category {
                Some(category) => task.with_category(category),
                None => task,
            };
            db.create_task(&task)?;
            println!("Task created: {}", task.id());
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List {
            status,
            category,
            search,
            json,
        } => {
            let tasks = db.find_tasks(&TaskFilter {
                status,
                category,
                search,
            })?;

            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks.");
            } else {
                for task in &tasks {
                    let due = task
                        .due_date()
                        .map(|d| d.to_string())
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{}  {:<11}  {:<6}  {:<10}  {:<12}  {}",
                        task.id(),
                        task.status(),
                        task.priority(),
                        due,
                        task.category(),
                        task.title()
                    );
                }
                print_daily_summary(&db)?;
            }
        }
        TaskAction::Get { id } => {
            let task = db.get_task(&id)?.ok_or_else(|| format!("task not found: {id}"))?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Update {
            id,
            title,
            description,
            category,
            status,
            priority,
            due,
            clear_due,
        } => {
            let mut task = db.get_task(&id)?.ok_or_else(|| format!("task not found: {id}"))?;
            if let Some(title) = title {
                task = task.with_title(title)?;
            }
            if description.is_some() {
                task = task.with_description(description);
            }
            if let Some(category) = category {
                task = task.with_category(category);
            }
            if let Some(status) = status {
                task = task.with_status(status);
            }
            if let Some(priority) = priority {
                task = task.with_priority(priority);
            }
            if clear_due {
                task = task.with_due_date(None);
            } else if due.is_some() {
                task = task.with_due_date(due);
            }
            db.update_task(&task)?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Done { id } => {
            let task = db
                .get_task(&id)?
                .ok_or_else(|| format!("task not found: {id}"))?
                .with_status(TaskStatus::Done);
            db.update_task(&task)?;
            println!("Task completed: {}", task.title());
        }
        TaskAction::Delete { id } => {
            if !db.delete_task(&id)? {
                return Err(format!("task not found: {id}").into());
            }
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}

/// With daily insights enabled, the plain listing ends with the summary line
/// for all stored tasks, whatever filter the listing used.
fn print_daily_summary(db: &TaskDb) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    if config.assistant.enabled && config.assistant.insights_frequency == InsightsFrequency::Daily {
        let insights = build_insights(&db.list_tasks()?, Local::now().date_naive());
        println!();
        println!("{}", insights.summary);
    }
    Ok(())
}
