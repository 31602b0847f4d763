use chrono::{DateTime, Utc};
use clap::Subcommand;
use studybuddy_core::{Command, Task};

use super::{open_session, report_persist, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a new task
    Add {
        /// Task title
        title: String,
        /// Due time (RFC 3339, e.g. 2024-11-02T09:00:00Z)
        #[arg(long)]
        due: DateTime<Utc>,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Reminder lead time in minutes (default from profile)
        #[arg(long)]
        reminder: Option<u32>,
    },
    /// List tasks
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let mut session = open_session()?;
    match action {
        TaskAction::Add {
            title,
            due,
            description,
            reminder,
        } => {
            let reminder = reminder.unwrap_or_else(|| session.state().profile().default_reminder_minutes());
            let mut task = Task::new(title, due, reminder);
            task.description = description;
            let id = task.id.clone();
            let dispatched = session.dispatch(Command::AddTask { task })?;
            report_persist(&dispatched);
            println!("{id}");
        }
        TaskAction::List { all, json } => {
            let tasks: Vec<&Task> = session
                .state()
                .tasks
                .iter()
                .filter(|t| all || !t.completed)
                .collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks.");
            } else {
                for task in tasks {
                    let mark = if task.completed { "[x]" } else { "[ ]" };
                    println!(
                        "{mark} {}  {}  due {}",
                        task.id,
                        task.title,
                        task.due_date.format("%Y-%m-%d %H:%M")
                    );
                }
            }
        }
        TaskAction::Complete { id } => {
            let dispatched = session.dispatch(Command::CompleteTask { id: id.clone() })?;
            report_persist(&dispatched);
            println!("Task completed: {id}");
        }
        TaskAction::Delete { id } => {
            let dispatched = session.dispatch(Command::DeleteTask { id: id.clone() })?;
            report_persist(&dispatched);
            println!("Task deleted: {id}");
        }
    }
    Ok(())
}
