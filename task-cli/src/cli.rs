use crate::manager::{Error, TaskManager};
use crate::output::Output;
use crate::storage::Storage;
use crate::task::Status;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// A simple TODO list.
#[derive(Parser, Debug)]
#[command(name = "task-cli", version)]
pub struct Cli {
    /// Storage backend: "json" or "memory"
    #[arg(long, global = true)]
    pub storage: Option<String>,
    /// Path of the JSON task store
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// List tasks, optionally only those with a status (done, todo, in-progress)
    List { status: Option<String> },
    /// Create task
    Add { description: String },
    /// Update task description
    Update {
        #[arg(allow_hyphen_values = true)]
        index: String,
        description: String,
    },
    /// Mark task as planned
    MarkTodo {
        #[arg(allow_hyphen_values = true)]
        index: String,
    },
    /// Mark task as in progress
    MarkInProgress {
        #[arg(allow_hyphen_values = true)]
        index: String,
    },
    /// Mark task as done
    MarkDone {
        #[arg(allow_hyphen_values = true)]
        index: String,
    },
    /// Delete task
    Delete {
        #[arg(allow_hyphen_values = true)]
        index: String,
    },
}

/// Runs one command against the given storage, reporting through `output`.
///
/// Malformed indexes and status keys are reported to the user.
pub fn run<S: Storage, O: Output>(
    command: Commands,
    storage: &mut S,
    output: &O,
) -> Result<(), Error> {
    let mut manager = TaskManager::new(storage, output);
    match command {
        Commands::List { status } => match status.as_deref().map(str::parse::<Status>).transpose() {
            Ok(status) => manager.list(status),
            Err(err) => Ok(output.error(&err.to_string())?),
        },
        Commands::Add { description } => manager.add(description),
        Commands::Update { index, description } => {
            with_index(output, &index, |id| manager.update(id, description))
        }
        Commands::MarkTodo { index } => {
            with_index(output, &index, |id| manager.change_status(id, Status::Planned))
        }
        Commands::MarkInProgress { index } => {
            with_index(output, &index, |id| manager.change_status(id, Status::InProgress))
        }
        Commands::MarkDone { index } => {
            with_index(output, &index, |id| manager.change_status(id, Status::Done))
        }
        Commands::Delete { index } => with_index(output, &index, |id| manager.delete(id)),
    }
}

fn with_index<O: Output>(
    output: &O,
    index: &str,
    action: impl FnOnce(u32) -> Result<(), Error>,
) -> Result<(), Error> {
    // Integers no task can have, negative ones included, are simply not found.
    match index.parse::<i64>() {
        Ok(id) => match u32::try_from(id) {
            Ok(id) => action(id),
            Err(_) => Ok(output.error_task_not_found(id)?),
        },
        Err(_) => Ok(output.error_index_type(index)?),
    }
}
