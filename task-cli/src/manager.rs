use crate::output::Output;
use crate::storage::{self, Storage};
use crate::task::{NewTask, Status, Task, timestamp_now};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task storage failed: {0}")]
    Storage(#[from] storage::Error),
    #[error("Cannot write output")]
    Output(#[from] std::io::Error),
}

/// Business rules for tasks, between a [`Storage`] backend and an [`Output`].
///
/// A missing task is reported through the output and is not an error for
/// the caller. Storage and output failures are propagated.
pub struct TaskManager<'a, S: Storage, O: Output> {
    storage: &'a mut S,
    output: &'a O,
}

impl<'a, S: Storage, O: Output> TaskManager<'a, S, O> {
    pub fn new(storage: &'a mut S, output: &'a O) -> Self {
        Self { storage, output }
    }

    /// Lists tasks in id order, keeping only those with exactly `status` when given.
    #[tracing::instrument(skip(self))]
    pub fn list(&mut self, status: Option<Status>) -> Result<(), Error> {
        let tasks: Vec<(u32, Task)> = self
            .storage
            .load()?
            .into_iter()
            .filter(|(_, task)| status.is_none_or(|wanted| task.status == wanted))
            .collect();
        debug!(count = tasks.len(), "Listing tasks");
        self.output.tasks_list(&tasks)?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn add(&mut self, description: String) -> Result<(), Error> {
        let (id, _) = self
            .storage
            .add(NewTask::planned(description, timestamp_now()))?;
        info!(id, "Task added");
        self.output.task_added(id)?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn update(&mut self, id: u32, description: String) -> Result<(), Error> {
        if self.modify(id, |task| task.description = description)? {
            self.output.task_updated(id)?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn change_status(&mut self, id: u32, status: Status) -> Result<(), Error> {
        if self.modify(id, |task| task.status = status)? {
            self.output.task_status_updated(id)?;
        }
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    pub fn delete(&mut self, id: u32) -> Result<(), Error> {
        let deleted = self.storage.delete_by_index(id);
        if self.recover(deleted)?.is_some() {
            info!(id, "Task deleted");
            self.output.task_deleted(id)?;
        }
        Ok(())
    }

    /// Applies `change` to a stored task and stamps its update time.
    /// Returns `false` when the task does not exist.
    fn modify(&mut self, id: u32, change: impl FnOnce(&mut Task)) -> Result<bool, Error> {
        let fetched = self.storage.get_by_index(id);
        let Some(mut task) = self.recover(fetched)? else {
            return Ok(false);
        };
        change(&mut task);
        task.touch(timestamp_now());
        let updated = self.storage.update_by_index(id, task);
        Ok(self.recover(updated)?.is_some())
    }

    /// Turns `TaskNotFound` into a message for the user.
    fn recover<T>(&self, result: Result<T, storage::Error>) -> Result<Option<T>, Error> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(storage::Error::TaskNotFound(id)) => {
                debug!(id, "Task not found");
                self.output.error_task_not_found(id.into())?;
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}
