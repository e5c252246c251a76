use crate::task::Task;
use mockall::automock;
use std::cell::RefCell;
use std::io::Write;

/// Presentation side of the task manager.
///
/// Every method renders a complete user-facing message.
#[automock]
pub trait Output {
    fn tasks_list(&self, tasks: &[(u32, Task)]) -> std::io::Result<()>;
    fn task_added(&self, id: u32) -> std::io::Result<()>;
    fn task_updated(&self, id: u32) -> std::io::Result<()>;
    fn task_status_updated(&self, id: u32) -> std::io::Result<()>;
    fn task_deleted(&self, id: u32) -> std::io::Result<()>;
    /// `id` may lie outside the range of stored ids, e.g. a negative index.
    fn error_task_not_found(&self, id: i64) -> std::io::Result<()>;
    fn error_index_type(&self, index: &str) -> std::io::Result<()>;
    fn error_storage_type(&self, storage_type: &str) -> std::io::Result<()>;
    fn error(&self, text: &str) -> std::io::Result<()>;
}

/// Line oriented output for terminals.
pub struct CliOutput<W: Write> {
    writer: RefCell<W>,
}

impl<W: Write> CliOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: RefCell::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn line(&self, text: &str) -> std::io::Result<()> {
        writeln!(self.writer.borrow_mut(), "{}", text)
    }
}

impl<W: Write> Output for CliOutput<W> {
    fn tasks_list(&self, tasks: &[(u32, Task)]) -> std::io::Result<()> {
        let mut writer = self.writer.borrow_mut();
        for (id, task) in tasks {
            writeln!(writer, "{} - {} - {}", id, task.status, task.description)?;
        }
        Ok(())
    }

    fn task_added(&self, id: u32) -> std::io::Result<()> {
        self.line(&format!("Task added successfully (ID: {})", id))
    }

    fn task_updated(&self, id: u32) -> std::io::Result<()> {
        self.line(&format!("Task updated successfully (ID: {})", id))
    }

    fn task_status_updated(&self, id: u32) -> std::io::Result<()> {
        self.line(&format!("Task status updated successfully (ID: {})", id))
    }

    fn task_deleted(&self, id: u32) -> std::io::Result<()> {
        self.line(&format!("Task deleted successfully (ID: {})", id))
    }

    fn error_task_not_found(&self, id: i64) -> std::io::Result<()> {
        self.error(&format!("Task \"{}\" not found.", id))
    }

    fn error_index_type(&self, index: &str) -> std::io::Result<()> {
        self.error(&format!(
            "Index must be an integer. Received \"{}\" instead.",
            index
        ))
    }

    fn error_storage_type(&self, storage_type: &str) -> std::io::Result<()> {
        self.error(&format!("Unknown storage type {}", storage_type))
    }

    fn error(&self, text: &str) -> std::io::Result<()> {
        self.line(&format!("Error: {}", text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{NewTask, Status, timestamp_now};

    fn rendered(render: impl FnOnce(&CliOutput<Vec<u8>>) -> std::io::Result<()>) -> String {
        let output = CliOutput::new(Vec::new());
        render(&output).unwrap();
        String::from_utf8(output.into_inner()).unwrap()
    }

    #[test]
    fn tasks_list_renders_one_line_per_task() {
        let mut done = NewTask::planned("Buy milk".to_string(), timestamp_now()).with_id(1);
        done.status = Status::Done;
        let mut started = NewTask::planned("Walk dog".to_string(), timestamp_now()).with_id(3);
        started.status = Status::InProgress;
        let planned = NewTask::planned("Read book".to_string(), timestamp_now()).with_id(4);

        let text = rendered(|o| o.tasks_list(&[(1, done), (3, started), (4, planned)]));

        assert_eq!(
            text,
            "1 - Done - Buy milk\n3 - In progress - Walk dog\n4 - Planned - Read book\n"
        );
    }

    #[test]
    fn empty_list_prints_nothing() {
        assert_eq!(rendered(|o| o.tasks_list(&[])), "");
    }

    #[test]
    fn success_messages_include_the_id() {
        assert_eq!(rendered(|o| o.task_added(2)), "Task added successfully (ID: 2)\n");
        assert_eq!(rendered(|o| o.task_updated(2)), "Task updated successfully (ID: 2)\n");
        assert_eq!(
            rendered(|o| o.task_status_updated(2)),
            "Task status updated successfully (ID: 2)\n"
        );
        assert_eq!(rendered(|o| o.task_deleted(2)), "Task deleted successfully (ID: 2)\n");
    }

    #[test]
    fn errors_are_prefixed() {
        assert_eq!(rendered(|o| o.error_task_not_found(9)), "Error: Task \"9\" not found.\n");
        assert_eq!(rendered(|o| o.error_task_not_found(-1)), "Error: Task \"-1\" not found.\n");
        assert_eq!(
            rendered(|o| o.error_index_type("abc")),
            "Error: Index must be an integer. Received \"abc\" instead.\n"
        );
        assert_eq!(
            rendered(|o| o.error_storage_type("sqlite")),
            "Error: Unknown storage type sqlite\n"
        );
    }
}
