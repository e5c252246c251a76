use crate::classify::Summary;
use mockall::automock;
use std::cell::RefCell;
use std::io::Write;

#[automock]
pub trait Output {
    fn display_events(&self, summaries: &[Summary]) -> std::io::Result<()>;
    fn no_activity(&self, username: &str) -> std::io::Result<()>;
    fn error(&self, message: &str) -> std::io::Result<()>;
}

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
}

impl<W: Write> Output for CliOutput<W> {
    fn display_events(&self, summaries: &[Summary]) -> std::io::Result<()> {
        let mut writer = self.writer.borrow_mut();
        for summary in summaries {
            writeln!(writer, "{}", summary)?;
        }
        Ok(())
    }

    fn no_activity(&self, username: &str) -> std::io::Result<()> {
        writeln!(self.writer.borrow_mut(), "No recent activity for {}", username)
    }

    fn error(&self, message: &str) -> std::io::Result<()> {
        writeln!(self.writer.borrow_mut(), "{}", message)
    }
}
