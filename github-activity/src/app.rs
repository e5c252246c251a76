use crate::classify::summarize;
use crate::client::{self, EventSource};
use crate::output::Output;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] client::Error),
    #[error("Cannot write output")]
    Output(#[from] std::io::Error),
}

/// Wires an [`EventSource`] to an [`Output`].
pub struct AppController<'a, S: EventSource, O: Output> {
    source: &'a S,
    output: &'a O,
}

impl<'a, S: EventSource, O: Output> AppController<'a, S, O> {
    pub fn new(source: &'a S, output: &'a O) -> Self {
        Self { source, output }
    }

    /// Prints the summarized activity of `username`.
    ///
    /// A missing user or an unreachable API is reported to the user and is
    /// not an error. Any other fetch failure is returned.
    pub async fn show_activity(&self, username: &str) -> Result<(), Error> {
        let events = match self.source.fetch_events(username).await {
            Ok(events) => events,
            Err(err @ (client::Error::UserNotFound(_) | client::Error::Connectivity(_))) => {
                warn!(error = ?err, "Cannot fetch events");
                self.output.error(&err.to_string())?;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        if events.is_empty() {
            self.output.no_activity(username)?;
        } else {
            self.output.display_events(&summarize(&events))?;
        }
        Ok(())
    }
}
