use clap::Parser;
use task_cli::cli::{Cli, run};
use task_cli::config::{Config, StorageKind};
use task_cli::output::{CliOutput, Output};
use task_cli::storage::{InMemoryStorage, JsonFileStorage};
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log_level())
        .init();

    let storage_type = args.storage.unwrap_or(config.storage);
    let output = CliOutput::new(std::io::stdout());

    match storage_type.parse::<StorageKind>() {
        Ok(StorageKind::Json) => {
            let path = args.file.unwrap_or(config.file);
            debug!(path = %path.display(), "Using JSON task store");
            run(args.command, &mut JsonFileStorage::new(path), &output)?;
        }
        Ok(StorageKind::Memory) => {
            run(args.command, &mut InMemoryStorage::new(), &output)?;
        }
        Err(err) => output.error_storage_type(&err.0)?,
    }

    Ok(())
}
