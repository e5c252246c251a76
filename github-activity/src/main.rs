use clap::Parser;
use github_activity::app::AppController;
use github_activity::client::GithubClient;
use github_activity::config::Config;
use github_activity::output::CliOutput;

/// List a GitHub user's latest activity
#[derive(Parser, Debug)]
#[command(name = "github-activity", version)]
struct Cli {
    username: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = Config::from_env()?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.log_level())
        .init();

    let client = GithubClient::new(config.api_url, config.user_agent);
    let output = CliOutput::new(std::io::stdout());
    AppController::new(&client, &output)
        .show_activity(&args.username)
        .await?;
    Ok(())
}
