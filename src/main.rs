use clap::{Parser, Subcommand};
use pastevault::commands;
use pastevault::config::Config;
use pastevault::App;

#[derive(Parser)]
#[command(name = "pastevault", about = "Paste and file sharing service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve,
    /// Delete expired pastes, files, and sessions, then exit.
    PurgeExpired,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // try to load .env, ignoring any errors
    _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let app = App::new(config).await?;

    match cli.command {
        Command::Serve => commands::serve::run(app).await,
        Command::PurgeExpired => commands::purge_expired::run(app).await,
    }
}
