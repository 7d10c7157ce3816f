use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod bot;
mod chat;

#[derive(Parser)]
#[command(
    name = "chainchat",
    version,
    about = "Chat front-ends for the Crypto.com AI agent service"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal chat with the agent service
    Chat,
    /// Run the Telegram bot
    Bot,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Chat => chat::run().await,
        Commands::Bot => bot::run().await,
    }
}
