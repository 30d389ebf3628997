use clap::Parser;
use testero_content_api::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::ContentCheck => cli::content_check::run().await,
    }
}
