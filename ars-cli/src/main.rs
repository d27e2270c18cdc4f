//! Airsense CLI - Command line tool for querying the backend API.

use clap::Parser;

#[derive(Parser)]
#[command(name = "ars-cli", version, about = "Airsense air-quality data toolkit")]
struct Cli {
    /// Backend base URL
    #[arg(
        long,
        env = "AIRSENSE_API_URL",
        default_value = "https://airsense-v2.onrender.com/api"
    )]
    base_url: String,

    #[command(subcommand)]
    command: ars_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    ars_cmd::run(&cli.base_url, cli.command).await
}
