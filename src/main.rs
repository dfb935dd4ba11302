//! Curriculum CLI entry point.

use anyhow::Result;
use clap::Parser;

use behavior_curriculum::cli::{commands, Cli, Commands};
use behavior_curriculum::infrastructure::config::ConfigLoader;
use behavior_curriculum::infrastructure::logging::{LogConfig, LoggerImpl};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        behavior_curriculum::cli::handle_error(&err, json);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    let _logger = LoggerImpl::init(&LogConfig::try_from(&config.logging)?)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args, &config.run, cli.json).await,
        Commands::Version => commands::version::execute(cli.json),
        Commands::DslVersion => commands::version::execute_dsl(cli.json),
    }
}
