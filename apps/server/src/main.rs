mod cli;
mod command;
mod config;
mod error;

use error::WrapErr;

use clap::CommandFactory;
use clap::Parser;

#[tokio::main]
async fn main() -> error::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt::init();

    let cfg = config::Config::load().context("Load configuration error")?;
    let command_line = cli::Cli::parse();

    if let Some(command) = command_line.command {
        let cmd: Box<dyn command::Command> = match command {
            cli::Commands::Serve => Box::new(command::ServeCommand::new(cfg)),
            cli::Commands::Ingest { path } => Box::new(command::IngestCommand::new(cfg, path)),
            cli::Commands::ClearCache => Box::new(command::ClearCacheCommand::new(cfg)),
        };
        cmd.execute().await?;
    } else {
        cli::Cli::command().print_help()?;
    }

    Ok(())
}
