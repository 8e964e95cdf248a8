//! `userapi` - CLI for the user CRUD service
//!
//! This binary runs the HTTP server and provides configuration inspection
//! commands.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use userapi::cli::{Cli, Command, ConfigCommand, ServeCommand};
use userapi::{init_logging, server, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(cli.config, &serve_cmd).await,
        Command::Config(config_cmd) => handle_config(cli.config, config_cmd),
    }
}

async fn handle_serve(config_path: Option<PathBuf>, cmd: &ServeCommand) -> anyhow::Result<()> {
    let mut config = Config::load_from(config_path).context("loading configuration")?;
    cmd.apply(&mut config);
    config.validate()?;

    server::run(&config).await?;
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Host:               {}", config.server.host);
                println!("  Port:               {}", config.server.port);
                println!("  Docs:               {}", config.server.docs);
                println!();
                println!("[Store]");
                println!("  Seed users:         {}", config.store.seed);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
