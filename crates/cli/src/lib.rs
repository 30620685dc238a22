pub mod commands;
pub mod logging;

use advisor_core::config::{AppConfig, LoadOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::commands::CommandResult;

#[derive(Debug, Parser)]
#[command(
    name = "advisor",
    about = "Portfolio recommendation bot fulfillment host",
    long_about = "Run dialog turns for the RecommendPortfolio intent, check slot values, and inspect configuration.",
    after_help = "Examples:\n  advisor invoke --event turn.json\n  cat turn.json | advisor invoke\n  advisor validate --age 70\n  advisor config"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Path to an advisor.toml config file")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Handle one intent request event and print the dialog response")]
    Invoke {
        #[arg(long, default_value = "-", help = "Event JSON file, or `-` for stdin")]
        event: String,
        #[arg(long, help = "Correlation id for log lines (random when omitted)")]
        correlation_id: Option<String>,
    },
    #[command(about = "Check slot values with the dialog validator")]
    Validate {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        investment_amount: Option<String>,
        #[arg(long)]
        risk_level: Option<String>,
    },
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match AppConfig::load(LoadOptions {
        config_path: cli.config.clone(),
        require_file: cli.config.is_some(),
        ..LoadOptions::default()
    }) {
        Ok(config) => {
            logging::init(&config.logging);
            execute(cli, &config)
        }
        Err(error) => CommandResult::failure(
            "config",
            "config_validation",
            format!("configuration failed to load: {error}"),
            commands::EXIT_CONFIG,
        ),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

fn execute(cli: Cli, config: &AppConfig) -> CommandResult {
    match cli.command {
        Command::Invoke { event, correlation_id } => {
            commands::invoke::run(&event, correlation_id, config)
        }
        Command::Validate { first_name, age, investment_amount, risk_level } => {
            commands::validate::run(
                commands::validate::SlotArgs { first_name, age, investment_amount, risk_level },
                config,
            )
        }
        Command::Config => CommandResult {
            exit_code: 0,
            output: commands::config::run(config, cli.config.as_deref()),
        },
    }
}
