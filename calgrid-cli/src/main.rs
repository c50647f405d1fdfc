mod commands;
mod logging;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use calgrid_core::DateKey;
use calgrid_core::config::{CalGridConfig, SourceKind};
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

#[derive(Parser)]
#[command(name = "calgrid")]
#[command(about = "Month-view calendar with event dots and day details")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Where events come from: sample, file, remote or stdin
    #[arg(long, global = true)]
    source: Option<SourceKind>,

    /// Events file (implies --source file)
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Events endpoint (implies --source remote)
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid (the default command)
    Show {
        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,

        /// Day to select and list (YYYY-MM-DD)
        #[arg(short, long)]
        select: Option<String>,

        /// Print the grid as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the events of one day
    Day {
        /// Day to list (YYYY-MM-DD)
        date: String,

        /// Print the day as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse months interactively
    Browse,
    /// Redraw the month whenever pushed events arrive (stdin source)
    Watch,
    /// Show configuration paths and settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = resolve_config(&cli)?;

    match cli.command.unwrap_or(Commands::Show {
        month: None,
        select: None,
        json: false,
    }) {
        Commands::Show { month, select, json } => {
            let month = month.as_deref().map(commands::parse_month).transpose()?;
            let select = select.as_deref().map(str::parse::<DateKey>).transpose()?;
            commands::show::run(&config, month, select, json).await
        }
        Commands::Day { date, json } => {
            let key: DateKey = date.parse()?;
            commands::day::run(&config, key, json).await
        }
        Commands::Browse => commands::browse::run(&config).await,
        Commands::Watch => commands::watch::run(&config).await,
        Commands::Config => commands::config::run(&config),
    }
}

/// Load the config file and apply command line overrides.
fn resolve_config(cli: &Cli) -> Result<CalGridConfig> {
    let mut config = CalGridConfig::load()?;

    if let Some(file) = &cli.file {
        config.events_file = Some(file.clone());
        config.source = SourceKind::File;
    }
    if let Some(url) = &cli.url {
        config.remote_url = Some(url.clone());
        config.source = SourceKind::Remote;
    }
    if let Some(source) = cli.source {
        config.source = source;
    }

    debug!(source = %config.source, week_start = ?config.week_start, "Resolved configuration");
    Ok(config)
}
