mod cli;
mod logging;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use rill_core::{
    EntrySource, Layout, Session,
    config::{self, Config},
    source::json::JsonFileSource,
};
use rill_tui::{Theme, TuiHost};
use std::{path::PathBuf, process::ExitCode, sync::Arc, time::Duration};

#[derive(Parser)]
#[command(version, about = "Grouped terminal list browser")]
struct Cli {
    /// Override path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level written to ~/.cache/rill/rill.log
    #[arg(long, default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the projected list once and exit
    List {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json_errors = matches!(cli.command, Some(Commands::List { json: true }));

    if let Err(error) = logging::setup_logging(cli.log_level) {
        eprintln!("Warning: logging disabled: {error:#}");
    }

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            let cli_error = cli::CliError::system(format!("{error:#}"));
            cli::print_error(&cli_error, json_errors);
            return ExitCode::from(2);
        }
    };

    let result = match cli.command {
        Some(Commands::List { json }) => cli::cmd_list(&config, json),
        None => run_tui(&config).map_err(cli::CliError::from),
    };

    match result {
        Ok(()) => ExitCode::from(0),
        Err(error) => {
            log::error!("{error}");
            cli::print_error(&error, json_errors);
            ExitCode::from(u8::try_from(error.code()).unwrap_or(2))
        }
    }
}

fn run_tui(config: &Config) -> Result<()> {
    let source: Arc<dyn EntrySource> = Arc::new(JsonFileSource::new(config.resolved_feed()?));
    // Load before taking over the terminal so a bad feed is reported plainly
    let entries = source.load()?;

    let mut session = Session::start(
        TuiHost::default(),
        config.build_groups(),
        Layout::default(),
        config.filter_cycle(),
        entries,
    );
    let theme = Theme::from_config(&config.theme);

    let mut terminal = ratatui::init();
    let result = rill_tui::run(
        &mut terminal,
        &mut session,
        &source,
        &theme,
        &config.keys,
        config.columns(),
        Duration::from_secs(config.refresh_secs),
    );
    ratatui::restore();
    result
}
