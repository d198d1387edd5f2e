mod terminal;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use anyhow::{Context, Result};
use clap::Parser;
use ctxgen_core::AppState;
use ctxgen_logging::ctx_info;
use log::LevelFilter;

use terminal::app::{run_interactive, run_once, spawn_stdin_reader, LoopEvent, Session};
use terminal::config::{self, CliOverrides, EnvValues};
use terminal::effects::EffectRunner;
use terminal::logging::{self, LogDestination};

/// Generate a coding context file for a source repository.
#[derive(Parser, Debug)]
#[command(name = "ctxgen", version)]
struct Args {
    /// Submit this repository URL once and exit; omit for the interactive prompt.
    #[arg(long)]
    repo: Option<String>,
    /// Base endpoint of the context generation service.
    #[arg(long)]
    api_url: Option<String>,
    /// Collector URL that receives tracking events.
    #[arg(long)]
    tracking_endpoint: Option<String>,
    /// Record tracking events in the log when no collector is configured.
    #[arg(long)]
    log_tracking: bool,
    /// RON config file (defaults to ./ctxgen.ron when present).
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,
    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    logging::initialize(args.log, level);

    let file = config::load_file_config(args.config.as_deref())?;
    let cli = CliOverrides {
        api_url: args.api_url,
        tracking_endpoint: args.tracking_endpoint,
        log_tracking: args.log_tracking,
    };
    let config = config::resolve(&cli, &EnvValues::from_process(), file)?;
    ctx_info!("using context service at {}", config.api_base);

    let (tx, rx) = mpsc::channel::<LoopEvent>();
    let runner =
        EffectRunner::new(&config, tx.clone()).context("failed to start generation engine")?;
    let state = AppState::new(config.api_base.clone());

    let (session, outcome) = match args.repo {
        Some(repo_url) => {
            let mut session = Session::new(state, runner, io::stdout(), false);
            let outcome = run_once(&mut session, &rx, repo_url).map(|succeeded| {
                if succeeded {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                }
            });
            (session, outcome)
        }
        None => {
            spawn_stdin_reader(tx);
            let mut session = Session::new(state, runner, io::stdout(), true);
            let outcome = run_interactive(&mut session, &rx).map(|()| ExitCode::SUCCESS);
            (session, outcome)
        }
    };

    // The last tracking event is usually still in flight here.
    session.executor().shutdown();
    Ok(outcome?)
}
