#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use run_info::config::{Config, Overrides};
use run_info::show_cmd;

#[derive(Parser, Debug)]
#[command(name = "show-run-info")]
#[command(about = "Summarize the most recent runs recorded in the DAQInterface log", long_about = None)]
struct Cli {
    /// Number of runs to show, counting back from the most recent
    #[arg(default_value_t = 1)]
    runs: usize,

    /// Log file to scan
    #[arg(long)]
    log: Option<PathBuf>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bytes read per backward step
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Skip marker lines that lack a timestamp or run number instead of failing
    #[arg(long)]
    lenient: bool,

    /// Print each run block's original lines instead of the summary
    #[arg(long)]
    raw: bool,

    /// Time zone label printed next to each timestamp
    #[arg(long)]
    zone_label: Option<String>,

    /// Enable verbose logging (or set RUN_INFO_LOG)
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("RUN_INFO_LOG").unwrap_or_else(|_| {
        if verbose { "run_info=debug".to_string() } else { "run_info=warn".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let overrides = Overrides {
        log_path: cli.log,
        chunk_size: cli.chunk_size,
        lenient: cli.lenient,
        zone_label: cli.zone_label,
    };
    let cfg = Config::resolve(cli.config.as_deref(), overrides).context("loading configuration")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    show_cmd::run(&cfg, cli.runs, cli.raw, &mut out)
        .with_context(|| format!("summarizing runs from {}", cfg.log_path.display()))?;
    Ok(())
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
