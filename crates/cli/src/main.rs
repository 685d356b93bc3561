use anyhow::Result;
use clap::{Parser, Subcommand};
use cli::commands::{self, FetchArgs, OutputArgs};
use cli::logging;
use newsgenie_core::config;
use newsgenie_core::config::AppConfig;
use newsgenie_core::pipeline;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "newsgenie")]
#[command(about = "Process and save news articles from JSON data", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a news document (file path, raw JSON, or stdin)
    Process {
        /// JSON input (file path or raw JSON string); reads stdin when omitted
        input: Option<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Fetch articles from NewsAPI, then process them
    Fetch {
        #[command(flatten)]
        query: FetchArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let cfg = match config::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("failed to load config: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = if cli.debug { "debug" } else { cfg.logging.level.as_str() };
    if let Err(e) = logging::init_logging(level, &cfg.logging.format) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }

    match run(cli.command, &cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", commands::failure_message(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, cfg: &AppConfig) -> Result<()> {
    let (outcome, opts) = match command {
        Commands::Process { input, output } => {
            let opts = output.resolve(cfg);
            (commands::run_process(input.as_deref(), &opts)?, opts)
        }
        Commands::Fetch { query, output } => {
            let opts = output.resolve(cfg);
            let source = pipeline::build_source(cfg)?;
            let query = query.to_query(cfg);
            (commands::run_fetch(source.as_ref(), &query, &opts).await?, opts)
        }
    };
    commands::report(&outcome, &opts)
}
