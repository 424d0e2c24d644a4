//! rule-reviewer-mcp: MCP server that serves a rule review prompt
//!
//! Speaks newline-delimited JSON-RPC on stdin/stdout. Diagnostics go to
//! stderr.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use rule_reviewer_mcp::config;
use rule_reviewer_mcp::mcp::server::McpServer;

/// MCP server that hands AI assistants a structured prompt for reviewing
/// a project's coding rules.
#[derive(Parser, Debug)]
#[command(name = "rule-reviewer-mcp")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease logging verbosity (only show errors)
    #[arg(short, long)]
    quiet: bool,
}

/// Picks the stderr log level: `-q` wins, then `-v` count, then the
/// config file, then `warn`.
fn get_log_level(verbose: u8, quiet: bool, configured: Option<Level>) -> Level {
    if quiet {
        return Level::ERROR;
    }

    match verbose {
        0 => configured.unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Initialises the tracing subscriber. Output goes to stderr so stdout
/// carries protocol messages only.
fn init_tracing(level: Level) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();

    let configured = match args.config.as_deref().map(config::load_config).transpose() {
        Ok(cfg) => cfg.map(|cfg| Level::from(cfg.logging.level)),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(get_log_level(args.verbose, args.quiet, configured));

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting rule-reviewer-mcp server"
    );

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to create Tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(McpServer::new().run());

    // The stdin reader sits on a blocking-pool thread that only returns
    // when input arrives; dropping the runtime normally would wait for it.
    runtime.shutdown_background();

    match result {
        Ok(()) => {
            info!("Server shut down gracefully");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Server error");
            ExitCode::FAILURE
        }
    }
}
