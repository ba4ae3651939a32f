use anyhow::Result;
use clap::{Parser, Subcommand};
use spoiler_suite::commands::{run, steps};
use spoiler_suite::config::ConfigOverrides;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spoiler-suite")]
#[command(about = "Ordered end-to-end checks for the Story Spoiler API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate and run every step against the service
    Run {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Service base URL (overrides config file and SPOILER_BASE_URL)
        #[arg(long)]
        base_url: Option<String>,

        /// Login username (overrides config file and SPOILER_USERNAME)
        #[arg(short, long)]
        username: Option<String>,

        /// Login password (overrides config file and SPOILER_PASSWORD)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List the steps in execution order
    Steps,
}

/// Log to stderr, filtered by RUST_LOG (default: warn).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            base_url,
            username,
            password,
        } => {
            let overrides = ConfigOverrides {
                base_url,
                username,
                password,
            };
            run::execute(config.as_deref(), &overrides)
        }
        Commands::Steps => steps::execute(),
    }
}
