use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "hv")]
#[command(about = "Holdings viewer CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch holdings once and render the holdings screen
    Show {
        /// Layered config paths in merge order (applied over built-in defaults)
        #[arg(long = "config")]
        config_paths: Vec<String>,

        /// Endpoint override (takes precedence over HV_HOLDINGS_URL and config)
        #[arg(long)]
        url: Option<String>,

        /// Show the summary block (current value, investment, today's P&L)
        #[arg(long, default_value_t = false)]
        expanded: bool,

        /// Skip the splash delay
        #[arg(long = "no-splash", default_value_t = false)]
        no_splash: bool,
    },

    /// Aggregate a saved response body offline
    Summarize {
        /// Path to a JSON response body
        #[arg(long)]
        file: String,

        /// Response field holding the records array
        #[arg(long, default_value = hv_md::DEFAULT_HOLDINGS_FIELD)]
        field: String,

        /// Print summary, items and skipped records as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> overrides)
        #[arg(required = true)]
        paths: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent when absent.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Show {
            config_paths,
            url,
            expanded,
            no_splash,
        } => commands::show::show(config_paths, url, expanded, no_splash).await?,

        Commands::Summarize { file, field, json } => {
            commands::summarize::summarize(file, field, json).await?
        }

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = hv_config::load_files(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays the rendered output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
