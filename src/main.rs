//! Diagnostic CLI for the resilience layer.
//!
//! Boots the runtime from a config file (or defaults), runs one diagnostic,
//! then prints the recent event log as JSON.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use app_resilience::capability::{self, generate_salt};
use app_resilience::config::{load_config, AppConfig};
use app_resilience::observability::init_logging;
use app_resilience::reachability::connect_within;
use app_resilience::reporting::{user_friendly_message, DEFAULT_RECENT_COUNT};
use app_resilience::AppRuntime;

#[derive(Parser)]
#[command(name = "app-resilience")]
#[command(about = "Diagnostics for the resilience and capability layer", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of recent events to print.
    #[arg(short, long, default_value_t = DEFAULT_RECENT_COUNT)]
    events: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report current reachability and wait for the network
    Reachability {
        #[arg(long, default_value_t = 5000)]
        timeout_ms: u64,
    },
    /// Connect to host:port under the configured retry policy
    Probe { address: String },
    /// Generate a bcrypt-format salt with the host capability provider
    Salt {
        #[arg(long, default_value_t = capability::salt::DEFAULT_ROUNDS)]
        rounds: u32,
    },
    /// Show the user-facing message for a raw failure text
    Explain { message: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    init_logging(&config.observability);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "app-resilience starting");

    let mut runtime = AppRuntime::bootstrap(config)?;
    runtime.start();
    let reporter = runtime.reporter();

    match cli.command {
        Commands::Reachability { timeout_ms } => {
            let monitor = runtime.reachability();
            let online = monitor.is_online().await;
            println!("online: {online}");
            if !online {
                let recovered = monitor.wait_for_network(Duration::from_millis(timeout_ms)).await;
                println!("network within {timeout_ms}ms: {recovered}");
            }
        }
        Commands::Probe { address } => {
            let connect_timeout =
                Duration::from_millis(runtime.config().reachability.probe_timeout_ms);
            let result = runtime
                .retry()
                .execute("probe", || {
                    let address = address.clone();
                    async move { connect_within(&address, connect_timeout).await }
                })
                .await;
            match result {
                Ok(stream) => println!("connected to {}", stream.peer_addr()?),
                Err(e) => {
                    let shown = reporter.handle_failure(&e, None);
                    println!("{shown}");
                }
            }
        }
        Commands::Salt { rounds } => match generate_salt(rounds) {
            Ok(salt) => println!(
                "{salt} ({} source)",
                capability::provider().grade().as_str()
            ),
            Err(e) => {
                reporter.log_error(&e, None);
                println!("{e}");
            }
        },
        Commands::Explain { message } => {
            println!("{}", user_friendly_message(&message));
        }
    }

    let events = reporter.get_recent_errors(cli.events);
    println!("{}", serde_json::to_string_pretty(&events)?);

    runtime.shutdown().await;
    Ok(())
}

