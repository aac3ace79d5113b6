//! gea server and route inspection CLI.
//!
//! ```text
//!   gea [--config gea.toml] serve
//!         load config → init logging → register demo routes → freeze
//!         → bind listener → serve until SIGINT/SIGTERM
//!
//!   gea routes [--method GET]     list registered patterns per method
//!   gea match GET /hello/gea      resolve one request, print JSON
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use axum::http::Method;
use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::net::TcpListener;

use gea::config::load_config_or_default;
use gea::lifecycle::{signals, Shutdown};
use gea::observability::logging;
use gea::{demo, Engine, GeaConfig, Router};

#[derive(Parser)]
#[command(name = "gea")]
#[command(about = "Trie-routed HTTP server", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "gea.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the demo routes
    Serve,
    /// List registered route patterns
    Routes {
        /// Only show routes for this method
        #[arg(short, long, value_parser = parse_method)]
        method: Option<Method>,
    },
    /// Resolve a request against the route table
    Match {
        #[arg(value_parser = parse_method)]
        method: Method,
        path: String,
    },
}

/// Method names are case-sensitive in HTTP; accept `get` for `GET` here.
fn parse_method(raw: &str) -> Result<Method, axum::http::method::InvalidMethod> {
    raw.to_uppercase().parse()
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config_or_default(&cli.config)?;
    logging::init(&config.observability);

    let mut engine = Engine::with_config(&config.routing);
    demo::register(&mut engine)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            serve(engine, config).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Routes { method } => {
            print_routes(&engine.build(), method.as_ref());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Match { method, path } => {
            let router = engine.build();
            match router.resolve(&method, &path) {
                Ok(route) => {
                    let out = json!({ "pattern": route.pattern, "params": route.params });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                    Ok(ExitCode::SUCCESS)
                }
                Err(not_found) => {
                    eprintln!("{} {}: {}", method, path, not_found);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

async fn serve(engine: Engine, config: GeaConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = engine.into_server(config);

    let shutdown = Shutdown::new();
    let signal_handle = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal(&signal_handle).await;
    });

    server.run(listener, shutdown).await?;
    tracing::info!("Shutdown complete");
    Ok(())
}

fn print_routes<H>(router: &Router<H>, only: Option<&Method>) {
    for method in router.methods() {
        if only.is_some_and(|m| m != method) {
            continue;
        }
        for pattern in router.routes(method) {
            println!("{:<7} {}", method, pattern);
        }
    }
}
