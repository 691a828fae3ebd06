//! Miyabi CLI and webhook server entry point.
//!
//! Binary name: `miyabi`
//!
//! Parses CLI arguments, loads environment configuration, then either
//! validates the configuration (`check`) or starts the webhook server with
//! the optional weather schedule (`serve`).

mod http;
mod schedule;
mod state;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use miyabi_infra::config::AppConfig;
use state::AppState;

#[derive(Parser)]
#[command(name = "miyabi", version, about = "Kyoto-mannered LINE chat bot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the webhook server (and the weather schedule, if configured)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },

    /// Validate environment configuration and report enabled integrations
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,miyabi=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check => check(),
        Commands::Serve { host, port } => serve(&host, port).await,
    }
}

/// Load configuration and print a masked summary.
fn check() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("configuration incomplete")?;

    println!("line:    configured (secret: {} chars)", config.line.channel_secret.len());
    println!("chat:    {} @ {}", config.chat.model, config.chat.base_url);
    match &config.weather {
        Some(weather) => println!("weather: enabled for {}", weather.city),
        None => println!("weather: disabled (WEATHER_API_KEY not set)"),
    }
    println!("data:    {}", config.data_dir.display());
    Ok(())
}

/// Run the webhook server until Ctrl+C / SIGTERM.
async fn serve(host: &str, port: u16) -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("configuration incomplete")?;
    let state = AppState::init(config).await?;

    let scheduler = match state.notifier.clone() {
        Some(notifier) => Some(schedule::start_weather_schedule(notifier).await?),
        None => {
            tracing::info!("weather notifier disabled");
            None
        }
    };

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "miyabi webhook listening");

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(mut scheduler) = scheduler {
        if let Err(err) = scheduler.shutdown().await {
            tracing::warn!(error = %err, "scheduler shutdown failed");
        }
    }

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
