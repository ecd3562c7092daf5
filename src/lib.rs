pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod favorites;
pub mod models;
pub mod services;
pub mod state;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, FavoritesCommands};
pub use config::Config;
use state::SharedState;

pub async fn run(config: Config) -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Usage: cinefind <COMMAND>");
        println!("Run 'cinefind --help' for the list of commands.");
        return Ok(());
    };

    if matches!(command, Commands::Init) {
        if Config::create_default_if_missing()? {
            println!("✓ Config file created. Edit cinefind.toml and run again.");
        } else {
            println!("Config file already exists.");
        }
        return Ok(());
    }

    config.validate()?;
    init_tracing(&config);

    if matches!(command, Commands::Serve) {
        return run_server(config).await;
    }

    let state = SharedState::new(config)?;

    match command {
        Commands::Search { query } => cli::cmd_search(&state, &query.join(" ")).await,
        Commands::Popular => cli::cmd_popular(&state).await,
        Commands::Trending => cli::cmd_trending(&state).await,
        Commands::Info { id } => cli::cmd_movie_info(&state, &id).await,
        Commands::Favorites { command } => match command.unwrap_or(FavoritesCommands::List) {
            FavoritesCommands::List => cli::cmd_favorites_list(&state).await,
            FavoritesCommands::Add { id } => cli::cmd_favorites_add(&state, &id).await,
            FavoritesCommands::Remove { id } => cli::cmd_favorites_remove(&state, &id).await,
            FavoritesCommands::Toggle { id } => cli::cmd_favorites_toggle(&state, &id).await,
        },
        Commands::Browse => cli::cmd_browse(&state).await,
        Commands::Serve | Commands::Init => Ok(()),
    }
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout is reserved for command output
    if config.general.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    info!(
        "cinefind v{} starting API server...",
        env!("CARGO_PKG_VERSION")
    );

    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")?;
    info!("Prometheus metrics recorder initialized");

    let port = config.server.port;
    let api_state = api::create_app_state_from_config(config, Some(prometheus_handle))?;
    let app = api::router(api_state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("🌐 Web Server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }
}
