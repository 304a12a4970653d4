//! Ajali - Application entry point
//!
//! CLI-based entry point that dispatches to various commands.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ajali_api::{
    cli::{Cli, Commands},
    commands,
    config::Settings,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let settings = match Settings::load(cli.profile) {
        Ok(settings) => settings,
        Err(e) => {
            init_tracing(cli.verbose);
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbose || settings.debug);
    tracing::debug!(profile = %settings.profile, "Configuration loaded");
    if settings.has_insecure_secrets() {
        tracing::warn!("Production profile is running with default secret keys");
    }

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, settings).await,
        Commands::Schema(args) => commands::schema::execute(args, settings).await,
        Commands::Config => commands::config::execute(settings).await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber. `RUST_LOG` takes precedence.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(filter)
        .init();
}
