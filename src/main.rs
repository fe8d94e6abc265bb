//! greenloop CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use greenloop::cli::{Cli, Commands};
use greenloop::infrastructure::config::ConfigLoader;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // One config load per invocation. Logging falls back to defaults when
    // the load fails so the failure itself is still reported; the error
    // surfaces once a command actually needs the config.
    let loaded = ConfigLoader::load();
    let logging = loaded
        .as_ref()
        .map(|config| config.logging.clone())
        .unwrap_or_default();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.clone()));

    if logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let result = match cli.command {
        Commands::Init(args) => greenloop::cli::commands::init::execute(args, cli.json).await,
        // Init must stay usable with a broken config file, so only fix
        // insists on a successful load.
        Commands::Fix(args) => match loaded {
            Ok(config) => greenloop::cli::commands::fix::execute(args, config, cli.json).await,
            Err(err) => Err(err),
        },
    };

    if let Err(err) = result {
        greenloop::cli::handle_error(err, cli.json);
    }
}
