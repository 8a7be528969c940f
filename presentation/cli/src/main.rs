use dotenvy::dotenv;

mod config;
mod setup;

use config::app_config::AppConfig;
use setup::{dependency_injection::DependencyContainer, shell::Shell};

/// Storefront cart shell
///
/// Restores the shopper's cart from the device store, drives it from stdin
/// and flushes it back on exit.
/// - config/: Environment configuration (API, storage, cart timings)
/// - setup/: Dependency wiring, console notifier and the command shell
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    // 2. Load environment variables
    dotenv().ok();

    // 3. Load configuration
    let config = AppConfig::from_env();

    // 4. Wire dependencies and restore the cart
    let container = DependencyContainer::new(&config).await?;

    // 5. Run the shell; the cart is flushed even if input fails
    let result = Shell::run(&container).await;
    container.session.shutdown().await;

    result
}
