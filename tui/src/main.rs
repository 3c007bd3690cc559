use anyhow::Result;
use katalab_core::{BackendFactory, EventBus};
use tracing::info;

mod app;
mod components;
mod handlers;
mod renderer;
mod state;
mod utils;

use app::App;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing - only log to stderr and filter out less important messages
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_writer(std::io::stderr)
        .init();
    info!("Starting KataLab TUI");

    // Optional: load .env (ignore errors if missing)
    let _ = dotenvy::dotenv();

    // Create event bus for communication
    let event_bus = EventBus::new();
    let event_sender = event_bus.sender();

    // Choose backend: dashboard API if configured, canned data otherwise
    let backend = match std::env::var("KATALAB_API_URL") {
        Ok(_) => BackendFactory::create_http_from_env()
            .unwrap_or_else(|_| BackendFactory::create_mock()),
        Err(_) => BackendFactory::create_mock(),
    };

    // Create and run the TUI application
    let mut app = App::new(backend, event_sender, event_bus.into_receiver());
    app.run().await?;

    info!("KataLab TUI shutting down");
    Ok(())
}
