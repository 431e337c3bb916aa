//! Message Buttons bot - Main entry point.

use anyhow::Context;
use button_bot::api::{create_router, AppState, SignatureVerifier};
use button_bot::config::{Config, LogFormat};
use button_bot::{command_router, AppResult};
use button_store::{ButtonRegistry, FileStore, KeyValueStore, MemoryStore};
use discord_client::DiscordClient;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level, config.bot.log_format);

    info!("Starting Message Buttons bot...");

    // Initialize storage
    let store: Arc<dyn KeyValueStore> = if config.store.persist {
        let store = FileStore::open(&config.store.path)
            .await
            .with_context(|| format!("Failed to open button store {:?}", config.store.path))?;
        info!("Button store loaded from {:?}", store.path());
        Arc::new(store)
    } else {
        info!("Persistence disabled, using in-memory storage");
        Arc::new(MemoryStore::new())
    };
    let registry = ButtonRegistry::new(store);

    let stored = registry.snapshot().await?;
    info!(
        "{} messages carry {} stored buttons",
        stored.len(),
        stored.values().map(|b| b.len()).sum::<usize>()
    );

    // Initialize clients
    let discord = Arc::new(
        DiscordClient::new(
            &config.discord.api_base_url,
            &config.discord.token,
            &config.discord.application_id,
            config.discord.timeout,
        )
        .context("Failed to create Discord client")?,
    );

    let verifier = SignatureVerifier::from_hex(&config.discord.public_key)?;

    // Health checks
    if discord.health_check().await {
        info!("Discord API healthy");
    } else {
        warn!("Discord API health check failed - will retry on requests");
    }

    // Create command handlers
    let commands = command_router(discord.clone(), registry.clone(), &config.buttons);
    info!("Registered {} command handlers", commands.len());

    if config.discord.register_commands {
        let scope = config.discord.guild_id.as_deref();
        match discord.register_commands(scope, &commands.definitions()).await {
            Ok(registered) => info!(
                "Registered {} slash commands ({})",
                registered.len(),
                scope.map_or("global".to_string(), |g| format!("guild {}", g))
            ),
            Err(e) => error!("Failed to register slash commands: {}", e),
        }
    }

    let app = create_router(AppState::new(commands, discord, registry, verifier));

    // Bind to address
    let addr = SocketAddr::new(
        config
            .server
            .listen_addr
            .parse()
            .context("Invalid listen address")?,
        config.server.port,
    );

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening for interactions on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await
        .context("Server error")?;

    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
