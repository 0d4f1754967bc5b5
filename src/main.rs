//! # Nudnik Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database,
//! constructs the AI providers, starts the reminder service, and runs the
//! Telegram bot next to the health-check server.

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nudnik_bot::bot::handlers::BotHandler;
use nudnik_bot::config::Config;
use nudnik_bot::database::connection::DatabaseManager;
use nudnik_bot::providers::{self, text::GeminiClient, TextProvider};
use nudnik_bot::services::chat::ChatService;
use nudnik_bot::services::health::HealthService;
use nudnik_bot::services::reminder::{ReminderQueue, ReminderService};
use nudnik_bot::services::sticker::StickerService;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nudnik_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Nudnik Bot v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration loaded - Database: {}, HTTP Port: {}, Image backend: {:?}",
        config.database_url, config.http_port, config.image_backend
    );

    // Initialize database
    info!("Initializing database connection...");
    let db = DatabaseManager::new(&config.database_url).await?;
    info!("Running database migrations...");
    db.run_migrations().await?;
    let db_arc = Arc::new(db.clone());
    info!("Database initialized successfully");

    // Initialize bot and providers
    info!("Initializing Telegram bot...");
    let bot = Bot::new(&config.telegram_bot_token);
    let text_provider: Arc<dyn TextProvider> =
        Arc::new(GeminiClient::new(config.gemini_api_key.clone()));
    let image_provider = providers::image::from_config(&config);
    info!("Using image backend '{}'", image_provider.name());

    let chat = Arc::new(ChatService::new(text_provider));
    let stickers = Arc::new(StickerService::new(image_provider));
    let reminders = Arc::new(ReminderQueue::new());

    // Initialize and start reminder service
    info!("Initializing reminder service...");
    let mut reminder_service = match ReminderService::new(bot.clone(), reminders.clone()).await {
        Ok(service) => service,
        Err(e) => {
            tracing::error!("Failed to create reminder service: {}", e);
            return Err(anyhow::anyhow!("Failed to create reminder service: {}", e));
        }
    };

    if let Err(e) = reminder_service.start().await {
        tracing::error!("Failed to start reminder service: {}", e);
    } else {
        info!("Reminder service started successfully");
    }

    // Initialize health service
    let health_service = HealthService::new(db_arc);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("Health check server starting on port {}", config.http_port);

    // Run both the bot and the health server concurrently
    let handler = BotHandler::new(db, chat, stickers, reminders);
    let bot_task = tokio::spawn(async move {
        Dispatcher::builder(bot, handler.schema())
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    });

    let health_task = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, health_service.router).await {
            tracing::error!("Health server error: {}", e);
        }
    });

    tokio::select! {
        result = bot_task => {
            if let Err(e) = result {
                tracing::error!("Bot task error: {}", e);
            }
        }
        result = health_task => {
            if let Err(e) = result {
                tracing::error!("Health task error: {}", e);
            }
        }
    }

    // Stop reminder service on shutdown
    if let Err(e) = reminder_service.stop().await {
        tracing::warn!("Error stopping reminder service: {}", e);
    }

    info!("Application stopped");
    Ok(())
}
