use anyhow::{Context, Result};
use movie_bot::bot::{self, Command};
use movie_bot::config::Config;
use movie_bot::db::MovieStore;
use movie_bot::localization::init_localization;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging();

    info!("Starting Movie Telegram Bot");

    init_localization()?;

    let config = Config::from_env().context("Failed to load configuration")?;

    info!(database_url = %config.database_url, "Opening movie database");

    let store = MovieStore::connect(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to open movie database")?;
    store
        .init_database_schema()
        .await
        .context("Failed to initialize database schema")?;

    match store.count_movies().await {
        Ok(count) => info!(count, "Movie catalog available"),
        Err(e) => warn!(error = %e, "Movie catalog is not readable yet"),
    }

    let bot = Bot::new(&config.telegram_bot_token);

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    info!("Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, bot::schema())
        .dependencies(dptree::deps![Arc::new(store), Arc::new(config)])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
