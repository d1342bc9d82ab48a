extern crate r2d2;
extern crate r2d2_sqlite;

use std::path::PathBuf;
use std::str::FromStr;
use std::{env, fs};

use anyhow::Context;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::SubscriberExt, Layer, Registry};

use crate::config::{read_config, DEFAULT_CONFIG_PATH};
use crate::database::database::Database;
use crate::discord::bot::DiscordBot;
use crate::discord::commands::Data;
use crate::hypixel::client::HypixelClient;
use crate::hypixel::mojang::MojangClient;
use crate::render::shop::ShopRenderer;

mod config;
mod database;
mod discord;
mod hypixel;
mod render;

fn main() -> anyhow::Result<()> {
    let config_path = env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = read_config(&config_path)?;

    let level = LevelFilter::from_str(&config.log_level).with_context(|| format!("Invalid log_level {}", config.log_level))?;
    let (_file_guard, _stdout_guard) = init_logging(level)?;

    tracing::info!("Loaded config from {}", config_path.display());
    if !config.asset_root.is_dir() {
        tracing::warn!("Asset root {} does not exist, every render will fail", config.asset_root.display());
    }

    let database = Database::new(&config.database_path).context("Failed to open the database")?;
    let hypixel = HypixelClient::new(config.hypixel_api_keys.clone(), &config.hypixel_base_url, config.request_timeout())?;
    let mojang = MojangClient::new(&config.mojang_base_url, config.request_timeout())?;

    let data = Data {
        renderer: ShopRenderer::new(hypixel, database, config.asset_root.clone()),
        mojang,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut discord_bot = DiscordBot::new(&config, data).await?;
        discord_bot.run_bot().await
    })
}

fn init_logging(level: LevelFilter) -> anyhow::Result<(tracing_appender::non_blocking::WorkerGuard, tracing_appender::non_blocking::WorkerGuard)> {
    fs::create_dir_all("logs/").context("Failed to create the logs directory")?;
    let file_appender = tracing_appender::rolling::hourly("logs/", "rolling.log");
    let (non_blocking, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::Layer::new()
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking)
        .with_filter(level);

    let (non_blocking, stdout_guard) = tracing_appender::non_blocking(std::io::stdout());
    let stdout_layer = tracing_subscriber::fmt::Layer::new()
        .compact()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(false)
        .with_writer(non_blocking)
        .with_filter(level);

    Registry::default().with(file_layer).with(stdout_layer).init();

    Ok((file_guard, stdout_guard))
}
