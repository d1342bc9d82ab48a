use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/config.yaml";

const DEFAULT_HYPIXEL_BASE_URL: &str = "https://api.hypixel.net";
const DEFAULT_MOJANG_BASE_URL: &str = "https://api.mojang.com";

#[derive(Deserialize, Clone, Debug)]
pub struct BotConfig {
    pub discord_token: String,
    #[serde(default)]
    pub guild_id: Option<u64>,
    pub hypixel_api_keys: Vec<String>,
    #[serde(default = "default_database_path")]
    pub database_path: PathBuf,
    #[serde(default = "default_asset_root")]
    pub asset_root: PathBuf,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_hypixel_base_url")]
    pub hypixel_base_url: String,
    #[serde(default = "default_mojang_base_url")]
    pub mojang_base_url: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("db/bot.db")
}

fn default_asset_root() -> PathBuf {
    PathBuf::from("assets")
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_hypixel_base_url() -> String {
    DEFAULT_HYPIXEL_BASE_URL.to_string()
}

fn default_mojang_base_url() -> String {
    DEFAULT_MOJANG_BASE_URL.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl BotConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn validate(self) -> anyhow::Result<Self> {
        if self.discord_token.trim().is_empty() {
            bail!("discord_token must not be empty");
        }
        if self.hypixel_api_keys.iter().all(|key| key.trim().is_empty()) {
            bail!("at least one hypixel api key is required");
        }
        Ok(self)
    }
}

pub fn parse_config(contents: &str) -> anyhow::Result<BotConfig> {
    let config: BotConfig = serde_yaml::from_str(contents).context("Error parsing config file")?;
    config.validate()
}

pub fn read_config(path: &Path) -> anyhow::Result<BotConfig> {
    let mut file = File::open(path).with_context(|| format!("Unable to open config file {}", path.display()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).context("Unable to read the config file")?;
    parse_config(&contents)
}
