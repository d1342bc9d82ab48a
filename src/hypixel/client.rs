use std::sync::Arc;
use std::time::Duration;

use rand::prelude::SliceRandom;
use serde_json::Value;

use crate::hypixel::error::{FetchError, FetchResult};
use crate::hypixel::stats::StatsDocument;

#[derive(Clone)]
pub struct HypixelClient {
    http: reqwest::Client,
    api_keys: Arc<[String]>,
    base_url: String,
}

impl HypixelClient {
    pub fn new(api_keys: Vec<String>, base_url: &str, timeout: Duration) -> FetchResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let api_keys: Vec<String> = api_keys.into_iter().map(|key| key.trim().to_string()).filter(|key| !key.is_empty()).collect();

        Ok(HypixelClient {
            http,
            api_keys: api_keys.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetches the player document for `uuid`. Never retries; any failure means there is nothing to render.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_stats(&self, uuid: &str) -> FetchResult<StatsDocument> {
        let key = pick_key(&self.api_keys).ok_or(FetchError::NoApiKeys)?;

        let response = self.http.get(format!("{}/player", self.base_url)).query(&[("key", key), ("uuid", uuid)]).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Hypixel answered {} for {}", status, uuid);
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        let raw: Value = serde_json::from_str(&body)?;
        StatsDocument::from_value(raw)
    }
}

/// Uniform random pick, so load spreads across keys without any shared counter.
pub fn pick_key(pool: &[String]) -> Option<&str> {
    pool.choose(&mut rand::thread_rng()).map(String::as_str)
}
