use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;

use crate::hypixel::error::{FetchError, FetchResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerIdentity {
    /// Undashed, lowercase.
    pub uuid: String,
    pub name: String,
}

#[derive(Deserialize)]
struct Profile {
    id: String,
    name: String,
}

/// Turns whatever a user typed (name or uuid) into a [`PlayerIdentity`].
#[derive(Clone)]
pub struct MojangClient {
    http: reqwest::Client,
    base_url: String,
}

impl MojangClient {
    pub fn new(base_url: &str, timeout: Duration) -> FetchResult<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(MojangClient { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, input: &str) -> FetchResult<PlayerIdentity> {
        let input = input.trim();

        let url = if let Some(uuid) = normalize_uuid(input) {
            format!("{}/user/profile/{}", self.base_url, uuid)
        } else if is_valid_username(input) {
            format!("{}/users/profiles/minecraft/{}", self.base_url, input)
        } else {
            return Err(FetchError::UnknownPlayer(input.to_string()));
        };

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status == StatusCode::NO_CONTENT || status == StatusCode::NOT_FOUND {
            return Err(FetchError::UnknownPlayer(input.to_string()));
        }
        if !status.is_success() {
            tracing::warn!("Mojang answered {} for {}", status, input);
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        let profile: Profile = serde_json::from_str(&body)?;
        let uuid = normalize_uuid(&profile.id).ok_or_else(|| FetchError::UnknownPlayer(input.to_string()))?;

        Ok(PlayerIdentity { uuid, name: profile.name })
    }
}

/// Accepts dashed or undashed uuids and returns the undashed lowercase form.
pub fn normalize_uuid(input: &str) -> Option<String> {
    let dashes = input.matches('-').count();
    if dashes != 0 && (dashes != 4 || input.len() != 36) {
        return None;
    }

    let undashed: String = input.chars().filter(|c| *c != '-').collect();
    if undashed.len() == 32 && undashed.chars().all(|c| c.is_ascii_hexdigit()) {
        Some(undashed.to_ascii_lowercase())
    } else {
        None
    }
}

fn is_valid_username(input: &str) -> bool {
    (1..=16).contains(&input.len()) && input.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
