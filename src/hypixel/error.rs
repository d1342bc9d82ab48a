use thiserror::Error;

pub type FetchResult<T> = Result<T, FetchError>;

/// Anything that stops us from getting renderable data for a player.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("No Hypixel API keys are configured")]
    NoApiKeys,
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Unexpected response status {0}")]
    Status(reqwest::StatusCode),
    #[error("Malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Stats document is missing {0}")]
    MissingField(&'static str),
    #[error("Unknown player {0}")]
    UnknownPlayer(String),
}
