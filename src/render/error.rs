use thiserror::Error;

use crate::hypixel::error::FetchError;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("No sprite found for item '{0}'")]
    UnknownItem(String),
    #[error("{count} items do not fit in {slots} slots")]
    TooManyItems { count: usize, slots: usize },
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl RenderError {
    /// The item catalog and the asset bundle disagree. Worth an alert, not a "no data" reply.
    pub fn is_asset_mismatch(&self) -> bool {
        matches!(self, RenderError::UnknownItem(_) | RenderError::TooManyItems { .. })
    }
}
