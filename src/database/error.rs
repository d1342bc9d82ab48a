use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to get a connection from the pool: {0}")]
    Pool(#[from] r2d2::Error),
    #[error("Sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Failed to prepare the database directory: {0}")]
    Io(#[from] std::io::Error),
}
