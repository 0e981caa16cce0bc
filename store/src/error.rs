use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("storage is full: {0}")]
    Full(String),

    #[error("stored value is not valid UTF-8: {0}")]
    Encoding(String),
}
