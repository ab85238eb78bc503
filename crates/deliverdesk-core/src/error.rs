use thiserror::Error;

/// All the ways the console's data layer can fail
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<deliverdesk_api::ApiError> for Error {
    fn from(err: deliverdesk_api::ApiError) -> Self {
        Error::ApiError(err.to_string())
    }
}
