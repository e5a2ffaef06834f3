use thiserror::Error;

/// Errors raised while querying the Web API or rendering the report.
#[derive(Error, Debug)]
pub enum Error {
    /// The request never produced a response (DNS, TLS, connection reset ...).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Spotify API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Spotify Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),

    #[error("Invalid artist id {0:?}")]
    InvalidArtistId(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Error::ConfigurationError(err.to_string())
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
