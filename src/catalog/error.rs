use thiserror::Error;

/// Errors that can occur when querying the event catalog
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Request(String),

    /// The catalog answered with a non-success status
    #[error("Catalog returned HTTP status {0}")]
    Status(u16),

    /// The response body was not a valid feature collection
    #[error("Failed to decode catalog response: {0}")]
    Decode(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Other unspecified errors
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
