use thiserror::Error;

/// Failures talking to one of the two backends.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResourceError {
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Backend returned status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Could not decode response: {0}")]
    Decode(String),
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<reqwest::Error> for ResourceError {
    fn from(e: reqwest::Error) -> Self {
        ResourceError::Request(e.to_string())
    }
}

/// Errors reported by the store actor to its callers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Cart toggle failed: {0}")]
    CartToggleFailed(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required setting {0}")]
    Missing(String),
    #[error("Invalid URL in {key}: {reason}")]
    InvalidUrl { key: String, reason: String },
}

/// Startup and shutdown failures of the whole system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("HTTP client setup failed: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("Actor task failed: {0}")]
    ActorTaskFailed(String),
}
