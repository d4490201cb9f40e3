#[derive(Debug, thiserror::Error)]
pub enum SupplyRiskError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Email error: {0}")]
    Email(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),
}

pub type Result<T> = std::result::Result<T, SupplyRiskError>;
