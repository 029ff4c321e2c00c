#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Fetch(String),

    #[error("No cards with TCGPlayer data found")]
    NoData,

    #[error("Image error: {0}")]
    Image(String),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
