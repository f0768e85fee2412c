use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubfmtError {
    #[error("unknown subtitle format: '{0}'")]
    UnknownFormat(String),
    #[error("invalid segment #{index}: {reason}")]
    InvalidSegment { index: usize, reason: String },
    #[error("invalid padding: {0}")]
    InvalidPadding(String),
    #[error("{0}")]
    Parse(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to render subtitles")]
    Render(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, SubfmtError>;
