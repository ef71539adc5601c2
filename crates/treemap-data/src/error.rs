use std::sync::Arc;

use reqwest::StatusCode;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("Please select either Country or Currency")]
    InvalidGroupBy(String),
    #[error("failed to send http request: {0}")]
    Http(Arc<reqwest::Error>),
    #[error("Network response was not ok")]
    Status(StatusCode),
    #[error("failed to parse response: {0}")]
    Json(Arc<serde_json::Error>),
    #[error("invalid backend url: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any request was made.
    Validation,
    Network,
    Parse,
    Config,
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidGroupBy(_) => ErrorKind::Validation,
            Error::Http(_) | Error::Status(_) => ErrorKind::Network,
            Error::Json(_) => ErrorKind::Parse,
            Error::Url(_) => ErrorKind::Config,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(Arc::new(error))
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(Arc::new(error))
    }
}
