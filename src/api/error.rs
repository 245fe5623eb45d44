use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network response was not ok: {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("tokio runtime unavailable: {0}")]
    Runtime(String),
}

impl ApiError {
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        }
    }
}
