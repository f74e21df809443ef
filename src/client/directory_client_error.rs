use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryClientError {
    #[error("Http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Api error: {0} - {1}")]
    ApiError(StatusCode, String),
}
