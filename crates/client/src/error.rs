/// Errors returned by the client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    /// The gateway answered with a non-success status and an `{"error": ...}` body.
    #[error("{status}: {message}")]
    Api { status: u16, message: String },
}
