use thiserror::Error;

/// The single failure shape provider calls can produce. Malformed URLs,
/// transport errors, timeouts, undecodable bodies, and remote-reported
/// logical errors all collapse into it; callers react to the fact of the
/// failure, the message is for logs.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("fetch failed: {0}")]
    FetchFailed(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        ProviderError::FetchFailed(err.to_string())
    }
}
