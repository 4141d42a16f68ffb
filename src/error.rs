use thiserror::Error;

/// Failures fetching or decoding an upstream feed
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0} API key not configured")]
    NotConfigured(&'static str),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("{service} returned status {status}")]
    Status { service: &'static str, status: u16 },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Missing data: {0}")]
    MissingData(String),
}

#[cfg(feature = "live")]
impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ProviderError::Decode(e.to_string())
        } else {
            ProviderError::Http(e.to_string())
        }
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
