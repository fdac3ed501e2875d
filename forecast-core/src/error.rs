use thiserror::Error;

/// Errors produced by [`crate::ForecastClient`] construction and queries.
#[derive(Debug, Error)]
pub enum Error {
    /// The API key does not match the upstream key format.
    #[error("invalid API key: expected 32 lowercase alphanumeric characters")]
    InvalidKey,

    /// The unit system is not one of standard, metric, imperial.
    #[error("unsupported unit '{0}': expected one of standard, metric, imperial")]
    UnsupportedUnit(String),

    /// The language code is not in the set supported by the upstream API.
    #[error("unsupported language code '{0}'")]
    UnsupportedLanguage(String),

    /// Transport-level failure, surfaced unchanged to the caller.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded into the forecast model.
    #[error("failed to decode forecast response: {0}")]
    Decode(#[from] serde_json::Error),
}
