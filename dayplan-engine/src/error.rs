use thiserror::Error;

/// Engine-wide error type
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("weather upstream failure: {message}")]
    WeatherUpstream {
        /// HTTP status from the provider, when one was received
        status: Option<u16>,
        message: String,
    },

    #[error("model provider unavailable: {0}")]
    ModelUnavailable(String),

    #[error("model returned malformed output: {0}")]
    ModelMalformed(String),

    #[error("no recommendation strategy succeeded")]
    NoStrategySucceeded,
}

pub type Result<T> = std::result::Result<T, EngineError>;
