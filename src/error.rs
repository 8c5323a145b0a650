use thiserror::Error;

/// Error taxonomy shared by every component and mapped once at the HTTP
/// boundary: `Validation` becomes 400, everything else 500.
#[derive(Debug, Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),

    /// The room registry could not be reached or answered with a failure.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Storage or completion-service call failure, or a normalized internal
    /// scheduling failure from the blocking bridge.
    #[error("service error: {0}")]
    Service(String),

    /// Required secrets or settings are missing. Fail fast, no fallback.
    #[error("configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, Error>;
