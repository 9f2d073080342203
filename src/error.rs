use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Raised when a caller breaks a precondition (e.g. searching an empty column).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("invalid config: {0}")]
    Config(String),
}
