use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Caller-supplied input violates a documented precondition
    /// (for example an empty series handed to the locator).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown story: {0}")]
    UnknownStory(String),

    #[error("render backend failure: {0}")]
    Backend(String),
}
