use crate::external::price_provider::PriceProviderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("No usable price history: {0}")]
    DataUnavailable(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Degenerate statistics: {0}")]
    DegenerateStatistics(String),
    #[error("Price provider error: {0}")]
    Provider(#[from] PriceProviderError),
    #[error("Render error: {0}")]
    Render(String),
}

impl From<String> for AppError {
    fn from(value: String) -> Self {
        AppError::InvalidInput(value)
    }
}
