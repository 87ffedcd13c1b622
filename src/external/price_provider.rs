use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct ExternalPricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Chronologically ordered close series plus a human-readable display name.
#[derive(Debug, Clone)]
pub struct PriceHistory {
    pub symbol: String,
    pub display_name: String,
    pub points: Vec<ExternalPricePoint>,
}

impl PriceHistory {
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }
}

#[derive(Debug, Error)]
pub enum PriceProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch daily close prices for `ticker` between `start` and `end`
    /// (inclusive), ascending by date.
    async fn fetch_close_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceHistory, PriceProviderError>;
}
