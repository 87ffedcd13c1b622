use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of points per simulated path (one trading year).
/// A larger requested horizon is truncated to this, matching the
/// behavior of earlier versions of the tool.
pub const MAX_PATH_POINTS: usize = 252;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationParams {
    pub num_simulations: u32,
    pub num_days: u32,
}

/// One simulated sequence of future prices produced by one trial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedPath {
    pub prices: Vec<f64>,
}

impl SimulatedPath {
    /// Last value in the path, the trial's terminal price.
    pub fn terminal_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }
}

/// Complete output of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub ticker: String,
    pub last_price: f64,
    pub daily_volatility: f64,
    /// Terminal price of each trial, in trial order.
    pub terminal_prices: Vec<f64>,
    /// Arithmetic mean of `terminal_prices`.
    pub mean_terminal_price: f64,
    pub paths: Vec<SimulatedPath>,
    pub warnings: Vec<String>,
    pub generated_at: DateTime<Utc>,
}
