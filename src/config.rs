use chrono::{NaiveDate, Utc};

use crate::errors::AppError;

/// Run parameters for one simulation, read from the environment with
/// literal defaults so the tool works out of the box.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub ticker: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub num_simulations: u32,
    pub num_days: u32,
    pub chart_path: String,
}

impl SimulationConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let ticker = std::env::var("TICKER").unwrap_or_else(|_| "BFH".to_string());

        let start_date = std::env::var("START_DATE")
            .unwrap_or_else(|_| "2023-01-01".to_string());
        let start_date = NaiveDate::parse_from_str(&start_date, "%Y-%m-%d")
            .map_err(|e| AppError::InvalidInput(format!("Bad START_DATE: {}", e)))?;

        let end_date = match std::env::var("END_DATE") {
            Ok(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|e| AppError::InvalidInput(format!("Bad END_DATE: {}", e)))?,
            Err(_) => Utc::now().date_naive(),
        };

        let num_simulations = std::env::var("NUM_SIMULATIONS")
            .unwrap_or_else(|_| "1000".to_string())
            .parse::<u32>()
            .map_err(|e| AppError::InvalidInput(format!("Bad NUM_SIMULATIONS: {}", e)))?;

        let num_days = std::env::var("NUM_DAYS")
            .unwrap_or_else(|_| "252".to_string())
            .parse::<u32>()
            .map_err(|e| AppError::InvalidInput(format!("Bad NUM_DAYS: {}", e)))?;

        let chart_path = std::env::var("CHART_PATH")
            .unwrap_or_else(|_| "simulation.svg".to_string());

        let config = Self {
            ticker,
            start_date,
            end_date,
            num_simulations,
            num_days,
            chart_path,
        };
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.ticker.trim().is_empty() {
            return Err(AppError::InvalidInput("TICKER must not be empty".to_string()));
        }
        if self.start_date >= self.end_date {
            return Err(AppError::InvalidInput(format!(
                "START_DATE {} must be before END_DATE {}",
                self.start_date, self.end_date
            )));
        }
        if self.num_simulations == 0 {
            return Err(AppError::InvalidInput(
                "NUM_SIMULATIONS must be at least 1".to_string(),
            ));
        }
        if self.num_days == 0 {
            return Err(AppError::InvalidInput(
                "NUM_DAYS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
