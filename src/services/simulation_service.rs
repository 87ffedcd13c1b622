use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::simulation::MAX_PATH_POINTS;
use crate::models::{SimulatedPath, SimulationParams, SimulationResult};
use crate::services::stats;

/// Run a Monte Carlo random walk seeded from historical volatility.
///
/// Each trial is an independent geometric random walk starting at the last
/// historical close: every step multiplies the previous price by
/// `1 + N(0, volatility)` where `volatility` is the sample standard
/// deviation of the historical daily returns. Terminal prices are collected
/// in trial order and averaged.
///
/// Paths are hard-capped at [`MAX_PATH_POINTS`] points no matter how large
/// a horizon is requested; the truncation is reported in the result's
/// `warnings` rather than silently applied.
pub fn run_simulation(
    ticker: &str,
    prices: &[f64],
    params: SimulationParams,
) -> Result<SimulationResult, AppError> {
    run_simulation_with_rng(ticker, prices, params, &mut rand::rng())
}

/// Same as [`run_simulation`] but with a caller-supplied RNG, so tests can
/// seed the walk.
pub fn run_simulation_with_rng<R: Rng + ?Sized>(
    ticker: &str,
    prices: &[f64],
    params: SimulationParams,
    rng: &mut R,
) -> Result<SimulationResult, AppError> {
    if params.num_simulations == 0 {
        return Err(AppError::InvalidInput(
            "number of simulations must be at least 1".to_string(),
        ));
    }
    if params.num_days == 0 {
        return Err(AppError::InvalidInput(
            "simulation horizon must be at least 1 day".to_string(),
        ));
    }
    if prices.len() < 2 {
        return Err(AppError::InvalidInput(format!(
            "need at least 2 historical prices, got {}",
            prices.len()
        )));
    }

    let returns = stats::daily_returns(prices)?;
    let daily_volatility = stats::sample_std_dev(&returns)?;

    // prices.len() >= 2 was checked above
    let last_price = prices[prices.len() - 1];

    info!(
        "Simulating {} paths over {} days for {} (last close {:.2}, daily vol {:.5})",
        params.num_simulations, params.num_days, ticker, last_price, daily_volatility
    );

    let mut warnings = Vec::new();
    let path_len = (params.num_days as usize).min(MAX_PATH_POINTS);
    if params.num_days as usize > MAX_PATH_POINTS {
        let notice = format!(
            "Requested horizon of {} days truncated to {} points per path",
            params.num_days, MAX_PATH_POINTS
        );
        warn!("{}", notice);
        warnings.push(notice);
    }

    let step = Normal::new(0.0, daily_volatility)
        .map_err(|e| AppError::DegenerateStatistics(format!("bad volatility: {}", e)))?;

    let mut paths = Vec::with_capacity(params.num_simulations as usize);
    let mut terminal_prices = Vec::with_capacity(params.num_simulations as usize);

    for _ in 0..params.num_simulations {
        let mut path = Vec::with_capacity(path_len);
        let mut price = last_price * (1.0 + step.sample(rng));
        path.push(price);

        for _ in 1..path_len {
            price *= 1.0 + step.sample(rng);
            path.push(price);
        }

        terminal_prices.push(price);
        paths.push(SimulatedPath { prices: path });
    }

    let mean_terminal_price = stats::mean(&terminal_prices)?;

    Ok(SimulationResult {
        ticker: ticker.to_string(),
        last_price,
        daily_volatility,
        terminal_prices,
        mean_terminal_price,
        paths,
        warnings,
        generated_at: chrono::Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PRICES: [f64; 4] = [100.0, 102.0, 101.0, 105.0];

    fn params(num_simulations: u32, num_days: u32) -> SimulationParams {
        SimulationParams { num_simulations, num_days }
    }

    #[test]
    fn test_terminal_count_matches_num_simulations() {
        let mut rng = StdRng::seed_from_u64(42);
        let result =
            run_simulation_with_rng("TEST", &PRICES, params(25, 10), &mut rng).unwrap();
        assert_eq!(result.terminal_prices.len(), 25);
        assert_eq!(result.paths.len(), 25);
    }

    #[test]
    fn test_path_length_matches_horizon() {
        let mut rng = StdRng::seed_from_u64(42);
        let result =
            run_simulation_with_rng("TEST", &PRICES, params(5, 10), &mut rng).unwrap();
        for path in &result.paths {
            assert_eq!(path.prices.len(), 10);
        }
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_horizon_truncated_to_one_trading_year() {
        let mut rng = StdRng::seed_from_u64(7);
        let result =
            run_simulation_with_rng("TEST", &PRICES, params(3, 1000), &mut rng).unwrap();
        for path in &result.paths {
            assert_eq!(path.prices.len(), 252);
        }
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].contains("truncated"));
    }

    #[test]
    fn test_horizon_of_exactly_252_not_flagged() {
        let mut rng = StdRng::seed_from_u64(7);
        let result =
            run_simulation_with_rng("TEST", &PRICES, params(2, 252), &mut rng).unwrap();
        assert_eq!(result.paths[0].prices.len(), 252);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_mean_is_exact_average_of_terminals() {
        let mut rng = StdRng::seed_from_u64(99);
        let result =
            run_simulation_with_rng("TEST", &PRICES, params(50, 30), &mut rng).unwrap();
        let expected = result.terminal_prices.iter().sum::<f64>()
            / result.terminal_prices.len() as f64;
        assert_eq!(result.mean_terminal_price, expected);
    }

    #[test]
    fn test_terminal_price_is_last_path_element() {
        let mut rng = StdRng::seed_from_u64(3);
        let result =
            run_simulation_with_rng("TEST", &PRICES, params(10, 20), &mut rng).unwrap();
        for (path, terminal) in result.paths.iter().zip(&result.terminal_prices) {
            assert_eq!(path.terminal_price(), Some(*terminal));
        }
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        // Constant history -> zero volatility -> every step multiplies by 1.
        let flat = [100.0, 100.0, 100.0];
        let mut rng = StdRng::seed_from_u64(1);
        let result =
            run_simulation_with_rng("TEST", &flat, params(10, 50), &mut rng).unwrap();
        assert_eq!(result.daily_volatility, 0.0);
        for path in &result.paths {
            for price in &path.prices {
                assert_eq!(*price, 100.0);
            }
        }
        assert_eq!(result.mean_terminal_price, 100.0);
    }

    #[test]
    fn test_single_trial_single_day() {
        let mut rng = StdRng::seed_from_u64(5);
        let result =
            run_simulation_with_rng("TEST", &PRICES, params(1, 1), &mut rng).unwrap();
        assert_eq!(result.paths.len(), 1);
        assert_eq!(result.paths[0].prices.len(), 1);
        assert_eq!(result.mean_terminal_price, result.terminal_prices[0]);
        // Volatility of the example history from the docs
        assert!((result.daily_volatility - 0.02517).abs() < 1e-4);
    }

    #[test]
    fn test_zero_simulations_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = run_simulation_with_rng("TEST", &PRICES, params(0, 10), &mut rng);
        assert!(matches!(err, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_zero_days_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = run_simulation_with_rng("TEST", &PRICES, params(10, 0), &mut rng);
        assert!(matches!(err, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_single_price_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = run_simulation_with_rng("TEST", &[100.0], params(10, 10), &mut rng);
        assert!(matches!(err, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_two_prices_is_degenerate() {
        // Two prices give a single return, not enough for a sample std dev.
        let mut rng = StdRng::seed_from_u64(0);
        let err = run_simulation_with_rng("TEST", &[100.0, 101.0], params(10, 10), &mut rng);
        assert!(matches!(err, Err(AppError::DegenerateStatistics(_))));
    }
}
