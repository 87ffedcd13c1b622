use crate::errors::AppError;

/// Arithmetic mean of a series.
///
/// Empty input is rejected rather than producing NaN.
pub fn mean(values: &[f64]) -> Result<f64, AppError> {
    if values.is_empty() {
        return Err(AppError::DegenerateStatistics(
            "mean of empty series is undefined".to_string(),
        ));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (N-1 denominator).
///
/// Needs at least 2 observations; fewer is rejected rather than
/// letting NaN propagate through every downstream computation.
pub fn sample_std_dev(values: &[f64]) -> Result<f64, AppError> {
    if values.len() < 2 {
        return Err(AppError::DegenerateStatistics(format!(
            "sample standard deviation needs at least 2 observations, got {}",
            values.len()
        )));
    }

    let m = mean(values)?;
    let variance = values
        .iter()
        .map(|v| (v - m).powi(2))
        .sum::<f64>()
        / (values.len() as f64 - 1.0);

    Ok(variance.sqrt())
}

/// Day-over-day fractional returns: `r[i] = price[i]/price[i-1] - 1`.
///
/// The undefined first-element return is excluded, so the output has
/// exactly one element fewer than the input.
pub fn daily_returns(prices: &[f64]) -> Result<Vec<f64>, AppError> {
    if prices.len() < 2 {
        return Err(AppError::InvalidInput(format!(
            "need at least 2 prices to compute returns, got {}",
            prices.len()
        )));
    }

    Ok(prices
        .windows(2)
        .map(|w| w[1] / w[0] - 1.0)
        .collect())
}
