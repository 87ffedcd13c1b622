mod config;
mod errors;
mod external;
mod logging;
mod models;
mod render;
mod services;

use crate::config::SimulationConfig;
use crate::errors::AppError;
use crate::external::price_provider::PriceProvider;
use crate::external::yahoo::YahooProvider;
use crate::logging::{init_logging, LoggingConfig};
use crate::models::SimulationParams;
use crate::render::chart::{ChartRenderer, SvgChartRenderer};
use crate::services::simulation_service;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging FIRST
    let logging_config = LoggingConfig::from_env();
    init_logging(&logging_config).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let config = SimulationConfig::from_env()?;
    tracing::info!(
        "Fetching {} closes from {} to {}",
        config.ticker, config.start_date, config.end_date
    );

    let provider = YahooProvider::new();
    let history = provider
        .fetch_close_history(&config.ticker, config.start_date, config.end_date)
        .await?;

    tracing::info!(
        "Fetched {} closes for {} ({})",
        history.points.len(),
        history.symbol,
        history.display_name
    );

    if history.points.len() < 2 {
        return Err(AppError::DataUnavailable(format!(
            "{} close prices returned for {} between {} and {}",
            history.points.len(),
            config.ticker,
            config.start_date,
            config.end_date
        ))
        .into());
    }

    let params = SimulationParams {
        num_simulations: config.num_simulations,
        num_days: config.num_days,
    };
    let result =
        simulation_service::run_simulation(&config.ticker, &history.closes(), params)?;

    let renderer = SvgChartRenderer::new(&config.chart_path);
    renderer.render(&result, &history.display_name)?;

    println!(
        "\nAverage predicted price after all simulations with Monte Carlo: {:.2}",
        result.mean_terminal_price
    );

    Ok(())
}
