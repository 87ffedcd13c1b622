use crate::errors::AppError;
use crate::models::SimulationResult;

/// Output collaborator for simulated paths. Rendering is fire-and-forget;
/// the simulation core never consumes anything a renderer produces.
pub trait ChartRenderer {
    fn render(&self, result: &SimulationResult, display_name: &str) -> Result<(), AppError>;
}

/// Renders the simulated paths to a standalone SVG file, with dashed
/// reference lines for the mean predicted price and the current price.
pub struct SvgChartRenderer {
    pub output_path: String,
}

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;
const MARGIN: f64 = 60.0;

impl SvgChartRenderer {
    pub fn new(output_path: impl Into<String>) -> Self {
        Self { output_path: output_path.into() }
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn render(&self, result: &SimulationResult, display_name: &str) -> Result<(), AppError> {
        let svg = build_svg(result, display_name)?;
        std::fs::write(&self.output_path, svg)
            .map_err(|e| AppError::Render(format!("writing {}: {}", self.output_path, e)))?;
        tracing::info!("Chart written to {}", self.output_path);
        Ok(())
    }
}

fn build_svg(result: &SimulationResult, display_name: &str) -> Result<String, AppError> {
    if result.paths.is_empty() {
        return Err(AppError::Render("no paths to render".to_string()));
    }

    let steps = result.paths.iter().map(|p| p.prices.len()).max().unwrap_or(1);

    let mut y_min = result.last_price.min(result.mean_terminal_price);
    let mut y_max = result.last_price.max(result.mean_terminal_price);
    for path in &result.paths {
        for &price in &path.prices {
            y_min = y_min.min(price);
            y_max = y_max.max(price);
        }
    }
    // Zero-volatility runs collapse to a single price level
    let span = if (y_max - y_min).abs() < f64::EPSILON { 1.0 } else { y_max - y_min };

    let plot_w = WIDTH - 2.0 * MARGIN;
    let plot_h = HEIGHT - 2.0 * MARGIN;
    let x_of = |step: usize| MARGIN + plot_w * step as f64 / (steps.max(2) - 1) as f64;
    let y_of = |price: f64| MARGIN + plot_h * (1.0 - (price - y_min) / span);

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" viewBox=\"0 0 {WIDTH} {HEIGHT}\">\n"
    ));
    svg.push_str(&format!(
        "<rect width=\"{WIDTH}\" height=\"{HEIGHT}\" fill=\"white\"/>\n"
    ));
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"30\" text-anchor=\"middle\" font-size=\"18\">Monte Carlo Simulation for Theoretical Future Price of {}</text>\n",
        WIDTH / 2.0,
        xml_escape(display_name)
    ));

    for path in &result.paths {
        let points: Vec<String> = path
            .prices
            .iter()
            .enumerate()
            .map(|(i, &price)| format!("{:.2},{:.2}", x_of(i), y_of(price)))
            .collect();
        svg.push_str(&format!(
            "<polyline fill=\"none\" stroke=\"steelblue\" stroke-width=\"0.5\" stroke-opacity=\"0.4\" points=\"{}\"/>\n",
            points.join(" ")
        ));
    }

    let mean_y = y_of(result.mean_terminal_price);
    svg.push_str(&format!(
        "<line x1=\"{MARGIN}\" y1=\"{mean_y:.2}\" x2=\"{:.2}\" y2=\"{mean_y:.2}\" stroke=\"green\" stroke-width=\"1\" stroke-dasharray=\"6,4\"/>\n",
        WIDTH - MARGIN
    ));
    svg.push_str(&format!(
        "<text x=\"{MARGIN}\" y=\"{:.2}\" font-size=\"12\" fill=\"green\">Average Predicted Price: {:.2}</text>\n",
        mean_y - 6.0,
        result.mean_terminal_price
    ));

    let last_y = y_of(result.last_price);
    svg.push_str(&format!(
        "<line x1=\"{MARGIN}\" y1=\"{last_y:.2}\" x2=\"{:.2}\" y2=\"{last_y:.2}\" stroke=\"gray\" stroke-width=\"1\" stroke-dasharray=\"6,4\"/>\n",
        WIDTH - MARGIN
    ));
    svg.push_str(&format!(
        "<text x=\"{MARGIN}\" y=\"{:.2}\" font-size=\"12\" fill=\"gray\">Current Price: {:.2}</text>\n",
        last_y - 6.0,
        result.last_price
    ));

    svg.push_str(&format!(
        "<text x=\"{}\" y=\"{:.2}\" text-anchor=\"middle\" font-size=\"14\">Days</text>\n",
        WIDTH / 2.0,
        HEIGHT - 15.0
    ));
    svg.push_str(&format!(
        "<text x=\"20\" y=\"{:.2}\" font-size=\"14\" transform=\"rotate(-90 20 {:.2})\">Stock Price</text>\n",
        HEIGHT / 2.0,
        HEIGHT / 2.0
    ));
    svg.push_str("</svg>\n");

    Ok(svg)
}

fn xml_escape(raw: &str) -> String {
    raw.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
