use crate::external::price_provider::{
    ExternalPricePoint, PriceHistory, PriceProvider, PriceProviderError,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use serde::Deserialize;

pub struct YahooProvider {
    client: reqwest::Client,
}

impl YahooProvider {
    pub fn new() -> Self {
        Self { client: reqwest::Client::new() }
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

// Minimal response structs (only what we need)
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    #[allow(dead_code)]
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    meta: YahooMeta,
    timestamp: Vec<i64>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooMeta {
    #[serde(rename = "shortName")]
    short_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Vec<Option<f64>>,
}

fn unix_seconds(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

#[async_trait]
impl PriceProvider for YahooProvider {
    async fn fetch_close_history(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceHistory, PriceProviderError> {
        let period1 = unix_seconds(start);
        // Yahoo treats period2 as exclusive, so push it one day past `end`.
        let period2 = unix_seconds(end) + 86_400;

        let url = format!(
            "https://query1.finance.yahoo.com/v8/finance/chart/{ticker}?period1={period1}&period2={period2}&interval=1d"
        );

        let resp = self.client
            .get(url)
            .send()
            .await
            .map_err(|e| PriceProviderError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PriceProviderError::RateLimited);
        }

        let body = resp
            .json::<YahooChartResponse>()
            .await
            .map_err(|e| PriceProviderError::Parse(e.to_string()))?;

        let result = body.chart.result
            .and_then(|mut r| r.pop())
            .ok_or_else(|| PriceProviderError::BadResponse("missing result".into()))?;

        // timestamp aligns with close list by index
        let closes = result.indicators.quote
            .first()
            .ok_or_else(|| PriceProviderError::BadResponse("missing quote".into()))?
            .close
            .clone();

        let mut points = Vec::new();

        for (i, ts) in result.timestamp.iter().enumerate() {
            let close = closes.get(i).and_then(|v| *v);

            // skip missing closes
            let Some(close) = close else { continue };

            let dt = DateTime::from_timestamp(*ts, 0)
                .ok_or_else(|| PriceProviderError::Parse("bad timestamp".into()))?;

            points.push(ExternalPricePoint {
                date: dt.date_naive(),
                close,
            });
        }

        // Ensure ascending by date
        points.sort_by_key(|p| p.date);

        let display_name = result.meta.short_name
            .unwrap_or_else(|| ticker.to_string());

        Ok(PriceHistory {
            symbol: ticker.to_string(),
            display_name,
            points,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_seconds_epoch() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(unix_seconds(date), 0);
    }

    #[test]
    fn test_chart_response_parses_and_skips_missing_closes() {
        let raw = r#"{
            "chart": {
                "result": [{
                    "meta": { "shortName": "Test Corp" },
                    "timestamp": [1704067200, 1704153600, 1704240000],
                    "indicators": { "quote": [{ "close": [100.0, null, 102.5] }] }
                }],
                "error": null
            }
        }"#;

        let body: YahooChartResponse = serde_json::from_str(raw).unwrap();
        let result = body.chart.result.unwrap().pop().unwrap();
        assert_eq!(result.meta.short_name.as_deref(), Some("Test Corp"));
        assert_eq!(result.timestamp.len(), 3);
        assert_eq!(result.indicators.quote[0].close[1], None);
    }
}
