use crate::errors::{ChartError, Result};
use crate::http_client::HttpRequest;
use crate::models::chart::{parse_price, RangeCode};
use crate::providers::base::{ChartProvider, ProviderQuery, RawPoint};
use crate::util;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_SUFFIX: &str = ".NS";

// Yahoo 对未知代码返回的 chart.error.code
const NOT_FOUND_CODE: &str = "Not Found";

// 范围 -> (period, interval)
fn range_params(range: RangeCode) -> (&'static str, &'static str) {
    match range {
        RangeCode::OneDay => ("1d", "15m"),
        RangeCode::FiveDays => ("5d", "1h"),
        RangeCode::OneMonth => ("1mo", "1d"),
        RangeCode::SixMonths => ("6mo", "1wk"),
        RangeCode::OneYear => ("1y", "1wk"),
        RangeCode::Max => ("max", "1mo"),
    }
}

/// Yahoo Finance chart API (v8)
pub struct YahooProvider {
    base_url: String,
    suffix: String,
}

impl YahooProvider {
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = suffix.to_string();
        self
    }
}

impl Default for YahooProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartProvider for YahooProvider {
    fn provider_code(&self) -> &'static str {
        "yahoo"
    }

    fn market_suffix(&self) -> &str {
        &self.suffix
    }

    fn query_for(&self, range: RangeCode) -> ProviderQuery {
        let (period, interval) = range_params(range);

        ProviderQuery {
            params: vec![("range", period), ("interval", interval)],
            window: None,
        }
    }

    fn build_request(&self, symbol: &str, query: &ProviderQuery) -> Result<HttpRequest> {
        let mut request = HttpRequest::get(self.chart_url(symbol)?);
        for (name, value) in &query.params {
            request = request.with_query(*name, *value);
        }
        Ok(request)
    }

    fn extract_points(&self, body: &str) -> Result<Vec<RawPoint>> {
        let response: YahooChartResponse = serde_json::from_str(body)?;

        if let Some(error) = response.chart.error {
            return Err(error.into_chart_error());
        }

        let result = match response.chart.result.and_then(|r| r.into_iter().next()) {
            Some(result) => result,
            None => return Ok(Vec::new()),
        };

        let timestamps = result.timestamp.unwrap_or_default();
        let closes = result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|q| q.close)
            .unwrap_or_default();

        // 时间戳与收盘价按下标对齐
        let mut points = Vec::with_capacity(timestamps.len());
        for (i, ts) in timestamps.into_iter().enumerate() {
            match util::unix_to_utc(ts) {
                Some(time) => points.push(RawPoint {
                    time,
                    price: parse_price(closes.get(i)),
                }),
                None => warn!("Skipping yahoo row with invalid timestamp {}", ts),
            }
        }

        debug!("yahoo 返回 {} 个价格点", points.len());
        Ok(points)
    }

    // 未知代码时 Yahoo 返回 404 和 chart.error
    fn classify_error(&self, _status: u16, body: &str) -> Option<ChartError> {
        let response: YahooChartResponse = serde_json::from_str(body).ok()?;
        match response.chart.error {
            Some(error) if error.is_not_found() => Some(ChartError::NoData),
            _ => None,
        }
    }
}

impl YahooProvider {
    /// `{base}/v8/finance/chart/{symbol}` with the symbol percent-encoded as one path segment.
    fn chart_url(&self, symbol: &str) -> Result<String> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ChartError::Config(format!("invalid yahoo base url {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ChartError::Config(format!("yahoo base url {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        Ok(url.into())
    }
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Deserialize)]
struct YahooChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

impl YahooChartError {
    fn is_not_found(&self) -> bool {
        self.code.eq_ignore_ascii_case(NOT_FOUND_CODE)
    }

    fn into_chart_error(self) -> ChartError {
        if self.is_not_found() {
            return ChartError::NoData;
        }
        ChartError::fetch_failed(format!("yahoo chart error {}: {}", self.code, self.description))
    }
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: YahooIndicators,
}

#[derive(Debug, Default, Deserialize)]
struct YahooIndicators {
    #[serde(default)]
    quote: Vec<YahooQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    #[serde(default)]
    close: Vec<Value>,
}
