use crate::errors::{ChartError, Result};
use crate::http_client::HttpRequest;
use crate::models::chart::{parse_price, RangeCode};
use crate::providers::base::{ChartProvider, ProviderQuery, RawPoint};
use crate::util;
use log::{debug, warn};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";
pub const DEFAULT_SUFFIX: &str = ".BSE";

/// Alpha Vantage has no period parameter, so every range also carries a point window.
fn range_params(range: RangeCode) -> (&'static str, &'static str, Option<usize>) {
    match range {
        RangeCode::OneDay => ("TIME_SERIES_INTRADAY", "15min", Some(26)),
        RangeCode::FiveDays => ("TIME_SERIES_INTRADAY", "60min", Some(35)),
        RangeCode::OneMonth => ("TIME_SERIES_DAILY", "daily", Some(22)),
        RangeCode::SixMonths => ("TIME_SERIES_WEEKLY", "weekly", Some(26)),
        RangeCode::OneYear => ("TIME_SERIES_WEEKLY", "weekly", Some(52)),
        RangeCode::Max => ("TIME_SERIES_MONTHLY", "monthly", None),
    }
}

/// Alpha Vantage 时间序列接口
pub struct AlphaVantageProvider {
    base_url: String,
    suffix: String,
    api_key: SecretString,
}

impl AlphaVantageProvider {
    pub fn new(api_key: SecretString) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
            api_key,
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

impl ChartProvider for AlphaVantageProvider {
    fn provider_code(&self) -> &'static str {
        "alphavantage"
    }

    fn market_suffix(&self) -> &str {
        &self.suffix
    }

    fn query_for(&self, range: RangeCode) -> ProviderQuery {
        let (function, interval, window) = range_params(range);
        ProviderQuery {
            params: vec![("function", function), ("interval", interval)],
            window,
        }
    }

    fn build_request(&self, symbol: &str, query: &ProviderQuery) -> Result<HttpRequest> {
        let intraday = query
            .params
            .iter()
            .any(|(k, v)| *k == "function" && *v == "TIME_SERIES_INTRADAY");

        let mut request = HttpRequest::get(format!("{}/query", self.base_url));
        for (name, value) in &query.params {
            // interval 仅对日内接口有效
            if *name == "interval" && !intraday {
                continue;
            }
            request = request.with_query(*name, *value);
        }

        Ok(request
            .with_query("symbol", symbol)
            .with_query("apikey", self.api_key.expose_secret()))
    }

    fn extract_points(&self, body: &str) -> Result<Vec<RawPoint>> {
        let payload: Value = serde_json::from_str(body)?;
        let root = payload
            .as_object()
            .ok_or_else(|| ChartError::fetch_failed("alphavantage response is not a JSON object"))?;

        // 错误与限流提示都以 200 返回
        for key in ["Error Message", "Note", "Information"] {
            if let Some(message) = root.get(key).and_then(Value::as_str) {
                return Err(ChartError::fetch_failed(format!("alphavantage: {}", message)));
            }
        }

        let series = match root
            .iter()
            .find(|(key, _)| key.contains("Time Series"))
            .and_then(|(_, value)| value.as_object())
        {
            Some(series) => series,
            None => return Ok(Vec::new()),
        };

        let tz = util::resolve_timezone(meta_timezone(root));

        let mut points = Vec::with_capacity(series.len());
        for (timestamp, bar) in series {
            match util::parse_exchange_timestamp(timestamp, tz) {
                Some(time) => points.push(RawPoint {
                    time,
                    price: parse_price(bar.get("4. close")),
                }),
                None => warn!("Skipping alphavantage row with invalid timestamp {}", timestamp),
            }
        }

        debug!("alphavantage 返回 {} 个价格点", points.len());
        Ok(points)
    }
}

// "Meta Data" 中的时区键名随接口不同（"5. Time Zone" / "6. Time Zone"）
fn meta_timezone(root: &Map<String, Value>) -> Option<&str> {
    root.get("Meta Data")?
        .as_object()?
        .iter()
        .find(|(key, _)| key.contains("Time Zone"))
        .and_then(|(_, value)| value.as_str())
}
