use crate::errors::{ChartError, Result};
use crate::http_client::HttpRequest;
use crate::models::chart::{parse_price, RangeCode};
use crate::providers::base::{ChartProvider, ProviderQuery, RawPoint};
use crate::util;
use log::{debug, warn};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.twelvedata.com";
pub const DEFAULT_SUFFIX: &str = ":NSE";

// 范围 -> (interval, outputsize)
fn range_params(range: RangeCode) -> (&'static str, &'static str) {
    match range {
        RangeCode::OneDay => ("15min", "26"),
        RangeCode::FiveDays => ("1h", "35"),
        RangeCode::OneMonth => ("1day", "22"),
        RangeCode::SixMonths => ("1week", "26"),
        RangeCode::OneYear => ("1week", "52"),
        RangeCode::Max => ("1month", "5000"),
    }
}

/// Twelve Data `time_series` endpoint
pub struct TwelveDataProvider {
    base_url: String,
    suffix: String,
    api_key: SecretString,
}

impl TwelveDataProvider {
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

impl ChartProvider for TwelveDataProvider {
    fn provider_code(&self) -> &'static str {
        "twelvedata"
    }

    fn market_suffix(&self) -> &str {
        &self.suffix
    }

    fn query_for(&self, range: RangeCode) -> ProviderQuery {
        let (interval, outputsize) = range_params(range);
        ProviderQuery {
            params: vec![("interval", interval), ("outputsize", outputsize)],
            // outputsize already bounds the response
            window: None,
        }
    }

    fn build_request(&self, symbol: &str, query: &ProviderQuery) -> Result<HttpRequest> {
        let mut request = HttpRequest::get(format!("{}/time_series", self.base_url))
            .with_query("symbol", symbol);
        for (name, value) in &query.params {
            request = request.with_query(*name, *value);
        }
        Ok(request.with_query("apikey", self.api_key.expose_secret()))
    }

    fn extract_points(&self, body: &str) -> Result<Vec<RawPoint>> {
        let response: TwelveDataResponse = serde_json::from_str(body)?;

        if response.status.as_deref() == Some("error") {
            return Err(ChartError::fetch_failed(format!(
                "twelvedata error {}: {}",
                response.code.map(|c| c.to_string()).unwrap_or_default(),
                response.message.unwrap_or_default()
            )));
        }

        let tz = util::resolve_timezone(
            response.meta.as_ref().and_then(|m| m.exchange_timezone.as_deref()),
        );

        let values = response.values.unwrap_or_default();
        let mut points = Vec::with_capacity(values.len());
        for value in values {
            match util::parse_exchange_timestamp(&value.datetime, tz) {
                Some(time) => points.push(RawPoint {
                    time,
                    price: parse_price(value.close.as_ref()),
                }),
                None => warn!("Skipping twelvedata row with invalid datetime {}", value.datetime),
            }
        }

        debug!("twelvedata 返回 {} 个价格点", points.len());
        Ok(points)
    }
}

#[derive(Debug, Deserialize)]
struct TwelveDataResponse {
    #[serde(default)]
    meta: Option<TwelveDataMeta>,
    #[serde(default)]
    values: Option<Vec<TwelveDataValue>>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwelveDataMeta {
    #[serde(default)]
    exchange_timezone: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TwelveDataValue {
    datetime: String,
    #[serde(default)]
    close: Option<Value>,
}
