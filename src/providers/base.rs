use crate::errors::{ChartError, Result};
use crate::http_client::HttpRequest;
use crate::models::chart::{PricePoint, RangeCode};
use chrono::{DateTime, SecondsFormat, Utc};

/// Provider-specific query for one range: the provider's own parameter vocabulary,
/// plus an optional most-recent-N cap for providers without a native period parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderQuery {
    pub params: Vec<(&'static str, &'static str)>,
    pub window: Option<usize>,
}

/// 从数据源响应中提取出的原始价格点
#[derive(Debug, Clone, PartialEq)]
pub struct RawPoint {
    pub time: DateTime<Utc>,
    pub price: Option<f64>,
}

impl RawPoint {
    pub fn into_price_point(self) -> PricePoint {
        PricePoint {
            time: self.time.to_rfc3339_opts(SecondsFormat::Secs, false),
            price: self.price,
        }
    }
}

/// Base trait for chart data providers
pub trait ChartProvider {
    /// Short provider name used in logs and error details
    fn provider_code(&self) -> &'static str;

    /// Suffix appended to symbols that carry no market qualifier, e.g. ".NS"
    fn market_suffix(&self) -> &str;

    /// Resolve a range through this provider's range table
    fn query_for(&self, range: RangeCode) -> ProviderQuery;

    /// Build the single outbound GET for an already-suffixed symbol
    fn build_request(&self, symbol: &str, query: &ProviderQuery) -> Result<HttpRequest>;

    /// Pull (time, close) pairs out of a 2xx response body.
    /// Provider-level error objects must come back as `FetchFailed`.
    fn extract_points(&self, body: &str) -> Result<Vec<RawPoint>>;

    /// Recognize a non-2xx body that means "no such symbol" rather than an upstream failure.
    /// `None` leaves the response to be reported as `FetchFailed`.
    fn classify_error(&self, _status: u16, _body: &str) -> Option<ChartError> {
        None
    }
}

/// 若代码中没有市场分隔符，则追加默认后缀（分隔符为后缀的首字符）
pub fn apply_market_suffix(symbol: &str, suffix: &str) -> String {
    match suffix.chars().next() {
        Some(separator) if !symbol.contains(separator) => format!("{}{}", symbol, suffix),
        _ => symbol.to_string(),
    }
}
