use crate::errors::{ChartError, Result};
use crate::http_client::HttpClient;
use crate::models::chart::{ChartSeries, RangeCode};
use crate::providers::base::{apply_market_suffix, ChartProvider, RawPoint};
use crate::util;
use log::{debug, error, info};
use std::sync::Arc;

// 上游错误响应体最多保留的字符数
const ERROR_BODY_PREVIEW: usize = 200;

/// 图表数据服务：选择数据源查询、发出一次请求并把响应整理成升序价格序列
pub struct ChartService {
    provider: Arc<dyn ChartProvider + Send + Sync>,
    http: Arc<dyn HttpClient + Send + Sync>,
}

impl ChartService {
    pub fn new(
        provider: Arc<dyn ChartProvider + Send + Sync>,
        http: Arc<dyn HttpClient + Send + Sync>,
    ) -> Self {
        Self { provider, http }
    }

    pub fn provider(&self) -> &(dyn ChartProvider + Send + Sync) {
        self.provider.as_ref()
    }

    /// Fetch one chart series for `symbol` over `range`.
    ///
    /// Makes exactly one outbound request. The result is sorted ascending by time;
    /// an empty result is `NoData` rather than an empty success.
    pub async fn fetch_series(&self, symbol: &str, range: RangeCode) -> Result<ChartSeries> {
        let symbol = self.normalize_symbol(symbol)?;
        let query = self.provider.query_for(range);
        info!("Fetching {} chart for {} from {}", range, symbol, self.provider.provider_code());

        let request = self.provider.build_request(&symbol, &query)?;
        let response = self.http.get(request).await.map_err(|e| {
            error!("{} request for {} failed: {}", self.provider.provider_code(), symbol, e);
            e
        })?;

        if !response.is_success() {
            if let Some(err) = self.provider.classify_error(response.status, &response.body) {
                info!("{} reported no data for {} (status {})", self.provider.provider_code(), symbol, response.status);
                return Err(err);
            }
            let preview: String = response.body.chars().take(ERROR_BODY_PREVIEW).collect();
            error!("{} returned status {} for {}", self.provider.provider_code(), response.status, symbol);
            return Err(ChartError::fetch_failed(format!(
                "{} returned status {}: {}",
                self.provider.provider_code(),
                response.status,
                preview
            )));
        }

        let mut points = self.provider.extract_points(&response.body)?;
        debug!("提取到 {} 个原始价格点", points.len());

        // 各数据源的原始顺序不同，统一按时间升序（稳定排序）
        points.sort_by_key(|p| p.time);

        if let Some(window) = query.window {
            util::limit_points(&mut points, window, &symbol);
        }

        if points.is_empty() {
            info!("No chart data for {} ({})", symbol, range);
            return Err(ChartError::NoData);
        }

        Ok(points.into_iter().map(RawPoint::into_price_point).collect())
    }

    fn normalize_symbol(&self, symbol: &str) -> Result<String> {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(ChartError::MissingParameter("symbol".to_string()));
        }
        Ok(apply_market_suffix(&symbol, self.provider.market_suffix()))
    }
}
