use crate::api::AppState;
use crate::errors::{ChartError, Result};
use crate::models::chart::{ChartSeries, RangeCode};
use crate::models::company::CompanyRecord;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ChartParams {
    pub symbol: Option<String>,
    pub range: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

// 查询串解析失败（如重复参数）同样返回 JSON 错误体
fn query_params<T>(query: std::result::Result<Query<T>, QueryRejection>) -> Result<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ChartError::InvalidQuery(rejection.body_text()))
}

/// GET /stock_chart/?symbol=..&range=..
pub async fn stock_chart(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<ChartParams>, QueryRejection>,
) -> Result<Json<ChartSeries>> {
    let params = query_params(query)?;
    let symbol = params.symbol.unwrap_or_default();
    if symbol.trim().is_empty() {
        return Err(ChartError::MissingParameter("symbol".to_string()));
    }

    // 未提供 range 时默认 1D；提供了但无法识别则拒绝
    let range = match params.range.as_deref() {
        Some(range) => range.parse::<RangeCode>()?,
        None => RangeCode::default(),
    };

    let series = state.chart.fetch_series(&symbol, range).await?;
    Ok(Json(series))
}

/// GET /search/?q=..
pub async fn search(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<CompanyRecord>>> {
    let params = query_params(query)?;
    let query = params.q.unwrap_or_default();

    let results = tokio::task::spawn_blocking(move || state.companies.search(&query))
        .await
        .map_err(|e| ChartError::DatasetUnavailable(format!("search task failed: {}", e)))??;

    Ok(Json(results))
}
