pub mod error;
pub mod handlers;

use crate::config::Config;
use crate::errors::Result;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::providers;
use crate::services::chart_service::ChartService;
use crate::services::company_search::CompanySearch;
use axum::http::Method;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// 请求间共享的只读状态
pub struct AppState {
    pub chart: ChartService,
    pub companies: CompanySearch,
}

impl AppState {
    pub fn new(chart: ChartService, companies: CompanySearch) -> Self {
        Self { chart, companies }
    }

    /// Wire the configured provider, a reqwest transport and the CSV dataset together.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = providers::build_provider(config)?;
        let http: Arc<dyn HttpClient + Send + Sync> =
            Arc::new(ReqwestHttpClient::new(config.request_timeout)?);
        let chart = ChartService::new(provider, http);
        let companies = CompanySearch::new(&config.dataset_path, config.search_limit);
        Ok(Self::new(chart, companies))
    }
}

/// Routes are served at the root and again under `/api`.
pub fn router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/stock_chart/", get(handlers::stock_chart))
        .route("/search/", get(handlers::search));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .layer(cors)
        .with_state(state)
}
