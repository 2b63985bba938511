// 公开导出的模块，供外部使用
pub mod api;
pub mod config;
pub mod errors;
pub mod http_client;
pub mod models;
pub mod providers;
pub mod services;

#[doc(hidden)]
pub mod util;

// 重新导出常用类型，方便使用
pub use api::{router, AppState};
pub use config::Config;
pub use errors::{ChartError, Result};
pub use models::chart::{ChartSeries, PricePoint, RangeCode};
pub use models::company::CompanyRecord;
pub use providers::ProviderKind;
pub use services::chart_service::ChartService;
pub use services::company_search::CompanySearch;
