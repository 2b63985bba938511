use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Missing {0} parameter")]
    MissingParameter(String),

    #[error("Invalid range parameter: {0}")]
    InvalidRange(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Failed to fetch stock data: {details}")]
    FetchFailed { details: String },

    #[error("Invalid symbol or no data available")]
    NoData,

    #[error("Company dataset unavailable: {0}")]
    DatasetUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChartError {
    pub fn fetch_failed(details: impl Into<String>) -> Self {
        ChartError::FetchFailed { details: details.into() }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;

// 上游响应解析错误视为抓取失败
impl From<serde_json::Error> for ChartError {
    fn from(e: serde_json::Error) -> Self {
        ChartError::fetch_failed(format!("malformed response body: {}", e))
    }
}

impl From<csv::Error> for ChartError {
    fn from(e: csv::Error) -> Self {
        ChartError::DatasetUnavailable(e.to_string())
    }
}
