use crate::errors::{ChartError, Result};
use crate::providers::ProviderKind;
use secrecy::SecretString;
use std::time::Duration;

#[derive(Debug)]
pub struct Config {
    pub provider: ProviderKind,
    pub api_key: Option<SecretString>,
    pub market_suffix: Option<String>, // None 表示使用数据源默认后缀
    pub base_url: Option<String>,
    pub dataset_path: String,
    pub search_limit: usize,
    pub request_timeout: Duration,
    pub bind_addr: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            provider: ProviderKind::Yahoo,
            api_key: None,
            market_suffix: None,
            base_url: None,
            dataset_path: "data/EQUITY_L.csv".to_string(),
            search_limit: 50,
            request_timeout: Duration::from_secs(10),
            bind_addr: "127.0.0.1:8000".to_string(),
        }
    }

    /// Defaults overlaid with `STOCKCHART_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::new();

        if let Some(provider) = get("STOCKCHART_PROVIDER") {
            config.provider = provider.parse()?;
        }
        if let Some(key) = get("STOCKCHART_API_KEY") {
            config = config.with_api_key(&key);
        }
        if let Some(suffix) = get("STOCKCHART_MARKET_SUFFIX") {
            config.market_suffix = Some(suffix);
        }
        if let Some(url) = get("STOCKCHART_BASE_URL") {
            config.base_url = Some(url);
        }
        if let Some(path) = get("STOCKCHART_DATASET") {
            config.dataset_path = path;
        }
        if let Some(limit) = get("STOCKCHART_SEARCH_LIMIT") {
            config.search_limit = positive("STOCKCHART_SEARCH_LIMIT", &limit)?;
        }
        if let Some(secs) = get("STOCKCHART_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(positive("STOCKCHART_TIMEOUT_SECS", &secs)?);
        }
        if let Some(addr) = get("STOCKCHART_BIND") {
            config.bind_addr = addr;
        }

        Ok(config)
    }

    pub fn with_provider(mut self, provider: ProviderKind) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(SecretString::from(key.to_string()));
        self
    }

    pub fn with_market_suffix(mut self, suffix: &str) -> Self {
        self.market_suffix = Some(suffix.to_string());
        self
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    pub fn with_dataset_path(mut self, path: &str) -> Self {
        self.dataset_path = path.to_string();
        self
    }

    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_bind_addr(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }
}

// 搜索上限和超时为 0 都没有意义
fn positive<T>(name: &str, value: &str) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::fmt::Display,
{
    let parsed = value
        .parse::<T>()
        .map_err(|e| ChartError::Config(format!("{}: {}", name, e)))?;
    if parsed == T::default() {
        return Err(ChartError::Config(format!("{} must be greater than zero", name)));
    }
    Ok(parsed)
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
