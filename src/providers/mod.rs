pub mod alphavantage;
pub mod base;
pub mod twelvedata;
pub mod yahoo;

use crate::config::Config;
use crate::errors::{ChartError, Result};
use alphavantage::AlphaVantageProvider;
use base::ChartProvider;
use log::info;
use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use twelvedata::TwelveDataProvider;
use yahoo::YahooProvider;

/// 可选的行情数据源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Yahoo,
    AlphaVantage,
    TwelveData,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Yahoo => "yahoo",
            ProviderKind::AlphaVantage => "alphavantage",
            ProviderKind::TwelveData => "twelvedata",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ProviderKind::Yahoo)
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" => Ok(ProviderKind::Yahoo),
            "alphavantage" | "alpha_vantage" => Ok(ProviderKind::AlphaVantage),
            "twelvedata" | "twelve_data" => Ok(ProviderKind::TwelveData),
            other => Err(ChartError::Config(format!("Unknown provider: {}", other))),
        }
    }
}

/// Build the configured provider. Key-based providers fail here when no key is set.
pub fn build_provider(config: &Config) -> Result<Arc<dyn ChartProvider + Send + Sync>> {
    let api_key = || -> Result<SecretString> {
        config
            .api_key
            .as_ref()
            .map(|k| SecretString::from(k.expose_secret().to_string()))
            .ok_or_else(|| {
                ChartError::Config(format!(
                    "STOCKCHART_API_KEY must be set for provider {}",
                    config.provider
                ))
            })
    };

    let provider: Arc<dyn ChartProvider + Send + Sync> = match config.provider {
        ProviderKind::Yahoo => {
            let mut p = YahooProvider::new();
            if let Some(url) = &config.base_url {
                p = p.with_base_url(url);
            }
            if let Some(suffix) = &config.market_suffix {
                p = p.with_suffix(suffix);
            }
            Arc::new(p)
        }
        ProviderKind::AlphaVantage => {
            let mut p = AlphaVantageProvider::new(api_key()?);
            if let Some(url) = &config.base_url {
                p = p.with_base_url(url);
            }
            if let Some(suffix) = &config.market_suffix {
                p = p.with_suffix(suffix);
            }
            Arc::new(p)
        }
        ProviderKind::TwelveData => {
            let mut p = TwelveDataProvider::new(api_key()?);
            if let Some(url) = &config.base_url {
                p = p.with_base_url(url);
            }
            if let Some(suffix) = &config.market_suffix {
                p = p.with_suffix(suffix);
            }
            Arc::new(p)
        }
    };

    info!("Using chart provider {} (market suffix {:?})",
          provider.provider_code(), provider.market_suffix());
    Ok(provider)
}
