use crate::errors::{ChartError, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// 单次出站 GET 请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// 查询参数值（测试和日志用）
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used by the chart service for its one outbound call.
#[async_trait]
pub trait HttpClient {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// reqwest-backed transport with a hard timeout on every call
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("stockchart_api/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChartError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse> {
        let response = self.client
            .get(&request.url)
            .query(&request.query)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChartError::fetch_failed(format!("request timeout: {}", e.without_url()))
                } else if e.is_connect() {
                    ChartError::fetch_failed(format!("connection failed: {}", e.without_url()))
                } else {
                    ChartError::fetch_failed(format!("request failed: {}", e.without_url()))
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ChartError::fetch_failed(format!("failed to read response body: {}", e.without_url())))?;

        debug!("上游返回状态 {}，响应 {} 字节", status, body.len());
        Ok(HttpResponse { status, body })
    }
}
