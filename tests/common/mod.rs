#![allow(dead_code)]

use async_trait::async_trait;
use std::io::Write;
use std::sync::{Arc, Mutex};
use stockchart_api::errors::{ChartError, Result};
use stockchart_api::http_client::{HttpClient, HttpRequest, HttpResponse};
use stockchart_api::providers::base::ChartProvider;
use stockchart_api::ChartService;

/// Fake transport: returns a canned response and records every request it sees.
pub struct RecordingHttpClient {
    response: std::result::Result<HttpResponse, String>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingHttpClient {
    pub fn ok(body: &str) -> Arc<Self> {
        Self::with_status(200, body)
    }

    pub fn with_status(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(HttpResponse {
                status,
                body: body.to_string(),
            }),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Err(message.to_string()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .clone()
    }
}

#[async_trait]
impl HttpClient for RecordingHttpClient {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests
            .lock()
            .expect("request store should not be poisoned")
            .push(request);
        self.response
            .clone()
            .map_err(|message| ChartError::fetch_failed(format!("connection failed: {}", message)))
    }
}

pub fn service(
    provider: Arc<dyn ChartProvider + Send + Sync>,
    http: Arc<RecordingHttpClient>,
) -> ChartService {
    ChartService::new(provider, http)
}

pub fn dataset(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write dataset");
    file
}

pub const EQUITY_L: &str = "\
SYMBOL,NAME OF COMPANY, SERIES, DATE OF LISTING, PAID UP VALUE, MARKET LOT, ISIN NUMBER, FACE VALUE
INFY,Infosys Limited,EQ,08-FEB-1995,5,1,INE009A01021,5
TATACOMM,Tata Communications Limited,EQ,17-JAN-2005,10,1,INE151A01013,10
TCS,Tata Consultancy Services Limited,EQ,25-AUG-2004,1,1,INE467B01029,1
TCSX,TCS Extra Limited,EQ,01-JAN-2020,1,1,INE000000000,1
";

/// Yahoo chart payload; closes listed in timestamp order.
pub fn yahoo_body(timestamps: &[i64], closes: &[&str]) -> String {
    format!(
        r#"{{"chart":{{"result":[{{"meta":{{"symbol":"TCS.NS"}},"timestamp":[{}],"indicators":{{"quote":[{{"close":[{}]}}]}}}}],"error":null}}}}"#,
        timestamps.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(","),
        closes.join(",")
    )
}

/// What Yahoo sends, with HTTP 404, for a symbol it does not know.
pub const YAHOO_NOT_FOUND: &str = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
