mod common;

use common::{service, yahoo_body, RecordingHttpClient, YAHOO_NOT_FOUND};
use secrecy::SecretString;
use std::sync::Arc;
use stockchart_api::providers::alphavantage::AlphaVantageProvider;
use stockchart_api::providers::twelvedata::TwelveDataProvider;
use stockchart_api::providers::yahoo::YahooProvider;
use stockchart_api::{ChartError, RangeCode};

fn alpha_vantage() -> Arc<AlphaVantageProvider> {
    Arc::new(AlphaVantageProvider::new(SecretString::from("av-key".to_string())))
}

fn twelve_data() -> Arc<TwelveDataProvider> {
    Arc::new(TwelveDataProvider::new(SecretString::from("td-key".to_string())))
}

fn times(series: &[stockchart_api::PricePoint]) -> Vec<&str> {
    series.iter().map(|p| p.time.as_str()).collect()
}

#[tokio::test]
async fn yahoo_series_is_ascending_with_nan_as_null() {
    // rows deliberately out of order
    let body = yahoo_body(
        &[1714623300, 1714621500, 1714622400],
        &[r#""7""#, r#""10.5""#, r#""NaN""#],
    );
    let http = RecordingHttpClient::ok(&body);
    let chart = service(Arc::new(YahooProvider::new()), http.clone());

    let series = chart.fetch_series("tcs", RangeCode::OneDay).await.unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(
        times(&series),
        vec![
            "2024-05-02T03:45:00+00:00",
            "2024-05-02T04:00:00+00:00",
            "2024-05-02T04:15:00+00:00",
        ]
    );
    assert_eq!(series[0].price, Some(10.5));
    assert_eq!(series[1].price, None);
    assert_eq!(series[2].price, Some(7.0));
}

#[tokio::test]
async fn unsuffixed_symbol_gets_provider_default_suffix() {
    let http = RecordingHttpClient::ok(&yahoo_body(&[1714621500], &["1.0"]));
    let chart = service(Arc::new(YahooProvider::new()), http.clone());
    chart.fetch_series(" tcs ", RangeCode::FiveDays).await.unwrap();

    let requests = http.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].url.ends_with("/v8/finance/chart/TCS.NS"));
    assert_eq!(requests[0].query_value("range"), Some("5d"));
    assert_eq!(requests[0].query_value("interval"), Some("1h"));
}

#[tokio::test]
async fn twelve_data_uses_colon_suffix() {
    let body = r#"{"meta":{"exchange_timezone":"Asia/Kolkata"},
        "values":[{"datetime":"2024-05-02","close":"3925.0"}],"status":"ok"}"#;
    let http = RecordingHttpClient::ok(body);
    let chart = service(twelve_data(), http.clone());
    chart.fetch_series("TCS", RangeCode::OneMonth).await.unwrap();

    let requests = http.requests();
    assert_eq!(requests[0].query_value("symbol"), Some("TCS:NSE"));
    assert_eq!(requests[0].query_value("interval"), Some("1day"));
}

#[tokio::test]
async fn qualified_symbol_is_sent_unchanged() {
    let http = RecordingHttpClient::ok(&yahoo_body(&[1714621500], &["1.0"]));
    let chart = service(Arc::new(YahooProvider::new()), http.clone());
    chart.fetch_series("tcs.bo", RangeCode::OneDay).await.unwrap();

    assert!(http.requests()[0].url.ends_with("/TCS.BO"));
}

#[tokio::test]
async fn alpha_vantage_newest_first_is_reversed_and_windowed() {
    // 30 daily bars, newest first; 1M keeps the most recent 22
    let mut rows = Vec::new();
    for day in (1..=30).rev() {
        rows.push(format!(
            r#""2024-01-{:02}": {{"1. open": "1.0", "4. close": "{}.0"}}"#,
            day, day
        ));
    }
    let body = format!(
        r#"{{"Meta Data": {{"5. Time Zone": "UTC"}}, "Time Series (Daily)": {{{}}}}}"#,
        rows.join(",")
    );

    let http = RecordingHttpClient::ok(&body);
    let chart = service(alpha_vantage(), http.clone());
    let series = chart.fetch_series("RELIANCE", RangeCode::OneMonth).await.unwrap();

    assert_eq!(series.len(), 22);
    assert_eq!(series.first().unwrap().time, "2024-01-09T00:00:00+00:00");
    assert_eq!(series.last().unwrap().time, "2024-01-30T00:00:00+00:00");
    assert_eq!(series.last().unwrap().price, Some(30.0));
    assert!(series.windows(2).all(|w| w[0].time < w[1].time));

    let request = &http.requests()[0];
    assert_eq!(request.query_value("symbol"), Some("RELIANCE.BSE"));
    assert_eq!(request.query_value("function"), Some("TIME_SERIES_DAILY"));
}

#[tokio::test]
async fn empty_payload_is_no_data() {
    let http = RecordingHttpClient::ok(&yahoo_body(&[], &[]));
    let chart = service(Arc::new(YahooProvider::new()), http);

    let err = chart.fetch_series("TCS", RangeCode::OneYear).await.unwrap_err();
    assert!(matches!(err, ChartError::NoData));
}

#[tokio::test]
async fn empty_twelve_data_values_are_no_data() {
    let http = RecordingHttpClient::ok(r#"{"meta":{},"values":[],"status":"ok"}"#);
    let chart = service(twelve_data(), http);

    let err = chart.fetch_series("TCS", RangeCode::Max).await.unwrap_err();
    assert!(matches!(err, ChartError::NoData));
}

#[tokio::test]
async fn non_2xx_is_fetch_failed_with_status() {
    let http = RecordingHttpClient::with_status(503, "Service Unavailable");
    let chart = service(Arc::new(YahooProvider::new()), http);

    let err = chart.fetch_series("TCS", RangeCode::OneDay).await.unwrap_err();
    match err {
        ChartError::FetchFailed { details } => {
            assert!(details.contains("503"));
            assert!(details.contains("Service Unavailable"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn yahoo_unknown_symbol_is_no_data() {
    let http = RecordingHttpClient::with_status(404, YAHOO_NOT_FOUND);
    let chart = service(Arc::new(YahooProvider::new()), http.clone());

    let err = chart.fetch_series("NOSUCHCO", RangeCode::OneMonth).await.unwrap_err();
    assert!(matches!(err, ChartError::NoData));
    assert_eq!(http.requests().len(), 1);
}

#[tokio::test]
async fn non_2xx_from_other_providers_stays_fetch_failed() {
    // Twelve Data does not classify error bodies
    let http = RecordingHttpClient::with_status(404, YAHOO_NOT_FOUND);
    let chart = service(twelve_data(), http);

    let err = chart.fetch_series("TCS", RangeCode::OneDay).await.unwrap_err();
    assert!(matches!(err, ChartError::FetchFailed { ref details } if details.contains("404")));
}

#[tokio::test]
async fn special_characters_stay_inside_the_yahoo_symbol() {
    let http = RecordingHttpClient::ok(&yahoo_body(&[1714621500], &["1.0"]));
    let chart = service(Arc::new(YahooProvider::new()), http.clone());
    chart.fetch_series("tcs?range=max", RangeCode::OneDay).await.unwrap();

    let requests = http.requests();
    assert!(requests[0].url.ends_with("/v8/finance/chart/TCS%3FRANGE=MAX.NS"));
    assert_eq!(requests[0].query_value("range"), Some("1d"));
}

#[tokio::test]
async fn transport_error_is_fetch_failed() {
    let http = RecordingHttpClient::failing("connection refused");
    let chart = service(Arc::new(YahooProvider::new()), http.clone());

    let err = chart.fetch_series("TCS", RangeCode::OneDay).await.unwrap_err();
    assert!(matches!(err, ChartError::FetchFailed { ref details } if details.contains("connection refused")));
    assert_eq!(http.requests().len(), 1, "no retries");
}

#[tokio::test]
async fn malformed_body_is_fetch_failed() {
    let http = RecordingHttpClient::ok("<html>rate limited</html>");
    let chart = service(Arc::new(YahooProvider::new()), http);

    let err = chart.fetch_series("TCS", RangeCode::OneDay).await.unwrap_err();
    assert!(matches!(err, ChartError::FetchFailed { .. }));
}

#[tokio::test]
async fn blank_symbol_is_missing_parameter_and_sends_nothing() {
    let http = RecordingHttpClient::ok("{}");
    let chart = service(Arc::new(YahooProvider::new()), http.clone());

    let err = chart.fetch_series("   ", RangeCode::OneDay).await.unwrap_err();
    assert!(matches!(err, ChartError::MissingParameter(ref p) if p == "symbol"));
    assert!(http.requests().is_empty());
}

#[tokio::test]
async fn every_range_dispatches_one_request() {
    for range in RangeCode::ALL {
        let http = RecordingHttpClient::ok(&yahoo_body(&[1714621500], &["1.0"]));
        let chart = service(Arc::new(YahooProvider::new()), http.clone());
        chart.fetch_series("TCS", range).await.unwrap();

        let requests = http.requests();
        assert_eq!(requests.len(), 1, "{}", range);
        assert!(requests[0].query_value("range").is_some_and(|r| !r.is_empty()));
        assert!(requests[0].query_value("interval").is_some_and(|i| !i.is_empty()));
    }
}
