use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::core::error::RequestFailed;
use crate::core::fetcher::JsonFetcher;

const USER_AGENT: &str = concat!("privat-rates/", env!("CARGO_PKG_VERSION"));

/// Fetches JSON documents from the PrivatBank public API.
///
/// Every call builds its own client, so no connection outlives the request
/// that opened it.
#[derive(Debug, Default)]
pub struct PrivatBankFetcher;

impl PrivatBankFetcher {
    pub fn new() -> Self {
        PrivatBankFetcher
    }
}

fn connection_error(url: &str, err: reqwest::Error) -> RequestFailed {
    RequestFailed::Connection {
        url: url.to_string(),
        reason: err.to_string(),
    }
}

#[async_trait]
impl JsonFetcher for PrivatBankFetcher {
    #[instrument(name = "PrivatBankFetch", skip(self))]
    async fn fetch(&self, url: &str) -> Result<Value, RequestFailed> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| connection_error(url, e))?;

        debug!("Requesting exchange rates from {}", url);
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| connection_error(url, e))?;

        let status = response.status();
        debug!(%status, "Received PrivatBank response");
        if status != StatusCode::OK {
            return Err(RequestFailed::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let text = response
            .text()
            .await
            .map_err(|e| connection_error(url, e))?;

        serde_json::from_str(&text).map_err(|e| RequestFailed::InvalidBody {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    const MOCK_JSON: &str = r#"{
        "date": "01.01.2024",
        "bank": "PB",
        "baseCurrency": 980,
        "baseCurrencyLit": "UAH",
        "exchangeRate": [
            {"baseCurrency": "UAH", "currency": "EUR", "saleRateNB": 42.2, "purchaseRateNB": 42.2, "saleRate": 42.5, "purchaseRate": 41.5},
            {"baseCurrency": "UAH", "currency": "USD", "saleRateNB": 37.9, "purchaseRateNB": 37.9, "saleRate": 38.3, "purchaseRate": 37.7}
        ]
    }"#;

    async fn create_mock_server(status: u16, body: &str) -> wiremock::MockServer {
        let mock_server = wiremock::MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/p24api/exchange_rates"))
            .and(query_param("date", "01.01.2024"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn rates_url(base_url: &str) -> String {
        format!("{base_url}/p24api/exchange_rates?date=01.01.2024")
    }

    #[tokio::test]
    async fn test_fetch_json() {
        let mock_server = create_mock_server(200, MOCK_JSON).await;
        let fetcher = PrivatBankFetcher::new();

        let body = fetcher.fetch(&rates_url(&mock_server.uri())).await.unwrap();

        assert_eq!(body["date"], "01.01.2024");
        let rates = body["exchangeRate"].as_array().unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0]["currency"], "EUR");
        assert_eq!(rates[1]["saleRate"], 38.3);
    }

    #[tokio::test]
    async fn test_fetch_non_200_status() {
        let mock_server = create_mock_server(503, "busy").await;
        let fetcher = PrivatBankFetcher::new();
        let url = rates_url(&mock_server.uri());

        let err = fetcher.fetch(&url).await.unwrap_err();

        match err {
            RequestFailed::Status { status, url: failed } => {
                assert_eq!(status, 503);
                assert_eq!(failed, url);
            }
            other => panic!("Expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_unmatched_path_is_status_error() {
        let mock_server = create_mock_server(200, MOCK_JSON).await;
        let fetcher = PrivatBankFetcher::new();

        let url = format!("{}/p24api/exchange_rates?date=02.01.2024", mock_server.uri());
        let err = fetcher.fetch(&url).await.unwrap_err();

        assert!(matches!(err, RequestFailed::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let mock_server = create_mock_server(200, "<html>maintenance</html>").await;
        let fetcher = PrivatBankFetcher::new();

        let err = fetcher.fetch(&rates_url(&mock_server.uri())).await.unwrap_err();

        assert!(matches!(err, RequestFailed::InvalidBody { .. }));
    }

    #[tokio::test]
    async fn test_fetch_connection_errors() {
        let fetcher = PrivatBankFetcher::new();

        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, RequestFailed::Connection { .. }));
        assert_eq!(err.url(), "not a url");

        // Nothing listens on port 9 of the loopback interface.
        let err = fetcher
            .fetch("http://127.0.0.1:9/p24api/exchange_rates?date=01.01.2024")
            .await
            .unwrap_err();
        assert!(matches!(err, RequestFailed::Connection { .. }));
    }
}
