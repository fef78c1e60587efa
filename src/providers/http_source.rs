use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::core::error::LoadError;
use crate::core::price::{PriceSource, PriceTable};

const USER_AGENT: &str = concat!("tconv/", env!("CARGO_PKG_VERSION"));

/// Loads the whole price list with a single GET against a JSON endpoint.
pub struct HttpPriceSource {
    url: String,
    client: reqwest::Client,
}

impl HttpPriceSource {
    pub fn new(url: &str) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| LoadError::Request {
                url: url.to_string(),
                source,
            })?;
        Ok(HttpPriceSource {
            url: url.to_string(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    #[instrument(name = "PriceListFetch", skip(self), fields(url = %self.url))]
    async fn load(&self) -> Result<PriceTable, LoadError> {
        debug!("Requesting price list");

        let response =
            self.client
                .get(&self.url)
                .send()
                .await
                .map_err(|source| LoadError::Request {
                    url: self.url.clone(),
                    source,
                })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let text = response.text().await.map_err(|source| LoadError::Request {
            url: self.url.clone(),
            source,
        })?;

        let values: Vec<serde_json::Value> =
            serde_json::from_str(&text).map_err(|source| LoadError::Decode {
                url: self.url.clone(),
                source,
            })?;
        debug!(entries = values.len(), "Received price list");

        Ok(PriceTable::from_raw_values(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_mock_server(template: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/prices.json"))
            .respond_with(template)
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn source_for(server: &MockServer) -> HttpPriceSource {
        HttpPriceSource::new(&format!("{}/prices.json", server.uri())).unwrap()
    }

    const MOCK_JSON: &str = r#"[
        {"currency": "BLUR", "date": "2023-08-29T07:10:40.000Z", "price": 0.20811525423728813},
        {"currency": "bNEO", "date": "2023-08-29T07:10:50.000Z", "price": 7.1282679},
        {"currency": "ETH", "date": "2023-08-29T07:10:52.000Z", "price": 1645.9337373737374},
        {"currency": "USD", "date": "2023-08-29T07:10:30.000Z", "price": 1},
        {"currency": "ETH", "date": "2023-08-29T07:10:40.000Z", "price": 1600.0},
        {"currency": "USD", "date": "2023-08-29T07:10:30.000Z", "price": 1.01}
    ]"#;

    #[tokio::test]
    async fn test_successful_load() {
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(MOCK_JSON)).await;

        let table = source_for(&mock_server).load().await.unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.price_of("ETH"), Some(1645.9337373737374));
        assert_eq!(table.price_of("USD"), Some(1.0));
        assert_eq!(table.price_of("bNEO"), Some(7.1282679));
    }

    #[tokio::test]
    async fn test_malformed_entries_are_skipped() {
        let body = r#"[
            {"currency": "ETH", "date": "2023-08-29T07:10:52.000Z", "price": 1645.93},
            {"currency": "BROKEN", "date": "soon", "price": 1.0},
            {"currency": "NOPRICE", "date": "2023-08-29T07:10:52.000Z"}
        ]"#;
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(body)).await;

        let table = source_for(&mock_server).load().await.unwrap();

        let symbols: Vec<&str> = table.symbols().collect();
        assert_eq!(symbols, vec!["ETH"]);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mock_server = create_mock_server(ResponseTemplate::new(500)).await;
        let source = source_for(&mock_server);

        let err = source.load().await.unwrap_err();

        assert!(matches!(err, LoadError::Status { status, .. } if status.as_u16() == 500));
        assert_eq!(
            err.to_string(),
            format!("HTTP error: 500 Internal Server Error for URL: {}", source.url())
        );
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let mock_server = create_mock_server(ResponseTemplate::new(404)).await;

        let err = source_for(&mock_server).load().await.unwrap_err();
        assert!(matches!(err, LoadError::Status { status, .. } if status.as_u16() == 404));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mock_server = create_mock_server(
            ResponseTemplate::new(200).set_body_string(r#"{"prices": []}"#),
        )
        .await;

        let err = source_for(&mock_server).load().await.unwrap_err();
        assert!(matches!(err, LoadError::Decode { .. }));
        assert!(err.to_string().contains("Failed to parse price list"));
    }

    #[tokio::test]
    async fn test_empty_list() {
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string("[]")).await;

        let table = source_for(&mock_server).load().await.unwrap();
        assert!(table.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_source() {
        let source = HttpPriceSource::new("http://127.0.0.1:1/prices.json").unwrap();

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, LoadError::Request { .. }));
    }
}
