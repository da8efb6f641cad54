//! Price fetching against the ticker API
//!
//! The ticker returns one JSON object keyed by pair identifier; each entry
//! carries that pair's last trade price as a numeric string. Only the two
//! configured pairs are read, everything else in the response is ignored.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::Config;
use crate::constants::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::error::PriceQueryError;
use crate::types::PriceInfo;
use crate::units;

/// Decimal places of the derived USD price
const USD_PRICE_DECIMALS: u32 = 5;

/// The price side of the refresh pipeline
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetches both configured pairs and derives the token's USD price.
    async fn fetch_price_info(&self) -> Result<PriceInfo, PriceQueryError>;
}

/// Ticker response: a map of pair identifier to per-pair fields
///
/// Entries stay untyped until a configured pair is looked up, so unrelated
/// pairs may carry any shape without failing the parse.
#[derive(Debug, Deserialize)]
struct TickerResponse {
    #[serde(flatten)]
    pairs: HashMap<String, serde_json::Value>,
}

/// The per-pair fields the exporter cares about
#[derive(Debug, Deserialize)]
struct PairTicker {
    last_price: String,
}

/// [`PriceSource`] backed by the ticker HTTP API
pub struct TickerClient {
    client: Client,
    url: String,
    token_native_pair: String,
    native_usd_pair: String,
}

impl TickerClient {
    /// Creates a client for the ticker endpoint in `config`.
    pub fn new(config: &Config) -> Result<Self, PriceQueryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(PriceQueryError::Network)?;

        Ok(Self {
            client,
            url: config.ticker_api_url.clone(),
            token_native_pair: config.token_native_pair.clone(),
            native_usd_pair: config.native_usd_pair.clone(),
        })
    }
}

/// Pulls one pair's last price out of the response and parses it.
fn last_price(response: &TickerResponse, pair: &str) -> Result<f64, PriceQueryError> {
    let entry = response
        .pairs
        .get(pair)
        .ok_or_else(|| PriceQueryError::MissingPair(pair.to_string()))?;

    let ticker: PairTicker = serde_json::from_value(entry.clone()).map_err(|e| {
        PriceQueryError::malformed(format!("unexpected shape for pair {pair}: {e}"))
    })?;

    let value: f64 = ticker.last_price.parse().map_err(|_| {
        PriceQueryError::malformed(format!(
            "last_price for {pair} is not numeric: {:?}",
            ticker.last_price
        ))
    })?;

    if !value.is_finite() {
        return Err(PriceQueryError::malformed(format!(
            "last_price for {pair} is not finite: {:?}",
            ticker.last_price
        )));
    }

    Ok(value)
}

#[async_trait]
impl PriceSource for TickerClient {
    async fn fetch_price_info(&self) -> Result<PriceInfo, PriceQueryError> {
        tracing::debug!(url = %self.url, "fetching ticker prices");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(PriceQueryError::Network)?;

        if !response.status().is_success() {
            return Err(PriceQueryError::BadStatus(response.status().as_u16()));
        }

        let body = response.text().await.map_err(PriceQueryError::Network)?;
        let tickers: TickerResponse = serde_json::from_str(&body).map_err(|e| {
            PriceQueryError::malformed(format!("failed to parse ticker response: {e}"))
        })?;

        let token_per_native = last_price(&tickers, &self.token_native_pair)?;
        let native_per_usd = last_price(&tickers, &self.native_usd_pair)?;

        if token_per_native == 0.0 {
            return Err(PriceQueryError::ZeroTokenPrice);
        }

        let usd_price =
            units::round_dp((1.0 / token_per_native) * native_per_usd, USD_PRICE_DECIMALS);

        Ok(PriceInfo {
            token_per_native,
            native_per_usd,
            usd_price,
        })
    }
}

#[cfg(test)]
pub mod mock {
    //! Mock price source for testing

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Scripted price source: hands out queued results in order, then keeps
    /// failing once the script runs dry.
    pub struct MockPriceSource {
        script: Mutex<VecDeque<Result<PriceInfo, PriceQueryError>>>,
    }

    impl MockPriceSource {
        /// Creates a source with an empty script
        pub fn new() -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
            }
        }

        /// Queues a successful fetch
        pub fn push_ok(&self, info: PriceInfo) {
            self.script.lock().unwrap().push_back(Ok(info));
        }

        /// Queues a failing fetch
        pub fn push_err(&self, err: PriceQueryError) {
            self.script.lock().unwrap().push_back(Err(err));
        }
    }

    impl Default for MockPriceSource {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl PriceSource for MockPriceSource {
        async fn fetch_price_info(&self) -> Result<PriceInfo, PriceQueryError> {
            self.script.lock().unwrap().pop_front().unwrap_or_else(|| {
                Err(PriceQueryError::malformed("mock script exhausted"))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn test_config(ticker_url: String) -> Config {
        Config {
            ticker_api_url: ticker_url,
            token_native_pair: "TOKEN_WBNB".to_string(),
            native_usd_pair: "WBNB_BUSD".to_string(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_fetches_and_derives_usd_price() {
        let server = MockServer::start_async().await;
        let tickers = server
            .mock_async(|when, then| {
                when.method(GET).path("/tickers");
                then.status(200).json_body(json!({
                    "TOKEN_WBNB": { "last_price": "0.0002", "base_volume": "1200" },
                    "WBNB_BUSD": { "last_price": "300" },
                    "OTHER_PAIR": { "last_price": "7.5" },
                }));
            })
            .await;

        let client = TickerClient::new(&test_config(server.url("/tickers"))).unwrap();
        let info = client.fetch_price_info().await.unwrap();

        assert_eq!(info.token_per_native, 0.0002);
        assert_eq!(info.native_per_usd, 300.0);
        // (1 / 0.0002) * 300, rounded to 5 decimal places
        assert_eq!(info.usd_price, 1_500_000.0);

        tickers.assert_async().await;
    }

    #[tokio::test]
    async fn test_unrelated_pair_shapes_are_ignored() {
        // Only the two configured pairs have to look like tickers.
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/tickers");
                then.status(200).json_body(json!({
                    "TOKEN_WBNB": { "last_price": "0.0002" },
                    "WBNB_BUSD": { "last_price": "300" },
                    "NUMERIC_PAIR": { "last_price": 7.5 },
                    "EMPTY_PAIR": {},
                    "NULL_PAIR": null,
                }));
            })
            .await;

        let client = TickerClient::new(&test_config(server.url("/tickers"))).unwrap();
        let info = client.fetch_price_info().await.unwrap();

        assert_eq!(info.token_per_native, 0.0002);
        assert_eq!(info.usd_price, 1_500_000.0);
    }

    #[tokio::test]
    async fn test_wrong_shape_for_configured_pair_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/tickers");
                then.status(200).json_body(json!({
                    "TOKEN_WBNB": { "last_price": 0.0002 },
                    "WBNB_BUSD": { "last_price": "300" },
                }));
            })
            .await;

        let client = TickerClient::new(&test_config(server.url("/tickers"))).unwrap();
        let err = client.fetch_price_info().await.unwrap_err();

        assert!(matches!(err, PriceQueryError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_missing_pair_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/tickers");
                then.status(200)
                    .json_body(json!({ "WBNB_BUSD": { "last_price": "300" } }));
            })
            .await;

        let client = TickerClient::new(&test_config(server.url("/tickers"))).unwrap();
        let err = client.fetch_price_info().await.unwrap_err();

        assert!(matches!(err, PriceQueryError::MissingPair(pair) if pair == "TOKEN_WBNB"));
    }

    #[tokio::test]
    async fn test_non_numeric_last_price_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/tickers");
                then.status(200).json_body(json!({
                    "TOKEN_WBNB": { "last_price": "n/a" },
                    "WBNB_BUSD": { "last_price": "300" },
                }));
            })
            .await;

        let client = TickerClient::new(&test_config(server.url("/tickers"))).unwrap();
        let err = client.fetch_price_info().await.unwrap_err();

        assert!(matches!(err, PriceQueryError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_zero_token_price_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/tickers");
                then.status(200).json_body(json!({
                    "TOKEN_WBNB": { "last_price": "0" },
                    "WBNB_BUSD": { "last_price": "300" },
                }));
            })
            .await;

        let client = TickerClient::new(&test_config(server.url("/tickers"))).unwrap();
        let err = client.fetch_price_info().await.unwrap_err();

        assert!(matches!(err, PriceQueryError::ZeroTokenPrice));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/tickers");
                then.status(502).body("bad gateway");
            })
            .await;

        let client = TickerClient::new(&test_config(server.url("/tickers"))).unwrap();
        let err = client.fetch_price_info().await.unwrap_err();

        assert!(matches!(err, PriceQueryError::BadStatus(502)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/tickers");
                then.status(200).body("maintenance");
            })
            .await;

        let client = TickerClient::new(&test_config(server.url("/tickers"))).unwrap();
        let err = client.fetch_price_info().await.unwrap_err();

        assert!(matches!(err, PriceQueryError::MalformedResponse(_)));
    }
}
