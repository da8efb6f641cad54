//! Runtime configuration
//!
//! Every knob has a compiled-in default (see [`crate::constants`]) and an
//! environment-variable override. Resolution happens once at startup and an
//! override that does not parse is fatal rather than silently ignored.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CHAIN_RPC_URL, DEFAULT_INFO_CONTRACT_ADDRESS, DEFAULT_NATIVE_USD_PAIR, DEFAULT_PORT,
    DEFAULT_REFRESH_INTERVAL_SECS, DEFAULT_TICKER_API_URL, DEFAULT_TOKEN_CONTRACT_ADDRESS,
    DEFAULT_TOKEN_NATIVE_PAIR,
};
use crate::error::ConfigError;

/// Exporter configuration, resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Port the metrics endpoint listens on (`PORT`)
    pub port: u16,

    /// JSON-RPC endpoint of the chain (`CHAIN_RPC_URL`)
    pub chain_rpc_url: String,

    /// Accounting contract address (`INFO_CONTRACT_ADDRESS`)
    pub info_contract_address: String,

    /// Token contract address (`TOKEN_CONTRACT_ADDRESS`)
    pub token_contract_address: String,

    /// Ticker API URL (`TICKER_API_URL`)
    pub ticker_api_url: String,

    /// Pair identifier quoting the token in the native coin
    /// (`TOKEN_NATIVE_PAIR`)
    pub token_native_pair: String,

    /// Pair identifier quoting the native coin in USD (`NATIVE_USD_PAIR`)
    pub native_usd_pair: String,

    /// Time between refresh cycles (`REFRESH_INTERVAL_SECS`)
    pub refresh_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            chain_rpc_url: DEFAULT_CHAIN_RPC_URL.to_string(),
            info_contract_address: DEFAULT_INFO_CONTRACT_ADDRESS.to_string(),
            token_contract_address: DEFAULT_TOKEN_CONTRACT_ADDRESS.to_string(),
            ticker_api_url: DEFAULT_TICKER_API_URL.to_string(),
            token_native_pair: DEFAULT_TOKEN_NATIVE_PAIR.to_string(),
            native_usd_pair: DEFAULT_NATIVE_USD_PAIR.to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECS),
        }
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT") {
            config.port = parse("PORT", port)?;
        }
        if let Some(url) = lookup("CHAIN_RPC_URL") {
            config.chain_rpc_url = url;
        }
        if let Some(address) = lookup("INFO_CONTRACT_ADDRESS") {
            config.info_contract_address = address;
        }
        if let Some(address) = lookup("TOKEN_CONTRACT_ADDRESS") {
            config.token_contract_address = address;
        }
        if let Some(url) = lookup("TICKER_API_URL") {
            config.ticker_api_url = url;
        }
        if let Some(pair) = lookup("TOKEN_NATIVE_PAIR") {
            config.token_native_pair = pair;
        }
        if let Some(pair) = lookup("NATIVE_USD_PAIR") {
            config.native_usd_pair = pair;
        }
        if let Some(secs) = lookup("REFRESH_INTERVAL_SECS") {
            let secs: u64 = parse("REFRESH_INTERVAL_SECS", secs)?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    key: "REFRESH_INTERVAL_SECS",
                    value: "0".to_string(),
                    reason: "interval must be positive".to_string(),
                });
            }
            config.refresh_interval = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_overrides() {
        let config = Config::from_lookup(|_| None).unwrap();

        assert_eq!(config.port, 3001);
        assert_eq!(config.chain_rpc_url, DEFAULT_CHAIN_RPC_URL);
        assert_eq!(config.ticker_api_url, DEFAULT_TICKER_API_URL);
        assert_eq!(config.refresh_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_overrides_apply() {
        let config = Config::from_lookup(|key| match key {
            "PORT" => Some("9100".to_string()),
            "CHAIN_RPC_URL" => Some("http://localhost:8545".to_string()),
            "TOKEN_NATIVE_PAIR" => Some("TOKEN_WBNB".to_string()),
            "REFRESH_INTERVAL_SECS" => Some("30".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.port, 9100);
        assert_eq!(config.chain_rpc_url, "http://localhost:8545");
        assert_eq!(config.token_native_pair, "TOKEN_WBNB");
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
        // Untouched keys keep their defaults
        assert_eq!(config.native_usd_pair, DEFAULT_NATIVE_USD_PAIR);
    }

    #[test]
    fn test_invalid_port_is_fatal() {
        let err = Config::from_lookup(|key| match key {
            "PORT" => Some("not-a-port".to_string()),
            _ => None,
        })
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid { key: "PORT", .. }
        ));
    }

    #[test]
    fn test_zero_interval_is_fatal() {
        let err = Config::from_lookup(|key| match key {
            "REFRESH_INTERVAL_SECS" => Some("0".to_string()),
            _ => None,
        })
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "REFRESH_INTERVAL_SECS",
                ..
            }
        ));
    }

    #[test]
    fn test_non_numeric_interval_is_fatal() {
        let err = Config::from_lookup(|key| match key {
            "REFRESH_INTERVAL_SECS" => Some("soon".to_string()),
            _ => None,
        })
        .unwrap_err();

        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
