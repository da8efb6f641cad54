//! Error types for the burn-stats exporter

use thiserror::Error;

/// Errors that can occur when querying the contracts over JSON-RPC
#[derive(Debug, Error)]
pub enum ChainQueryError {
    /// Network request failed
    #[error("rpc transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// RPC endpoint replied with a non-success HTTP status
    #[error("rpc endpoint returned HTTP {0}")]
    BadStatus(u16),

    /// The JSON-RPC envelope carried an error object
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Response body did not decode to a single uint256 word
    #[error("malformed rpc response: {0}")]
    MalformedResponse(String),
}

impl ChainQueryError {
    /// Creates a MalformedResponse error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}

/// Errors that can occur when querying the price ticker API
#[derive(Debug, Error)]
pub enum PriceQueryError {
    /// Network request failed
    #[error("ticker request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Ticker API replied with a non-success HTTP status
    #[error("ticker returned HTTP {0}")]
    BadStatus(u16),

    /// The configured trading pair is absent from the response
    #[error("ticker response missing pair {0}")]
    MissingPair(String),

    /// Response body failed schema validation
    #[error("malformed ticker response: {0}")]
    MalformedResponse(String),

    /// The token/native last price is zero, so the USD price is undefined
    #[error("token/native last price is zero")]
    ZeroTokenPrice,
}

impl PriceQueryError {
    /// Creates a MalformedResponse error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}

/// A smallest-unit amount that does not parse as a non-negative integer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("malformed smallest-unit amount {input:?}")]
pub struct ConversionError {
    /// The offending input
    pub input: String,
}

/// Invalid environment configuration, fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment override did not parse
    #[error("invalid value {value:?} for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Any failure that aborts one refresh cycle.
///
/// A cycle that errors publishes nothing; the previously published gauge
/// values stay visible until the next successful cycle.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The chain side of the cycle failed
    #[error("chain query failed: {0}")]
    Chain(#[from] ChainQueryError),

    /// The price side of the cycle failed
    #[error("price query failed: {0}")]
    Price(#[from] PriceQueryError),

    /// A fetched amount could not be converted to a token amount
    #[error("conversion failed: {0}")]
    Conversion(#[from] ConversionError),
}
