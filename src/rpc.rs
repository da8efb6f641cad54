//! JSON-RPC implementation of [`ChainReader`]
//!
//! Each figure is one `eth_call` against a deployed contract. The call data
//! is a bare four-byte selector (none of the methods take arguments) and
//! the return data a single ABI-encoded uint256 word.

use std::time::Duration;

use async_trait::async_trait;
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::chain::ChainReader;
use crate::config::Config;
use crate::constants::{
    REQUEST_TIMEOUT_SECS, SELECTOR_BURN_VAULT_BALANCE, SELECTOR_CURRENT_BURN_PERCENT,
    SELECTOR_TOTAL_BURNT, SELECTOR_TOTAL_SUPPLY, USER_AGENT,
};
use crate::error::ChainQueryError;
use crate::types::RawStats;

#[derive(Debug, Serialize)]
struct CallRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: (CallParams<'a>, &'static str),
    id: u32,
}

#[derive(Debug, Serialize)]
struct CallParams<'a> {
    to: &'a str,
    data: &'a str,
}

#[derive(Debug, Deserialize)]
struct CallResponse {
    result: Option<String>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// [`ChainReader`] speaking JSON-RPC 2.0 `eth_call` to a public endpoint
pub struct JsonRpcChainReader {
    client: Client,
    rpc_url: String,
    info_contract: String,
    token_contract: String,
}

impl JsonRpcChainReader {
    /// Creates a reader for the endpoint and contract addresses in `config`.
    pub fn new(config: &Config) -> Result<Self, ChainQueryError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .map_err(ChainQueryError::Transport)?;

        Ok(Self {
            client,
            rpc_url: config.chain_rpc_url.clone(),
            info_contract: config.info_contract_address.clone(),
            token_contract: config.token_contract_address.clone(),
        })
    }

    /// Calls a no-argument contract method and decodes the uint256 it
    /// returns.
    async fn call_uint(&self, to: &str, selector: &str) -> Result<BigUint, ChainQueryError> {
        let request = CallRequest {
            jsonrpc: "2.0",
            method: "eth_call",
            params: (CallParams { to, data: selector }, "latest"),
            id: 1,
        };

        tracing::debug!(contract = to, selector, "issuing eth_call");

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(ChainQueryError::Transport)?;

        if !response.status().is_success() {
            return Err(ChainQueryError::BadStatus(response.status().as_u16()));
        }

        let body = response.text().await.map_err(ChainQueryError::Transport)?;
        let envelope: CallResponse = serde_json::from_str(&body).map_err(|e| {
            ChainQueryError::malformed(format!("failed to parse rpc response: {e}"))
        })?;

        if let Some(err) = envelope.error {
            return Err(ChainQueryError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        let word = envelope.result.ok_or_else(|| {
            ChainQueryError::malformed("response carries neither result nor error")
        })?;

        decode_uint_word(&word)
    }
}

/// Decodes a `0x`-prefixed ABI uint256 word.
///
/// Empty return data (`"0x"`) means the call reverted or hit an address
/// with no code behind it, so it is rejected rather than read as zero.
fn decode_uint_word(word: &str) -> Result<BigUint, ChainQueryError> {
    let digits = word.strip_prefix("0x").unwrap_or(word);
    if digits.is_empty() {
        return Err(ChainQueryError::malformed("empty return data"));
    }
    BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| {
        ChainQueryError::malformed(format!("return data is not hex: {word:?}"))
    })
}

#[async_trait]
impl ChainReader for JsonRpcChainReader {
    async fn fetch_raw_stats(&self) -> Result<RawStats, ChainQueryError> {
        let (vault, burnt, percent, supply) = futures::try_join!(
            self.call_uint(&self.info_contract, SELECTOR_BURN_VAULT_BALANCE),
            self.call_uint(&self.info_contract, SELECTOR_TOTAL_BURNT),
            self.call_uint(&self.info_contract, SELECTOR_CURRENT_BURN_PERCENT),
            self.call_uint(&self.token_contract, SELECTOR_TOTAL_SUPPLY),
        )?;

        let burn_percent = percent
            .to_f64()
            .ok_or_else(|| ChainQueryError::malformed("burn percent out of range"))?;

        Ok(RawStats {
            burn_vault_balance_wei: vault.to_string(),
            forever_burnt_wei: burnt.to_string(),
            total_supply_wei: supply.to_string(),
            burn_percent,
        })
    }
}
