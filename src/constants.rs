//! Constants for the burn-stats exporter
//!
//! Compile-time defaults for every knob the exporter reads. Each `DEFAULT_*`
//! value can be overridden through the environment (see [`crate::config`]);
//! the selectors and timeouts are fixed.

/// Default port for the metrics endpoint
pub const DEFAULT_PORT: u16 = 3001;

/// Default interval between refresh cycles (in seconds)
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;

/// Public JSON-RPC endpoint of the chain the contracts live on
pub const DEFAULT_CHAIN_RPC_URL: &str = "https://bsc-dataseed.binance.org/";

/// Accounting contract exposing the burn-vault balance, the cumulative
/// burnt amount and the current burn percentage
pub const DEFAULT_INFO_CONTRACT_ADDRESS: &str = "0xde5618cfbBdc4319C42Bc585646b795F0f249A68";

/// The token contract itself (total supply lives here)
pub const DEFAULT_TOKEN_CONTRACT_ADDRESS: &str = "0xE10e9822A5de22F8761919310DDA35CD997d63c0";

/// Ticker API returning last trade prices keyed by pair identifier
pub const DEFAULT_TICKER_API_URL: &str = "https://api.bscswap.com/tickers";

/// Pair identifier quoting the token in the native coin
pub const DEFAULT_TOKEN_NATIVE_PAIR: &str =
    "0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c_0xE10e9822A5de22F8761919310DDA35CD997d63c0";

/// Pair identifier quoting the native coin in USD
pub const DEFAULT_NATIVE_USD_PAIR: &str =
    "0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c_0xe9e7CEA3DedcA5984780Bafc599bD69ADd087D56";

/// HTTP request timeout for upstream calls (in seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// User agent for HTTP requests
pub const USER_AGENT: &str = "burn-stats-exporter/0.1.0";

/// Implied fractional digits of on-chain token amounts
pub const TOKEN_DECIMALS: i64 = 18;

// eth_call selectors: the first four keccak-256 bytes of each method
// signature. All four methods take no arguments, so the selector is the
// whole call data.

/// `BurnVaultBalance()` on the info contract
pub const SELECTOR_BURN_VAULT_BALANCE: &str = "0x3a2a7e90";

/// `totalBurnt()` on the info contract
pub const SELECTOR_TOTAL_BURNT: &str = "0x966ff650";

/// `currentBurnPercent()` on the info contract
pub const SELECTOR_CURRENT_BURN_PERCENT: &str = "0x31bdda99";

/// `totalSupply()` on the token contract
pub const SELECTOR_TOTAL_SUPPLY: &str = "0x18160ddd";
