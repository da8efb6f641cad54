//! Types flowing through the refresh pipeline

use chrono::{DateTime, Utc};

/// Raw accounting figures read from the contracts in one refresh cycle.
///
/// The three amounts are base-10 digit strings in smallest-unit
/// representation (18 implied fractional digits), kept as strings because
/// token supplies overflow native integers. The burn percentage is already
/// a plain number on chain.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStats {
    /// Token balance held by the burn vault, in smallest units
    pub burn_vault_balance_wei: String,

    /// Cumulative amount burnt to the null address, in smallest units
    pub forever_burnt_wei: String,

    /// Total token supply, in smallest units
    pub total_supply_wei: String,

    /// Current burn percentage applied to transfers
    pub burn_percent: f64,
}

/// Last trade prices for the two configured pairs, plus the USD price
/// derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceInfo {
    /// How many tokens one native coin last bought
    pub token_per_native: f64,

    /// USD price of one native coin
    pub native_per_usd: f64,

    /// USD price of one token, rounded to 5 decimal places:
    /// `(1 / token_per_native) * native_per_usd`
    pub usd_price: f64,
}

/// One fully derived, human-readable view of the token's burn statistics.
///
/// Built from scratch every refresh cycle and handed to the gauges as a
/// whole; a cycle either produces a complete snapshot or nothing. Amounts
/// are token-denominated decimals rounded to 2 places. `total_burnt` is
/// always the 8-place sum of `forever_burnt` and `vault_balance`, never a
/// figure fetched on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    /// Tokens sitting in the burn vault
    pub vault_balance: f64,

    /// Tokens burnt to the null address
    pub forever_burnt: f64,

    /// Total token supply
    pub total_supply: f64,

    /// `forever_burnt + vault_balance`
    pub total_burnt: f64,

    /// Current burn percentage
    pub burn_percent: f64,

    /// USD price of one token
    pub usd_price: f64,

    /// How many tokens one native coin last bought
    pub token_per_native: f64,

    /// When the cycle that produced this snapshot gathered its inputs
    pub fetched_at: DateTime<Utc>,
}
