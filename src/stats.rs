//! Stats aggregation
//!
//! The aggregator owns the two upstream capabilities and turns their raw
//! output into one [`StatsSnapshot`]. Chain figures and prices are
//! published together or not at all: a failure on either side aborts the
//! whole cycle.

use std::sync::Arc;

use chrono::Utc;

use crate::chain::ChainReader;
use crate::error::RefreshError;
use crate::ticker::PriceSource;
use crate::types::StatsSnapshot;
use crate::units;

/// Decimal places for token-denominated amounts
const AMOUNT_DECIMALS: u32 = 2;

/// Decimal places for the recomputed burnt sum
const TOTAL_BURNT_DECIMALS: u32 = 8;

/// Combines one chain fetch and one price fetch into a snapshot
pub struct StatsAggregator {
    chain: Arc<dyn ChainReader>,
    price: Arc<dyn PriceSource>,
}

impl StatsAggregator {
    /// Creates an aggregator over the two upstreams.
    pub fn new(chain: Arc<dyn ChainReader>, price: Arc<dyn PriceSource>) -> Self {
        Self { chain, price }
    }

    /// Runs one refresh: both upstreams concurrently, then derivation.
    ///
    /// `total_burnt` is always recomputed here from its two components, so
    /// it can never go stale relative to them.
    pub async fn refresh(&self) -> Result<StatsSnapshot, RefreshError> {
        let (raw, price) = futures::try_join!(
            async { self.chain.fetch_raw_stats().await.map_err(RefreshError::from) },
            async { self.price.fetch_price_info().await.map_err(RefreshError::from) },
        )?;

        let vault_balance = units::from_smallest_unit(&raw.burn_vault_balance_wei, AMOUNT_DECIMALS)?;
        let forever_burnt = units::from_smallest_unit(&raw.forever_burnt_wei, AMOUNT_DECIMALS)?;
        let total_supply = units::from_smallest_unit(&raw.total_supply_wei, AMOUNT_DECIMALS)?;
        let total_burnt = units::round_dp(forever_burnt + vault_balance, TOTAL_BURNT_DECIMALS);

        Ok(StatsSnapshot {
            vault_balance,
            forever_burnt,
            total_supply,
            total_burnt,
            burn_percent: raw.burn_percent,
            usd_price: price.usd_price,
            token_per_native: price.token_per_native,
            fetched_at: Utc::now(),
        })
    }
}
