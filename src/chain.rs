//! Chain reader abstraction
//!
//! The exporter needs exactly four integers from two contracts each cycle.
//! This trait is the seam between the refresh pipeline and whatever RPC
//! transport provides them, and the place tests plug a scripted reader in.

use async_trait::async_trait;

use crate::error::ChainQueryError;
use crate::types::RawStats;

/// Read access to the token accounting contracts
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Fetches all four raw figures for one refresh cycle.
    ///
    /// The underlying reads are independent calls, but if any one of them
    /// fails the whole fetch fails; a partial [`RawStats`] is never
    /// returned. No retries happen at this layer, the scheduler's next tick
    /// covers transient failures.
    async fn fetch_raw_stats(&self) -> Result<RawStats, ChainQueryError>;
}
