//! # Burn-Stats Exporter
//!
//! Prometheus exporter for a deflationary token. On a fixed interval it
//! reads the token's accounting contracts over JSON-RPC, pulls the last
//! trade prices for two pairs from the ticker API, derives human-readable
//! burn statistics and publishes them as gauges on `GET /metrics`.
//!
//! ## Architecture
//!
//! ```text
//! Scheduler (startup, then every interval tick; one cycle in flight)
//!     |
//!     v
//! StatsAggregator
//!     +-- ChainReader   (eth_call x4: vault balance, burnt, percent, supply)
//!     +-- PriceSource   (ticker API: token/native and native/USD last prices)
//!     |
//!     v
//! StatsSnapshot (complete or nothing, rebuilt every cycle)
//!     |
//!     v
//! GaugeSet (prometheus registry) --- axum --- GET /metrics
//! ```
//!
//! A refresh cycle either publishes a complete snapshot or nothing: any
//! chain or price failure aborts the cycle, the previous gauge values stay
//! visible, and the next tick tries again.

pub mod chain;
pub mod config;
pub mod constants;
pub mod error;
pub mod gauges;
pub mod rpc;
pub mod scheduler;
pub mod server;
pub mod stats;
pub mod ticker;
pub mod types;
pub mod units;

// Re-export commonly used types
pub use chain::ChainReader;
pub use config::Config;
pub use error::{ChainQueryError, ConfigError, ConversionError, PriceQueryError, RefreshError};
pub use gauges::GaugeSet;
pub use rpc::JsonRpcChainReader;
pub use scheduler::Scheduler;
pub use stats::StatsAggregator;
pub use ticker::{PriceSource, TickerClient};
pub use types::{PriceInfo, RawStats, StatsSnapshot};
