//! Metrics publication
//!
//! One gauge per published statistic, registered once at startup into an
//! owned registry and mutated in place every cycle. Gauges are plain
//! (unlabelled) and rendered in the Prometheus text exposition format.

use prometheus::{Encoder, Gauge, Registry, TextEncoder};

use crate::types::StatsSnapshot;

/// The full set of exported burn statistics
pub struct GaugeSet {
    registry: Registry,
    burn_vault_balance: Gauge,
    forever_burnt: Gauge,
    total_supply: Gauge,
    total_burnt: Gauge,
    burn_percent: Gauge,
    last_usd_price: Gauge,
    last_token_per_native: Gauge,
}

fn gauge(registry: &Registry, name: &str, help: &str) -> Result<Gauge, prometheus::Error> {
    let gauge = Gauge::new(name, help)?;
    registry.register(Box::new(gauge.clone()))?;
    Ok(gauge)
}

impl GaugeSet {
    /// Creates and registers every gauge.
    ///
    /// Called exactly once at startup; a registration failure is fatal.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        let burn_vault_balance = gauge(
            &registry,
            "burn_vault_balance",
            "Token balance held by the burn vault",
        )?;
        let forever_burnt = gauge(
            &registry,
            "forever_burnt",
            "Tokens burnt to the null address forever",
        )?;
        let total_supply = gauge(&registry, "total_supply", "Total token supply")?;
        let total_burnt = gauge(
            &registry,
            "total_burnt",
            "Total tokens burnt, the burn vault plus tokens sent to the null address",
        )?;
        let burn_percent = gauge(
            &registry,
            "burn_percent",
            "Current burn percentage applied to transfers",
        )?;
        let last_usd_price = gauge(&registry, "last_usd_price", "Last USD price of one token")?;
        let last_token_per_native = gauge(
            &registry,
            "last_token_per_native",
            "How many tokens one native coin last bought",
        )?;

        Ok(Self {
            registry,
            burn_vault_balance,
            forever_burnt,
            total_supply,
            total_burnt,
            burn_percent,
            last_usd_price,
            last_token_per_native,
        })
    }

    /// Publishes one snapshot.
    ///
    /// Seven independent stores, not a transaction; a scrape racing a
    /// publish may observe values from two adjacent cycles.
    pub fn publish(&self, snapshot: &StatsSnapshot) {
        self.burn_vault_balance.set(snapshot.vault_balance);
        self.forever_burnt.set(snapshot.forever_burnt);
        self.total_supply.set(snapshot.total_supply);
        self.total_burnt.set(snapshot.total_burnt);
        self.burn_percent.set(snapshot.burn_percent);
        self.last_usd_price.set(snapshot.usd_price);
        self.last_token_per_native.set(snapshot.token_per_native);
    }

    /// Renders the whole registry in the text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    /// Content type of [`render`](Self::render) output
    pub fn format_type(&self) -> String {
        TextEncoder::new().format_type().to_string()
    }

    /// Current value of every gauge, in publication order: vault balance,
    /// forever burnt, total supply, total burnt, burn percent, USD price,
    /// tokens per native coin.
    pub fn current(&self) -> [f64; 7] {
        [
            self.burn_vault_balance.get(),
            self.forever_burnt.get(),
            self.total_supply.get(),
            self.total_burnt.get(),
            self.burn_percent.get(),
            self.last_usd_price.get(),
            self.last_token_per_native.get(),
        ]
    }
}
