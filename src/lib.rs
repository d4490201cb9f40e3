//! Supply-chain risk SDK for Rust.
//!
//! Scans recent retail prices for staple commodities on the Open Prices API,
//! scores price volatility (coefficient of variation) per commodity and per
//! region, and classifies each into a severity tier. Results are exposed as
//! tool-call operations, persisted as a single latest snapshot, and can be
//! pushed out as severity-filtered alerts.
//!
//! # Quick start
//!
//! ```no_run
//! use supply_risk::SupplyRisk;
//!
//! let risk = SupplyRisk::builder().build().unwrap();
//!
//! // Drill into one commodity
//! let rice = risk.analyze_commodity("rice");
//! println!("{}: {}", rice.name, rice.status());
//!
//! // Scan the tracked list and save the snapshot
//! let snapshot = risk.scan().unwrap();
//! ```

pub mod alerts;
pub mod analyzer;
#[cfg(feature = "async")]
pub mod async_client;
pub mod collector;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod pacing;
pub mod regions;
pub mod report;
pub mod scoring;
pub mod sources;
pub mod store;
pub mod tools;

pub use alerts::{AlertConfig, AlertDispatcher, AlertOutcome};
pub use analyzer::CommodityAnalyzer;
#[cfg(feature = "async")]
pub use async_client::AsyncSupplyRisk;
pub use collector::{CollectStrategy, PriceCollector};
pub use error::{Result, SupplyRiskError};
pub use models::{CommodityReport, PriceRecord, RegionRisk, RiskAssessment, RiskStatus, Snapshot};
pub use report::{Comparison, SeverityFilter};
pub use store::SnapshotStore;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{AnalyzerConfig, CollectorConfig};
use sources::{OpenPricesSource, PriceSource, ProductCodeResolver, ProductSearchResolver};

// ---------------------------------------------------------------------------
// SupplyRiskBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SupplyRisk`] instance.
///
/// Use [`SupplyRisk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](SupplyRiskBuilder::build) to create the SDK.
pub struct SupplyRiskBuilder {
    prices_url: String,
    search_url: String,
    timeout: Duration,
    strategy: CollectStrategy,
    data_dir: Option<PathBuf>,
    analyzer: AnalyzerConfig,
    collector: CollectorConfig,
    alerts: Option<AlertConfig>,
    price_source: Option<Box<dyn PriceSource>>,
    code_resolver: Option<Box<dyn ProductCodeResolver>>,
}

impl Default for SupplyRiskBuilder {
    fn default() -> Self {
        Self {
            prices_url: config::PRICES_API_BASE.to_string(),
            search_url: config::PRODUCT_SEARCH_URL.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            strategy: CollectStrategy::default(),
            data_dir: None,
            analyzer: AnalyzerConfig::default(),
            collector: CollectorConfig::default(),
            alerts: None,
            price_source: None,
            code_resolver: None,
        }
    }
}

impl SupplyRiskBuilder {
    /// Override the Open Prices `/prices` endpoint.
    pub fn prices_url(mut self, url: &str) -> Self {
        self.prices_url = url.to_string();
        self
    }

    /// Override the product search endpoint used for code resolution.
    pub fn search_url(mut self, url: &str) -> Self {
        self.search_url = url.to_string();
        self
    }

    /// Set the HTTP request timeout for every upstream call.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Choose between direct name filtering and two-step code resolution.
    ///
    /// Defaults to [`CollectStrategy::TwoStep`].
    pub fn strategy(mut self, strategy: CollectStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set a custom directory for the snapshot file.
    ///
    /// If not set, the platform data directory is used (e.g.
    /// `~/.local/share/supply-risk` on Linux).
    pub fn data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replace the tracked commodity list.
    pub fn commodities<S: AsRef<str>>(mut self, commodities: &[S]) -> Self {
        self.analyzer.commodities = commodities.iter().map(|c| c.as_ref().to_string()).collect();
        self
    }

    /// Target number of price records per commodity. Defaults to 50.
    pub fn sample_size(mut self, size: usize) -> Self {
        self.analyzer.sample_size = size;
        self
    }

    /// Minimum prices per reported region and how many regions to keep.
    pub fn regions(mut self, min_samples: usize, limit: usize) -> Self {
        self.analyzer.min_region_samples = min_samples;
        self.analyzer.region_limit = limit;
        self
    }

    /// Pause between commodities in a batch. Defaults to 1 second.
    pub fn commodity_pause(mut self, pause: Duration) -> Self {
        self.analyzer.commodity_pause = pause;
        self
    }

    /// Pause between per-code price requests. Defaults to 500 ms.
    pub fn code_pause(mut self, pause: Duration) -> Self {
        self.collector.code_pause = pause;
        self
    }

    /// Replace the whole collector configuration.
    pub fn collector_config(mut self, config: CollectorConfig) -> Self {
        self.collector = config;
        self
    }

    /// Alert credentials. Defaults to [`AlertConfig::from_env`].
    pub fn alerts(mut self, alerts: AlertConfig) -> Self {
        self.alerts = Some(alerts);
        self
    }

    /// Use a custom price source instead of the Open Prices client.
    pub fn price_source(mut self, source: Box<dyn PriceSource>) -> Self {
        self.price_source = Some(source);
        self
    }

    /// Use a custom product code resolver instead of the search client.
    pub fn code_resolver(mut self, resolver: Box<dyn ProductCodeResolver>) -> Self {
        self.code_resolver = Some(resolver);
        self
    }

    /// Build the SDK.
    ///
    /// Creates the HTTP clients and the data directory but performs no
    /// network calls.
    pub fn build(self) -> Result<SupplyRisk> {
        let source = match self.price_source {
            Some(source) => source,
            None => Box::new(OpenPricesSource::with_base_url(&self.prices_url, self.timeout)?),
        };
        let collector = match self.strategy {
            CollectStrategy::Direct => PriceCollector::direct(source),
            CollectStrategy::TwoStep => {
                let resolver = match self.code_resolver {
                    Some(resolver) => resolver,
                    None => Box::new(ProductSearchResolver::with_search_url(
                        &self.search_url,
                        self.timeout,
                    )?),
                };
                PriceCollector::two_step(source, resolver, self.collector)
            }
        };

        let alert_config = self.alerts.unwrap_or_else(AlertConfig::from_env);
        Ok(SupplyRisk {
            analyzer: CommodityAnalyzer::new(collector, self.analyzer),
            store: SnapshotStore::new(self.data_dir)?,
            alerts: AlertDispatcher::from_config(&alert_config, self.timeout)?,
        })
    }
}

// ---------------------------------------------------------------------------
// SupplyRisk
// ---------------------------------------------------------------------------

/// The main entry point for the supply-risk SDK.
///
/// Owns the [`CommodityAnalyzer`], the [`SnapshotStore`] and the
/// [`AlertDispatcher`]. Created via [`SupplyRisk::builder()`].
pub struct SupplyRisk {
    analyzer: CommodityAnalyzer,
    store: SnapshotStore,
    alerts: AlertDispatcher,
}

impl SupplyRisk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> SupplyRiskBuilder {
        SupplyRiskBuilder::default()
    }

    /// Assemble an SDK from already built parts.
    pub fn from_parts(
        analyzer: CommodityAnalyzer,
        store: SnapshotStore,
        alerts: AlertDispatcher,
    ) -> Self {
        Self {
            analyzer,
            store,
            alerts,
        }
    }

    // -- Analysis ----------------------------------------------------------

    /// Fetch live prices for one commodity and score it.
    pub fn analyze_commodity(&self, commodity: &str) -> CommodityReport {
        self.analyzer.analyze_commodity(commodity)
    }

    /// Analyze every tracked commodity, in order, with pacing.
    pub fn analyze_all(&self) -> Vec<CommodityReport> {
        self.analyzer.analyze_all()
    }

    /// Analyze an arbitrary list of commodities, in order, with pacing.
    pub fn analyze_many<S: AsRef<str>>(&self, commodities: &[S]) -> Vec<CommodityReport> {
        self.analyzer.analyze_many(commodities)
    }

    /// Analyze `commodities` and summarize them side by side.
    pub fn compare<S: AsRef<str>>(&self, commodities: &[S]) -> Comparison {
        Comparison::new(self.analyzer.analyze_many(commodities))
    }

    /// Run a batch over the tracked commodities and save the snapshot.
    pub fn scan(&self) -> Result<Snapshot> {
        tracing::info!(commodities = self.commodities().len(), "starting batch scan");
        let snapshot = Snapshot::new(self.analyze_all());
        self.store.save(&snapshot)?;
        Ok(snapshot)
    }

    /// Load the snapshot written by the most recent [`scan`](Self::scan).
    pub fn latest_report(&self) -> Result<Snapshot> {
        self.store.load()
    }

    // -- Accessors ---------------------------------------------------------

    /// The tracked commodity list.
    pub fn commodities(&self) -> &[String] {
        &self.analyzer.config().commodities
    }

    pub fn analyzer(&self) -> &CommodityAnalyzer {
        &self.analyzer
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn alerts(&self) -> &AlertDispatcher {
        &self.alerts
    }

    /// Access the tool-call interface.
    ///
    /// Returns a lightweight wrapper that borrows the SDK and exposes each
    /// operation as a JSON-in, JSON-out tool.
    pub fn tools(&self) -> tools::ToolKit<'_> {
        tools::ToolKit::new(self)
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SupplyRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = self.alerts.status();
        write!(
            f,
            "SupplyRisk(strategy={:?}, commodities=[{}], data_dir={}, email={}, sms={})",
            self.analyzer.collector().strategy(),
            self.commodities().join(", "),
            self.store.data_dir.display(),
            status.email,
            status.sms
        )
    }
}
