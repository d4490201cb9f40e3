//! Async wrapper around [`SupplyRisk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! pipeline itself stays sequential: upstream calls and their pacing sleeps
//! happen on the blocking thread.
//!
//! # Example
//!
//! ```no_run
//! use supply_risk::AsyncSupplyRisk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let risk = AsyncSupplyRisk::new(supply_risk::SupplyRisk::builder()).await.unwrap();
//!
//!     let rice = risk.analyze_commodity("rice").await.unwrap();
//!     let tools = risk.run(|r| Ok(r.tools().list_commodities())).await.unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::error::{Result, SupplyRiskError};
use crate::models::{CommodityReport, Snapshot};
use crate::{SupplyRisk, SupplyRiskBuilder};

/// Async wrapper around [`SupplyRisk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. A [`Mutex`] serializes runs so that two
/// batches never hit the upstream API concurrently.
#[derive(Clone)]
pub struct AsyncSupplyRisk {
    inner: Arc<Mutex<SupplyRisk>>,
}

impl AsyncSupplyRisk {
    /// Build the SDK on the blocking thread pool.
    pub async fn new(builder: SupplyRiskBuilder) -> Result<Self> {
        tokio::task::spawn_blocking(move || {
            let risk = builder.build()?;
            Ok(Self::from_sdk(risk))
        })
        .await
        .map_err(|e| SupplyRiskError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Wrap an already built SDK.
    pub fn from_sdk(risk: SupplyRisk) -> Self {
        Self {
            inner: Arc::new(Mutex::new(risk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives a `&SupplyRisk` reference and should return
    /// a `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&SupplyRisk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let risk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = risk
                .lock()
                .map_err(|_| SupplyRiskError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| SupplyRiskError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn analyze_commodity(&self, commodity: &str) -> Result<CommodityReport> {
        let commodity = commodity.to_string();
        self.run(move |r| Ok(r.analyze_commodity(&commodity))).await
    }

    pub async fn analyze_all(&self) -> Result<Vec<CommodityReport>> {
        self.run(|r| Ok(r.analyze_all())).await
    }

    pub async fn scan(&self) -> Result<Snapshot> {
        self.run(|r| r.scan()).await
    }

    pub async fn latest_report(&self) -> Result<Snapshot> {
        self.run(|r| r.latest_report()).await
    }

    /// Dispatch a tool call by name.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let name = name.to_string();
        self.run(move |r| r.tools().call(&name, arguments)).await
    }
}
