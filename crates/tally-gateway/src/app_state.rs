//! Shared application state for the tally gateway.
//!
//! Owns the counter registry and metrics. Handlers reach both through axum
//! `State`; nothing is process-global, so each test can build its own.

use std::sync::Arc;
use std::time::Duration;

use tally_core::error::Result;
use tally_core::CounterRegistry;

use crate::config::GatewayConfig;
use crate::obs::{Outcome, TallyMetrics};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
    registry: Arc<CounterRegistry>,
    metrics: Arc<TallyMetrics>,
}

struct AppStateInner {
    cfg: GatewayConfig,
}

impl AppState {
    /// Build application state. The config is re-validated here.
    pub fn new(cfg: GatewayConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            inner: Arc::new(AppStateInner { cfg }),
            registry: Arc::new(CounterRegistry::new()),
            metrics: Arc::new(TallyMetrics::default()),
        })
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> &CounterRegistry {
        &self.registry
    }

    pub fn metrics(&self) -> &TallyMetrics {
        &self.metrics
    }

    pub fn record<T>(&self, op: &str, res: &Result<T>, elapsed: Duration) {
        self.metrics.observe(op, Outcome::of(res), elapsed);
    }

    pub fn set_draining(&self) {
        self.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.metrics.is_draining()
    }

    /// Gauges sampled at render time.
    pub fn metrics_extra(&self) -> Vec<(&'static str, u64)> {
        vec![("tally_counters_live", self.registry.len() as u64)]
    }
}
