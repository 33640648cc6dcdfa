use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use crate::services::savings_estimator::SavingsEstimator;

#[derive(Clone, Debug)]
pub struct AppState {
    /// Pricing in effect for this process; read-only after startup
    pub estimator: Arc<SavingsEstimator>,
    pub started_at: Instant,
    simulations_served: Arc<AtomicU64>,
}

impl AppState {
    pub fn new(estimator: SavingsEstimator) -> Self {
        Self {
            estimator: Arc::new(estimator),
            started_at: Instant::now(),
            simulations_served: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Add `n` estimates to the served counter.
    pub fn record_simulations(&self, n: u64) {
        self.simulations_served.fetch_add(n, Ordering::Relaxed);
    }

    pub fn simulations_served(&self) -> u64 {
        self.simulations_served.load(Ordering::Relaxed)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
