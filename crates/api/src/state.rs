use std::sync::Arc;

use hamdash_core::cards::CardRegistry;
use hamdash_core::snapshot::DashboardSnapshot;
use tokio::sync::RwLock;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Card producers, built once at startup.
    pub registry: Arc<CardRegistry>,
    /// Current snapshot. Replaced wholesale, never mutated in place.
    snapshot: Arc<RwLock<Arc<DashboardSnapshot>>>,
}

impl AppState {
    pub fn new(config: ServerConfig, registry: CardRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
            snapshot: Arc::new(RwLock::new(Arc::new(DashboardSnapshot::default()))),
        }
    }

    /// The snapshot current at the time of the call.
    pub async fn snapshot(&self) -> Arc<DashboardSnapshot> {
        Arc::clone(&*self.snapshot.read().await)
    }

    /// Swap in a new snapshot.
    pub async fn replace_snapshot(&self, snapshot: DashboardSnapshot) {
        *self.snapshot.write().await = Arc::new(snapshot);
    }
}
