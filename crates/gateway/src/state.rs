//! Shared application state
//!
//! The gateway owns at most one loaded graph at a time. Loads build a complete
//! snapshot before taking the write lock, so readers never see a partial graph,
//! and a request that already cloned the previous snapshot keeps using it.

use citegraph_common::{config::AppConfig, errors::{AppError, Result}};
use citegraph_search::GraphSnapshot;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::middleware::rate_limit::GlobalRateLimiter;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub session: Arc<GraphSession>,
    pub limiter: Option<Arc<GlobalRateLimiter>>,
}

/// Slot holding the current graph snapshot
#[derive(Default)]
pub struct GraphSession {
    current: RwLock<Option<Arc<GraphSnapshot>>>,
}

impl GraphSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot, or [`AppError::GraphNotLoaded`]
    pub async fn current(&self) -> Result<Arc<GraphSnapshot>> {
        self.current.read().await.clone().ok_or(AppError::GraphNotLoaded)
    }

    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Install a new snapshot, replacing the previous one
    pub async fn replace(&self, snapshot: GraphSnapshot) -> Arc<GraphSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.current.write().await = Some(snapshot.clone());
        snapshot
    }

    /// Parse and analyse a document off the async runtime, then install it.
    /// On failure the previous snapshot stays in place.
    pub async fn load(&self, document: Vec<u8>) -> Result<Arc<GraphSnapshot>> {
        let snapshot = tokio::task::spawn_blocking(move || GraphSnapshot::load(&document))
            .await
            .map_err(|e| AppError::Internal {
                message: format!("Graph load task failed: {}", e),
            })??;

        Ok(self.replace(snapshot).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &[u8] = br#"{"nodes": [{"id": "p1", "type": "paper"}], "edges": []}"#;

    #[tokio::test]
    async fn test_empty_session() {
        let session = GraphSession::new();
        assert!(!session.is_loaded().await);
        assert!(matches!(session.current().await, Err(AppError::GraphNotLoaded)));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_snapshot() {
        let session = GraphSession::new();
        let first = session.load(GOOD.to_vec()).await.unwrap();

        let err = session.load(b"{\"nodes\": []}".to_vec()).await.unwrap_err();
        assert!(matches!(err, AppError::Parse { .. }));

        let current = session.current().await.unwrap();
        assert!(Arc::ptr_eq(&first, &current));
    }

    #[tokio::test]
    async fn test_readers_keep_superseded_snapshot() {
        let session = GraphSession::new();
        let old = session.load(GOOD.to_vec()).await.unwrap();

        session
            .load(br#"{"nodes": [{"id": "p1"}, {"id": "p2"}], "edges": []}"#.to_vec())
            .await
            .unwrap();

        assert_eq!(old.graph.node_count(), 1);
        assert_eq!(session.current().await.unwrap().graph.node_count(), 2);
    }
}
