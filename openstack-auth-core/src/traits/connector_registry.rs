//! Connector registry abstract Trait

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use openstack_auth_connector::Connector;

/// Connector Registry Trait
///
/// Holds the connectors the host has loaded, indexed by name.
/// Provides a default memory implementation of `InMemoryConnectorRegistry`.
#[async_trait]
pub trait ConnectorRegistry: Send + Sync {
    /// Register a connector under `name`, replacing any previous one
    async fn register(&self, name: String, connector: Arc<dyn Connector>);

    /// Remove the connector registered under `name`
    async fn unregister(&self, name: &str);

    /// Get a connector instance
    async fn get(&self, name: &str) -> Option<Arc<dyn Connector>>;

    /// List all registered names
    async fn list_names(&self) -> Vec<String>;
}

/// In-memory connector registry
#[derive(Clone)]
pub struct InMemoryConnectorRegistry {
    connectors: Arc<RwLock<HashMap<String, Arc<dyn Connector>>>>,
}

impl InMemoryConnectorRegistry {
    /// Create a new memory registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryConnectorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConnectorRegistry for InMemoryConnectorRegistry {
    async fn register(&self, name: String, connector: Arc<dyn Connector>) {
        self.connectors.write().await.insert(name, connector);
    }

    async fn unregister(&self, name: &str) {
        self.connectors.write().await.remove(name);
    }

    async fn get(&self, name: &str) -> Option<Arc<dyn Connector>> {
        self.connectors.read().await.get(name).cloned()
    }

    async fn list_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.connectors.read().await.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockConnector;

    #[tokio::test]
    async fn register_get_unregister() {
        let registry = InMemoryConnectorRegistry::new();
        assert!(registry.get("openstack").await.is_none());

        registry
            .register("openstack".to_string(), Arc::new(MockConnector::succeeding("T")))
            .await;
        registry
            .register("alt".to_string(), Arc::new(MockConnector::succeeding("U")))
            .await;
        assert_eq!(registry.list_names().await, vec!["alt", "openstack"]);
        assert_eq!(registry.get("openstack").await.map(|c| c.id()), Some("mock"));

        registry.unregister("openstack").await;
        assert!(registry.get("openstack").await.is_none());
        assert_eq!(registry.list_names().await, vec!["alt"]);
    }

    #[tokio::test]
    async fn clones_share_state() {
        let registry = InMemoryConnectorRegistry::new();
        let clone = registry.clone();
        clone
            .register("openstack".to_string(), Arc::new(MockConnector::succeeding("T")))
            .await;
        assert!(registry.get("openstack").await.is_some());
    }
}
