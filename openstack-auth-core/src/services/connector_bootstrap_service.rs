//! Connector bootstrap service
//!
//! Loads connectors at start-up and registers them by name

use std::sync::Arc;

use openstack_auth_connector::{Connector, ConnectorKind, Result, create_connector};

use crate::traits::ConnectorRegistry;

use super::DEFAULT_CONNECTOR;

/// Connector bootstrap service
pub struct ConnectorBootstrapService {
    registry: Arc<dyn ConnectorRegistry>,
}

impl ConnectorBootstrapService {
    #[must_use]
    pub fn new(registry: Arc<dyn ConnectorRegistry>) -> Self {
        Self { registry }
    }

    /// Load the connector of `kind` and register it as [`DEFAULT_CONNECTOR`].
    ///
    /// A load failure is logged and leaves the registry untouched; the
    /// invocation then reports the library as unavailable.
    pub async fn load_default(&self, kind: ConnectorKind) -> bool {
        self.register_with(DEFAULT_CONNECTOR, || create_connector(kind))
            .await
    }

    /// Register the connector produced by `load` under `name`.
    pub async fn register_with<F>(&self, name: &str, load: F) -> bool
    where
        F: FnOnce() -> Result<Arc<dyn Connector>> + Send,
    {
        match load() {
            Ok(connector) => {
                log::debug!("Registered connector '{}' as '{name}'", connector.id());
                self.registry.register(name.to_string(), connector).await;
                true
            }
            Err(e) => {
                log::warn!("Failed to load connector '{name}': {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use openstack_auth_connector::ConnectorError;

    use super::*;
    use crate::test_utils::MockConnector;
    use crate::traits::InMemoryConnectorRegistry;

    #[tokio::test]
    async fn registers_loaded_connector() {
        let registry = Arc::new(InMemoryConnectorRegistry::new());
        let bootstrap = ConnectorBootstrapService::new(registry.clone());

        let loaded = bootstrap
            .register_with(DEFAULT_CONNECTOR, || {
                Ok(Arc::new(MockConnector::succeeding("T")) as Arc<dyn Connector>)
            })
            .await;
        assert!(loaded);
        assert_eq!(registry.list_names().await, vec![DEFAULT_CONNECTOR]);
    }

    #[tokio::test]
    async fn load_failure_leaves_registry_empty() {
        let registry = Arc::new(InMemoryConnectorRegistry::new());
        let bootstrap = ConnectorBootstrapService::new(registry.clone());

        let loaded = bootstrap
            .register_with(DEFAULT_CONNECTOR, || {
                Err(ConnectorError::sdk_unavailable("openstack", "not found"))
            })
            .await;
        assert!(!loaded);
        assert!(registry.list_names().await.is_empty());
    }
}
