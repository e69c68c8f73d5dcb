//! Test helpers
//!
//! Mock connectors and a registry factory.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use openstack_auth_connector::{
    AuthCredential, Connection, ConnectionConfig, Connector, ConnectorError, Result,
    ServiceCatalog,
};

use crate::services::DEFAULT_CONNECTOR;
use crate::traits::{ConnectorRegistry, InMemoryConnectorRegistry};

// ===== MockConnector =====

enum Mode {
    Succeed(String),
    Reject(String),
    PanicOnCatalog(String),
}

pub struct MockConnector {
    mode: Mode,
    pub calls: AtomicUsize,
    last: Mutex<Option<(ConnectionConfig, Vec<String>)>>,
}

impl MockConnector {
    fn with_mode(mode: Mode) -> Self {
        Self {
            mode,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    pub fn succeeding(token: &str) -> Self {
        Self::with_mode(Mode::Succeed(token.to_string()))
    }

    pub fn rejecting(message: &str) -> Self {
        Self::with_mode(Mode::Reject(message.to_string()))
    }

    pub fn panicking(message: &str) -> Self {
        Self::with_mode(Mode::PanicOnCatalog(message.to_string()))
    }

    pub async fn last_credential_keys(&self) -> Vec<String> {
        self.last
            .lock()
            .await
            .as_ref()
            .map(|(_, keys)| keys.clone())
            .unwrap_or_default()
    }

    pub async fn last_region(&self) -> Option<String> {
        self.last
            .lock()
            .await
            .as_ref()
            .map(|(config, _)| config.region_name.clone())
    }
}

#[async_trait]
impl Connector for MockConnector {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn connect(
        &self,
        config: &ConnectionConfig,
        credential: &AuthCredential,
    ) -> Result<Box<dyn Connection>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().await = Some((
            config.clone(),
            credential.keys().map(ToString::to_string).collect(),
        ));

        match &self.mode {
            Mode::Succeed(token) => Ok(Box::new(MockConnection {
                token: token.clone(),
                panic_message: None,
            })),
            Mode::Reject(message) => Err(ConnectorError::Sdk {
                connector: "mock".to_string(),
                message: message.clone(),
            }),
            Mode::PanicOnCatalog(message) => Ok(Box::new(MockConnection {
                token: "T".to_string(),
                panic_message: Some(message.clone()),
            })),
        }
    }
}

// ===== MockConnection =====

pub struct MockConnection {
    token: String,
    panic_message: Option<String>,
}

impl Connection for MockConnection {
    fn auth_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }

    fn service_catalog(&self) -> Result<ServiceCatalog> {
        if let Some(message) = &self.panic_message {
            panic!("{message}");
        }
        let mut catalog = ServiceCatalog::new();
        catalog.insert("identity".to_string(), json!({"name": "keystone"}));
        Ok(catalog)
    }
}

// ===== Factories =====

/// Registry holding `connector` under [`DEFAULT_CONNECTOR`].
pub async fn registry_with(connector: Arc<dyn Connector>) -> Arc<dyn ConnectorRegistry> {
    let registry = InMemoryConnectorRegistry::new();
    registry
        .register(DEFAULT_CONNECTOR.to_string(), connector)
        .await;
    Arc::new(registry)
}
