//! Injection seams of the core layer

mod connector_registry;

pub use connector_registry::{ConnectorRegistry, InMemoryConnectorRegistry};
