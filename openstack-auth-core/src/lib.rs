//! OpenStack Auth Module Core
//!
//! Runs one invocation of the auth module:
//! - parses the module arguments handed over by the orchestration host
//! - validates them, builds the connect request and dispatches it through a
//!   registered connector
//! - folds the outcome into the [`ModuleReport`] the host expects
//!
//! Connectors are injected through a [`ConnectorRegistry`], so the service
//! never loads an SDK itself.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{AuthModuleService, ConnectorBootstrapService, DEFAULT_CONNECTOR};
pub use traits::{ConnectorRegistry, InMemoryConnectorRegistry};
pub use types::{AuthFacts, ModuleReport, parse_module_args};
