//! Service layer

mod auth_module_service;
mod connector_bootstrap_service;

pub use auth_module_service::{AuthModuleService, DEFAULT_CONNECTOR};
pub use connector_bootstrap_service::ConnectorBootstrapService;
