//! Auth module invocation service
//!
//! One invocation: check mode, validation, build, dispatch, report.

use std::sync::Arc;

use openstack_auth_connector::{
    ConnectResult, ConnectorError, ParameterSet, build, dispatch, validate_params,
};

use crate::error::{CoreError, CoreResult};
use crate::traits::ConnectorRegistry;
use crate::types::ModuleReport;

/// Registry name of the connector used for authentication.
pub const DEFAULT_CONNECTOR: &str = "openstack";

/// Auth module service
pub struct AuthModuleService {
    registry: Arc<dyn ConnectorRegistry>,
    connector_name: String,
}

impl AuthModuleService {
    /// Create a service resolving [`DEFAULT_CONNECTOR`] from `registry`
    #[must_use]
    pub fn new(registry: Arc<dyn ConnectorRegistry>) -> Self {
        Self {
            registry,
            connector_name: DEFAULT_CONNECTOR.to_string(),
        }
    }

    /// Resolve a different registry entry
    #[must_use]
    pub fn with_connector_name(mut self, name: impl Into<String>) -> Self {
        self.connector_name = name.into();
        self
    }

    /// Validate `params`, build the request and dispatch it once.
    ///
    /// Validation failures and a missing connector are errors; everything
    /// the connector reports is folded into the returned [`ConnectResult`].
    pub async fn authenticate(&self, params: &ParameterSet) -> CoreResult<ConnectResult> {
        let auth_type = validate_params(params)?;
        let (config, credential) = build(params, auth_type);

        let connector = self
            .registry
            .get(&self.connector_name)
            .await
            .ok_or_else(|| ConnectorError::SdkUnavailable {
                library: self.connector_name.clone(),
                detail: None,
            })?;

        log::info!(
            "Authenticating with {auth_type} in region {}",
            config.region_name
        );
        Ok(dispatch(&config, &credential, connector.as_ref()).await)
    }

    /// Run one module invocation and produce the host report.
    ///
    /// Check mode returns an unchanged report before anything is validated.
    pub async fn run(&self, params: &ParameterSet) -> ModuleReport {
        if params.check_mode() {
            log::info!("Check mode, nothing to do");
            return ModuleReport::unchanged();
        }

        match self.authenticate(params).await {
            Ok(result) => {
                if result.is_success() {
                    log::info!("Authentication succeeded");
                }
                ModuleReport::from(result)
            }
            Err(e) => Self::report_error(&e),
        }
    }

    fn report_error(e: &CoreError) -> ModuleReport {
        if e.is_expected() {
            log::warn!("Module invocation rejected: {e}");
        } else {
            log::error!("Module invocation failed: {e}");
        }
        ModuleReport::failed(e.to_string(), None)
    }
}
