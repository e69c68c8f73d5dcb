//! Connector factory functions.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::traits::Connector;

#[cfg(feature = "openstack-cli")]
use crate::connectors::OpenstackCliConnector;

/// Connector implementations this crate knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorKind {
    /// Delegates to the `openstack` command-line client.
    OpenstackCli,
}

impl ConnectorKind {
    pub const ALL: [Self; 1] = [Self::OpenstackCli];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OpenstackCli => "openstack-cli",
        }
    }

    /// Whether the kind was compiled in.
    pub fn is_enabled(self) -> bool {
        match self {
            Self::OpenstackCli => cfg!(feature = "openstack-cli"),
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Creates a [`Connector`] of the given kind.
///
/// Fails with [`ConnectorError::SdkUnavailable`](crate::ConnectorError::SdkUnavailable)
/// when the backing library cannot be found on this host or the kind was
/// compiled out.
///
/// # Examples
///
/// ```rust,no_run
/// use openstack_auth_connector::{create_connector, Connector, ConnectorKind};
///
/// let connector = create_connector(ConnectorKind::OpenstackCli).unwrap();
/// assert_eq!(connector.id(), "openstack-cli");
/// ```
pub fn create_connector(kind: ConnectorKind) -> Result<Arc<dyn Connector>> {
    match kind {
        #[cfg(feature = "openstack-cli")]
        ConnectorKind::OpenstackCli => Ok(Arc::new(OpenstackCliConnector::locate()?)),
        #[cfg(not(feature = "openstack-cli"))]
        ConnectorKind::OpenstackCli => Err(crate::error::ConnectorError::sdk_unavailable(
            "openstack",
            "built without the `openstack-cli` feature",
        )),
    }
}

/// Returns the connector kinds enabled via feature flags.
pub fn available_connectors() -> Vec<ConnectorKind> {
    ConnectorKind::ALL
        .into_iter()
        .filter(|kind| kind.is_enabled())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&ConnectorKind::OpenstackCli).unwrap(),
            "\"openstack-cli\""
        );
        assert_eq!(ConnectorKind::OpenstackCli.to_string(), "openstack-cli");
    }

    #[cfg(feature = "openstack-cli")]
    #[test]
    fn default_features_enable_cli() {
        assert_eq!(available_connectors(), vec![ConnectorKind::OpenstackCli]);
    }
}
