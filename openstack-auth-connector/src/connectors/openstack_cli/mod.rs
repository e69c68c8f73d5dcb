//! Connector backed by the `openstack` command-line client

mod command;
mod connector;
mod types;

use std::path::PathBuf;

use crate::error::{ConnectorError, Result};

/// Library name reported when the client cannot be found.
pub(crate) const LIBRARY: &str = "openstack";
/// Environment variable overriding the client executable.
pub(crate) const EXECUTABLE_ENV: &str = "OPENSTACK_CLI";

/// Connector that shells out to the `openstack` client.
///
/// Credentials are passed through `OS_*` environment variables so they never
/// appear on the command line.
pub struct OpenstackCliConnector {
    pub(crate) executable: PathBuf,
}

impl OpenstackCliConnector {
    /// Locates the client via `$OPENSTACK_CLI` or `PATH`.
    ///
    /// Returns [`ConnectorError::SdkUnavailable`] when it cannot be found.
    pub fn locate() -> Result<Self> {
        let name = std::env::var_os(EXECUTABLE_ENV).unwrap_or_else(|| LIBRARY.into());
        let executable =
            which::which(&name).map_err(|e| ConnectorError::sdk_unavailable(LIBRARY, e))?;
        log::debug!("Using openstack client at {}", executable.display());
        Ok(Self { executable })
    }

    /// Uses `executable` as is, without searching `PATH`.
    pub fn with_executable(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
        }
    }
}
