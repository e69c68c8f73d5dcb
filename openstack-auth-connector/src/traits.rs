use async_trait::async_trait;

use crate::error::Result;
use crate::types::{AuthCredential, ConnectionConfig, ServiceCatalog};

/// Cloud SDK capability that establishes an authenticated session.
///
/// Implementations wrap whatever actually talks to the cloud. They must not
/// retry; [`dispatch`](crate::dispatch) calls [`connect`](Self::connect)
/// exactly once per invocation.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connector identifier
    fn id(&self) -> &'static str;

    /// Authenticate with `credential` using the session settings in `config`.
    ///
    /// Any error returned here is reported to the caller as an SDK failure.
    async fn connect(
        &self,
        config: &ConnectionConfig,
        credential: &AuthCredential,
    ) -> Result<Box<dyn Connection>>;
}

/// Handle to an authenticated session.
///
/// Reading a field may fail independently of the connect call; such failures
/// are reported with a diagnostic trace.
pub trait Connection: Send + Sync {
    /// Token issued for the session.
    fn auth_token(&self) -> Result<String>;

    /// Endpoints visible to the session.
    fn service_catalog(&self) -> Result<ServiceCatalog>;
}
