use serde::Serialize;

use openstack_auth_connector::{ConnectResult, ServiceCatalog};

/// Facts returned to the host after a successful authentication.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthFacts {
    pub auth_token: String,
    pub service_catalog: ServiceCatalog,
}

/// Report printed for the orchestration host.
///
/// Serializes to `{"changed": false, "ansible_facts": {...}}` on success and
/// to `{"failed": true, "msg": "...", "exception": "..."}` on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ModuleReport {
    Exit {
        changed: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        ansible_facts: Option<AuthFacts>,
    },
    Fail {
        failed: bool,
        msg: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        exception: Option<String>,
    },
}

impl ModuleReport {
    /// Nothing was done (check mode).
    pub fn unchanged() -> Self {
        Self::Exit {
            changed: false,
            ansible_facts: None,
        }
    }

    pub fn facts(auth_token: String, service_catalog: ServiceCatalog) -> Self {
        Self::Exit {
            changed: false,
            ansible_facts: Some(AuthFacts {
                auth_token,
                service_catalog,
            }),
        }
    }

    pub fn failed(msg: impl Into<String>, exception: Option<String>) -> Self {
        Self::Fail {
            failed: true,
            msg: msg.into(),
            exception,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Fail { .. })
    }

    /// Process exit code for this report.
    pub fn exit_code(&self) -> u8 {
        u8::from(self.is_failed())
    }
}

impl From<ConnectResult> for ModuleReport {
    fn from(result: ConnectResult) -> Self {
        match result {
            ConnectResult::Success {
                auth_token,
                service_catalog,
            } => Self::facts(auth_token, service_catalog),
            ConnectResult::Failure {
                message,
                diagnostic_trace,
            } => Self::failed(message, diagnostic_trace),
        }
    }
}
