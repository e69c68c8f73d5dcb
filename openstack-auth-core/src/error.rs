//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error types
pub use openstack_auth_connector::{ConnectorError, ValidationErrors};

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// The module arguments are not a usable JSON object
    #[error("Invalid module arguments: {0}")]
    InvalidArguments(String),

    /// Parameter constraint violations, all of them
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Connector error (converting from library)
    #[error("{0}")]
    Connector(#[from] ConnectorError),
}

impl CoreError {
    /// Whether it is expected behavior (caller input, cloud-side rejection), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidArguments(_) | Self::Validation(_) => true,
            Self::Connector(e) => e.is_expected(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use openstack_auth_connector::{ParameterSet, validate_params};

    #[test]
    fn validation_errors_display_verbatim() {
        let errors = validate_params(&ParameterSet::new().with("auth_type", "v9fake")).unwrap_err();
        let err = CoreError::from(errors);
        assert_eq!(
            err.to_string(),
            "unsupported auth_type 'v9fake'; missing required parameters: region_name"
        );
        assert!(err.is_expected());
    }

    #[test]
    fn sdk_unavailable_is_unexpected() {
        let err = CoreError::from(ConnectorError::sdk_unavailable("openstack", "not found"));
        assert!(!err.is_expected());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "Connector");
        assert_eq!(json["details"]["code"], "SdkUnavailable");
    }
}
