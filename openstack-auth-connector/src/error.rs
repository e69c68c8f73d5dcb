use serde::{Deserialize, Serialize};

/// Unified error type for connector operations.
///
/// Connect failures surface to the caller verbatim, so [`Sdk`](Self::Sdk)
/// displays the SDK's own message without decoration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ConnectorError {
    /// The library or executable backing the connector could not be loaded.
    SdkUnavailable {
        /// Name of the missing library.
        library: String,
        /// Why loading failed, if known.
        detail: Option<String>,
    },

    /// The SDK rejected the connect request (bad credentials, unreachable
    /// endpoint, unknown cloud, ...).
    Sdk {
        /// Connector that produced the error.
        connector: String,
        /// Error message as reported by the SDK.
        message: String,
    },

    /// The SDK answered, but its response could not be understood.
    ParseError {
        /// Connector that produced the error.
        connector: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// A field could not be read from an established connection.
    Extraction {
        /// Name of the field being read.
        field: String,
        /// Error details.
        detail: String,
    },
}

impl ConnectorError {
    /// Whether the error stems from caller input or cloud-side rejection,
    /// used for log level selection (`warn` vs `error`).
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Sdk { .. })
    }

    pub fn sdk_unavailable(library: &str, detail: impl ToString) -> Self {
        Self::SdkUnavailable {
            library: library.to_string(),
            detail: Some(detail.to_string()),
        }
    }
}

impl std::fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SdkUnavailable { library, detail } => {
                write!(f, "Failed to load the required library ({library}) on this host")?;
                if let Some(detail) = detail {
                    write!(f, ": {detail}")?;
                }
                Ok(())
            }
            Self::Sdk { message, .. } => f.write_str(message),
            Self::ParseError { connector, detail } => {
                write!(f, "[{connector}] Parse error: {detail}")
            }
            Self::Extraction { field, detail } => {
                write!(f, "Failed to read '{field}' from connection: {detail}")
            }
        }
    }
}

impl std::error::Error for ConnectorError {}

/// Convenience type alias for `Result<T, ConnectorError>`.
pub type Result<T> = std::result::Result<T, ConnectorError>;
