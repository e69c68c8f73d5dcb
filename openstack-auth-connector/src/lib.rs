//! # openstack-auth-connector
//!
//! Validates OpenStack authentication parameters, turns them into a
//! connection request and dispatches that request through a [`Connector`].
//!
//! ## Supported Auth Types
//!
//! | Auth type | Always required |
//! |-----------|-----------------|
//! | `cloud-config` *(default)* | `cloud` |
//! | `v3applicationcredential` | `application_credential_secret`, `auth_url` |
//! | `v3oidcpassword` | `auth_url`, `client_id`, `client_secret`, ... |
//! | `v3samlpassword` | `auth_url`, `identity_provider`, `identity_provider_url`, ... |
//! | `v3password` | `auth_url`, `password` |
//! | `v3token` | `auth_url`, `token` |
//! | `v3tokenlessauth` | `auth_url`, `x509_key_file` |
//! | `v3totp` | `auth_url`, `passcode` |
//!
//! `region_name` is required for every auth type. Most types also need one of
//! several either-or pairs (`domain_id`/`domain_name`, ...); see
//! [`describe_auth_types`] for the full tables.
//!
//! ## Feature Flags
//!
//! - **`openstack-cli`** *(default)*: connector that shells out to the
//!   `openstack` command-line client.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use openstack_auth_connector::{
//!     build, create_connector, dispatch, validate_params, ConnectorKind, ParameterSet,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let params = ParameterSet::new()
//!         .with("region_name", "RegionOne")
//!         .with("cloud", "devstack");
//!
//!     // 1. Check the parameters against the rules of their auth type
//!     let auth_type = validate_params(&params)?;
//!
//!     // 2. Build the connection settings and the credential
//!     let (config, credential) = build(&params, auth_type);
//!
//!     // 3. Connect once and read token + catalog
//!     let connector = create_connector(ConnectorKind::OpenstackCli)?;
//!     let result = dispatch(&config, &credential, connector.as_ref()).await;
//!     println!("success: {}", result.is_success());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! - Validation returns [`ValidationErrors`], every violation in one pass.
//! - Connectors return [`ConnectorError`].
//! - [`dispatch`] never fails: every outcome is folded into a
//!   [`ConnectResult`].

mod builder;
mod connectors;
mod dispatcher;
mod error;
mod factory;
mod rules;
mod traits;
mod types;
mod utils;
mod validation;

pub use builder::{build, build_connection_config, build_credential};
pub use dispatcher::dispatch;
pub use error::{ConnectorError, Result};
pub use factory::{ConnectorKind, available_connectors, create_connector};
pub use rules::{
    ACCESS_TOKEN_TYPES, AuthTypeMetadata, GENERIC_OPTIONS, OptionalGroup, REGION_NAME,
    RequirementRule, RuleKind, accepts, declared_keys, describe_auth_types, optional_group,
    requirement_rules,
};
pub use traits::{Connection, Connector};
pub use types::{
    AuthCredential, AuthType, ConnectResult, ConnectionConfig, Interface, ParamValue,
    ParameterSet, ServiceCatalog,
};
pub use utils::log_sanitizer;
pub use validation::{ValidationError, ValidationErrors, validate, validate_params};

#[cfg(feature = "openstack-cli")]
pub use connectors::OpenstackCliConnector;
