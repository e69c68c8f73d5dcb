use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::log_sanitizer::{REDACTED, is_secret_key};
use crate::validation::ValidationError;

// ============ Parameter Values ============

/// A single module parameter value as supplied by the orchestration host.
///
/// JSON `null` deserializes to [`ParamValue::Absent`], which the host uses for
/// options the caller did not set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// String value.
    String(String),
    /// Explicitly unset.
    Absent,
}

impl ParamValue {
    /// Whether the value counts as supplied: not absent and not a blank string.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Absent => false,
            Self::String(s) => !s.trim().is_empty(),
            Self::Bool(_) | Self::Integer(_) => true,
        }
    }

    /// Returns the string slice if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Interprets the value as a boolean the way the host does.
    ///
    /// Accepts real booleans, `0`/`1`, and the strings
    /// `true/false/yes/no/on/off/1/0` (case-insensitive).
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Integer(0) => Some(false),
            Self::Integer(1) => Some(true),
            Self::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "on" | "1" | "y" | "t" => Some(true),
                "false" | "no" | "off" | "0" | "n" | "f" => Some(false),
                _ => None,
            },
            Self::Integer(_) | Self::Absent => None,
        }
    }

    /// Interprets the value as an integer; numeric strings are accepted.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::String(s) => s.trim().parse().ok(),
            Self::Bool(_) | Self::Absent => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::String(s) => f.write_str(s),
            Self::Absent => Ok(()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

// ============ Parameter Set ============

/// Flat mapping of parameter names to values for one module invocation.
///
/// Serialized transparently as a JSON object. The `Debug` output masks secret
/// parameters such as `password` and `token`.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    /// Key selecting the authentication type.
    pub const AUTH_TYPE: &'static str = "auth_type";
    /// Key of the dry-run flag.
    pub const CHECK_MODE: &'static str = "check_mode";

    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Whether `key` holds a present, non-empty value.
    pub fn is_present(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(ParamValue::is_present)
    }

    /// Returns the value of `key` only when it is present.
    pub fn present(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key).filter(|v| v.is_present())
    }

    /// Returns `key` as a string when it is a present string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.present(key).and_then(ParamValue::as_str)
    }

    /// Reads `key` as a boolean.
    ///
    /// Returns `Ok(None)` when the key is absent and
    /// [`ValidationError::InvalidValue`] when it is not a boolean.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>, ValidationError> {
        match self.present(key) {
            None => Ok(None),
            Some(v) => v.as_bool().map(Some).ok_or_else(|| ValidationError::InvalidValue {
                key: key.to_string(),
                reason: format!("'{v}' is not a valid boolean"),
            }),
        }
    }

    /// Reads `key` as an integer.
    pub fn get_int(&self, key: &str) -> Result<Option<i64>, ValidationError> {
        match self.present(key) {
            None => Ok(None),
            Some(v) => v.as_int().map(Some).ok_or_else(|| ValidationError::InvalidValue {
                key: key.to_string(),
                reason: format!("'{v}' is not a valid integer"),
            }),
        }
    }

    /// Resolves the selected [`AuthType`], defaulting to `cloud-config`.
    pub fn auth_type(&self) -> Result<AuthType, ValidationError> {
        match self.present(Self::AUTH_TYPE) {
            None => Ok(AuthType::default()),
            Some(v) => v.to_string().parse(),
        }
    }

    /// Whether the host asked for a dry run.
    pub fn check_mode(&self) -> bool {
        self.present(Self::CHECK_MODE)
            .and_then(ParamValue::as_bool)
            .unwrap_or(false)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl fmt::Debug for ParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_redacted(f, &self.values)
    }
}

fn debug_redacted(f: &mut fmt::Formatter<'_>, values: &BTreeMap<String, ParamValue>) -> fmt::Result {
    let mut map = f.debug_map();
    for (key, value) in values {
        if is_secret_key(key) && value.is_present() {
            map.entry(key, &REDACTED);
        } else {
            map.entry(key, value);
        }
    }
    map.finish()
}

// ============ Auth Types ============

/// OpenStack authentication method selected for an invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AuthType {
    /// Credentials come from a named entry in `clouds.yaml`.
    #[default]
    #[serde(rename = "cloud-config")]
    CloudConfig,
    /// Keystone application credential.
    #[serde(rename = "v3applicationcredential")]
    V3ApplicationCredential,
    /// OpenID Connect resource-owner password flow.
    #[serde(rename = "v3oidcpassword")]
    V3OidcPassword,
    /// SAML2 ECP password flow.
    #[serde(rename = "v3samlpassword")]
    V3SamlPassword,
    /// Username/password.
    #[serde(rename = "v3password")]
    V3Password,
    /// Existing token.
    #[serde(rename = "v3token")]
    V3Token,
    /// X.509 client certificate, no token.
    #[serde(rename = "v3tokenlessauth")]
    V3TokenlessAuth,
    /// Time-based one-time password.
    #[serde(rename = "v3totp")]
    V3Totp,
}

impl AuthType {
    /// Every supported authentication type.
    pub const ALL: [Self; 8] = [
        Self::CloudConfig,
        Self::V3ApplicationCredential,
        Self::V3OidcPassword,
        Self::V3SamlPassword,
        Self::V3Password,
        Self::V3Token,
        Self::V3TokenlessAuth,
        Self::V3Totp,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CloudConfig => "cloud-config",
            Self::V3ApplicationCredential => "v3applicationcredential",
            Self::V3OidcPassword => "v3oidcpassword",
            Self::V3SamlPassword => "v3samlpassword",
            Self::V3Password => "v3password",
            Self::V3Token => "v3token",
            Self::V3TokenlessAuth => "v3tokenlessauth",
            Self::V3Totp => "v3totp",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| ValidationError::UnknownAuthType {
                value: s.to_string(),
            })
    }
}

// ============ Connection Config ============

/// Endpoint interface used when picking URLs from the service catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interface {
    #[default]
    Public,
    Internal,
    Admin,
}

impl Interface {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interface {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "public" => Ok(Self::Public),
            "internal" => Ok(Self::Internal),
            "admin" => Ok(Self::Admin),
            other => Err(ValidationError::InvalidValue {
                key: "interface".to_string(),
                reason: format!("'{other}' is not one of public, internal, admin"),
            }),
        }
    }
}

/// Auth-type independent session settings handed to the connector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub interface: Interface,
    pub region_name: String,
    /// Whether TLS certificates are verified.
    pub verify: bool,
    /// Socket timeout in seconds for API calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_timeout: Option<u64>,
    /// CA bundle path; only set when `verify` is true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cacert: Option<String>,
}

// ============ Auth Credential ============

/// Parameters relevant to one [`AuthType`], as passed to the connector.
///
/// Holds the `auth_type` tag (unless the type is `cloud-config`) plus the
/// present members of the auth type's requirement rules. The `Debug` output
/// masks secrets.
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthCredential {
    entries: BTreeMap<String, ParamValue>,
}

impl AuthCredential {
    pub(crate) fn insert(&mut self, key: impl Into<String>, value: ParamValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The explicit `auth_type` tag, if any.
    pub fn auth_type(&self) -> Option<&str> {
        self.entries
            .get(ParameterSet::AUTH_TYPE)
            .and_then(ParamValue::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for AuthCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_redacted(f, &self.entries)
    }
}

// ============ Connect Result ============

/// Endpoints available to the authenticated session, keyed by service type.
pub type ServiceCatalog = serde_json::Map<String, serde_json::Value>;

/// Normalized outcome of one connect attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ConnectResult {
    /// The connector authenticated and both fields were read.
    Success {
        auth_token: String,
        service_catalog: ServiceCatalog,
    },
    /// The connector failed, or reading the connection failed.
    ///
    /// `diagnostic_trace` is only set for failures after a successful connect.
    Failure {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        diagnostic_trace: Option<String>,
    },
}

impl ConnectResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_value_presence() {
        assert!(ParamValue::from("x").is_present());
        assert!(ParamValue::Bool(false).is_present());
        assert!(ParamValue::Integer(0).is_present());
        assert!(!ParamValue::from("   ").is_present());
        assert!(!ParamValue::Absent.is_present());
    }

    #[test]
    fn param_value_bool_coercion() {
        assert_eq!(ParamValue::from("yes").as_bool(), Some(true));
        assert_eq!(ParamValue::from("Off").as_bool(), Some(false));
        assert_eq!(ParamValue::Integer(1).as_bool(), Some(true));
        assert_eq!(ParamValue::from("maybe").as_bool(), None);
        assert_eq!(ParamValue::Integer(7).as_bool(), None);
    }

    #[test]
    fn param_value_int_coercion() {
        assert_eq!(ParamValue::from(" 30 ").as_int(), Some(30));
        assert_eq!(ParamValue::Integer(-2).as_int(), Some(-2));
        assert_eq!(ParamValue::Bool(true).as_int(), None);
    }

    #[test]
    fn parameter_set_deserializes_null_as_absent() {
        let json = r#"{"region_name": "RegionOne", "cloud": null, "api_timeout": 30, "validate_certs": true}"#;
        let params: ParameterSet = serde_json::from_str(json).unwrap();
        assert_eq!(params.get("cloud"), Some(&ParamValue::Absent));
        assert!(!params.is_present("cloud"));
        assert_eq!(params.get_int("api_timeout").unwrap(), Some(30));
        assert_eq!(params.get_bool("validate_certs").unwrap(), Some(true));
    }

    #[test]
    fn parameter_set_typed_getters_reject_garbage() {
        let params = ParameterSet::new()
            .with("api_timeout", "soon")
            .with("validate_certs", "perhaps");
        assert!(matches!(
            params.get_int("api_timeout"),
            Err(ValidationError::InvalidValue { .. })
        ));
        assert!(matches!(
            params.get_bool("validate_certs"),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn auth_type_defaults_to_cloud_config() {
        assert_eq!(ParameterSet::new().auth_type().unwrap(), AuthType::CloudConfig);
        let params = ParameterSet::new().with("auth_type", ParamValue::Absent);
        assert_eq!(params.auth_type().unwrap(), AuthType::CloudConfig);
    }

    #[test]
    fn auth_type_parse_round_trip() {
        for t in AuthType::ALL {
            assert_eq!(t.as_str().parse::<AuthType>().unwrap(), t);
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn auth_type_unknown_is_rejected() {
        let params = ParameterSet::new().with("auth_type", "v9fake");
        assert_eq!(
            params.auth_type(),
            Err(ValidationError::UnknownAuthType {
                value: "v9fake".to_string()
            })
        );
    }

    #[test]
    fn check_mode_flag() {
        assert!(!ParameterSet::new().check_mode());
        assert!(ParameterSet::new().with("check_mode", true).check_mode());
        assert!(ParameterSet::new().with("check_mode", "yes").check_mode());
    }

    #[test]
    fn debug_masks_secrets() {
        let params = ParameterSet::new()
            .with("username", "alice")
            .with("password", "hunter2");
        let rendered = format!("{params:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains(REDACTED));
    }

    #[test]
    fn interface_parse() {
        assert_eq!("internal".parse::<Interface>().unwrap(), Interface::Internal);
        assert!("private".parse::<Interface>().is_err());
    }

    #[test]
    fn connect_result_serializes_with_status_tag() {
        let result = ConnectResult::Failure {
            message: "bad creds".to_string(),
            diagnostic_trace: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"status":"failure","message":"bad creds"}"#);
    }
}
