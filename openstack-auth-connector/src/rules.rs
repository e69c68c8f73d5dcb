//! Static requirement tables, indexed by [`AuthType`].

use serde::Serialize;

use crate::types::AuthType;

/// Always required, independent of the auth type.
pub const REGION_NAME: &str = "region_name";

/// Options accepted for every auth type, including the host-level
/// `auth_type` and `check_mode` keys.
pub const GENERIC_OPTIONS: &[&str] = &[
    "auth_type",
    "check_mode",
    REGION_NAME,
    "interface",
    "validate_certs",
    "api_timeout",
    "ca_cert_file",
];

/// Accepted values of `access_token_type`.
pub const ACCESS_TOKEN_TYPES: &[&str] = &["access_token", "id_token"];

/// How the keys of a [`RequirementRule`] are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    /// Every key must be present.
    AllRequired,
    /// At least one key must be present.
    OneOf,
}

/// Presence constraint over a set of parameter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementRule {
    pub kind: RuleKind,
    pub keys: &'static [&'static str],
}

impl RequirementRule {
    const fn all(keys: &'static [&'static str]) -> Self {
        Self {
            kind: RuleKind::AllRequired,
            keys,
        }
    }

    const fn one_of(keys: &'static [&'static str]) -> Self {
        Self {
            kind: RuleKind::OneOf,
            keys,
        }
    }
}

/// Parameters that are meaningful for an auth type but never required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionalGroup {
    pub keys: &'static [&'static str],
}

const DOMAIN: RequirementRule = RequirementRule::one_of(&["domain_id", "domain_name"]);
const PROJECT_DOMAIN: RequirementRule =
    RequirementRule::one_of(&["project_domain_id", "project_domain_name"]);
const PROJECT: RequirementRule = RequirementRule::one_of(&["project_id", "project_name"]);
const USER_DOMAIN: RequirementRule =
    RequirementRule::one_of(&["user_domain_id", "user_domain_name"]);
const USER: RequirementRule = RequirementRule::one_of(&["user_id", "username"]);

const SCOPE_OPTIONS: OptionalGroup = OptionalGroup {
    keys: &["system_scope", "trust_id"],
};

static CLOUD_CONFIG: [RequirementRule; 1] = [RequirementRule::all(&["cloud"])];

static V3_APPLICATION_CREDENTIAL: [RequirementRule; 7] = [
    RequirementRule::all(&["application_credential_secret", "auth_url"]),
    DOMAIN,
    PROJECT_DOMAIN,
    PROJECT,
    USER_DOMAIN,
    USER,
    RequirementRule::one_of(&["application_credential_id", "application_credential_name"]),
];

static V3_OIDC_PASSWORD: [RequirementRule; 4] = [
    RequirementRule::all(&[
        "auth_url",
        "access_token_endpoint",
        "access_token_type",
        "client_id",
        "client_secret",
        "discovery_endpoint",
        "identity_provider",
        "openid_scope",
        "password",
        "protocol",
        "username",
    ]),
    DOMAIN,
    PROJECT_DOMAIN,
    PROJECT,
];

static V3_SAML_PASSWORD: [RequirementRule; 4] = [
    RequirementRule::all(&[
        "auth_url",
        "identity_provider",
        "identity_provider_url",
        "username",
        "password",
    ]),
    DOMAIN,
    PROJECT_DOMAIN,
    PROJECT,
];

static V3_PASSWORD: [RequirementRule; 6] = [
    RequirementRule::all(&["auth_url", "password"]),
    DOMAIN,
    PROJECT_DOMAIN,
    PROJECT,
    USER_DOMAIN,
    USER,
];

static V3_TOKEN: [RequirementRule; 4] = [
    RequirementRule::all(&["auth_url", "token"]),
    DOMAIN,
    PROJECT_DOMAIN,
    PROJECT,
];

static V3_TOKENLESS_AUTH: [RequirementRule; 4] = [
    RequirementRule::all(&["auth_url", "x509_key_file"]),
    DOMAIN,
    PROJECT_DOMAIN,
    PROJECT,
];

static V3_TOTP: [RequirementRule; 6] = [
    RequirementRule::all(&["auth_url", "passcode"]),
    DOMAIN,
    PROJECT_DOMAIN,
    PROJECT,
    USER_DOMAIN,
    USER,
];

/// Requirement rules for `auth_type`.
pub fn requirement_rules(auth_type: AuthType) -> &'static [RequirementRule] {
    match auth_type {
        AuthType::CloudConfig => &CLOUD_CONFIG,
        AuthType::V3ApplicationCredential => &V3_APPLICATION_CREDENTIAL,
        AuthType::V3OidcPassword => &V3_OIDC_PASSWORD,
        AuthType::V3SamlPassword => &V3_SAML_PASSWORD,
        AuthType::V3Password => &V3_PASSWORD,
        AuthType::V3Token => &V3_TOKEN,
        AuthType::V3TokenlessAuth => &V3_TOKENLESS_AUTH,
        AuthType::V3Totp => &V3_TOTP,
    }
}

/// Optional parameter group for `auth_type`, if it has one.
pub fn optional_group(auth_type: AuthType) -> Option<OptionalGroup> {
    match auth_type {
        AuthType::V3ApplicationCredential
        | AuthType::V3Password
        | AuthType::V3SamlPassword
        | AuthType::V3Token
        | AuthType::V3Totp => Some(SCOPE_OPTIONS),
        AuthType::CloudConfig | AuthType::V3OidcPassword | AuthType::V3TokenlessAuth => None,
    }
}

/// Every parameter name the rules of `auth_type` declare, in table order.
pub fn declared_keys(auth_type: AuthType) -> impl Iterator<Item = &'static str> {
    requirement_rules(auth_type)
        .iter()
        .flat_map(|rule| rule.keys.iter().copied())
}

/// Whether `key` is a parameter `auth_type` knows about: a generic option, a
/// key of its rules or a member of its optional group.
pub fn accepts(auth_type: AuthType, key: &str) -> bool {
    GENERIC_OPTIONS.contains(&key)
        || declared_keys(auth_type).any(|k| k == key)
        || optional_group(auth_type).is_some_and(|group| group.keys.contains(&key))
}

// ============ Metadata ============

/// Serializable description of one auth type's parameter requirements.
///
/// Useful for rendering documentation or argument specs for the host.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTypeMetadata {
    pub auth_type: AuthType,
    pub rules: &'static [RequirementRule],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<OptionalGroup>,
}

/// Returns the requirement tables for every supported auth type.
pub fn describe_auth_types() -> Vec<AuthTypeMetadata> {
    AuthType::ALL
        .into_iter()
        .map(|auth_type| AuthTypeMetadata {
            auth_type,
            rules: requirement_rules(auth_type),
            optional: optional_group(auth_type),
        })
        .collect()
}
