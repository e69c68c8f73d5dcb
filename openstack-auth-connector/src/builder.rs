//! Builds connector inputs from a validated [`ParameterSet`].

use crate::rules::{self, REGION_NAME};
use crate::types::{AuthCredential, AuthType, ConnectionConfig, Interface, ParamValue, ParameterSet};

/// Derives the connection settings and the credential for `auth_type`.
///
/// Expects `params` to have passed [`validate`](crate::validate). Values that
/// fail to parse fall back to the option defaults; nothing outside the rule
/// tables of `auth_type` is copied into the credential.
pub fn build(params: &ParameterSet, auth_type: AuthType) -> (ConnectionConfig, AuthCredential) {
    (build_connection_config(params), build_credential(params, auth_type))
}

/// Assembles the auth-type independent [`ConnectionConfig`].
pub fn build_connection_config(params: &ParameterSet) -> ConnectionConfig {
    let interface = params
        .present("interface")
        .and_then(|v| v.to_string().parse::<Interface>().ok())
        .unwrap_or_default();
    let verify = params
        .get_bool("validate_certs")
        .ok()
        .flatten()
        .unwrap_or(false);
    let api_timeout = params
        .get_int("api_timeout")
        .ok()
        .flatten()
        .and_then(|secs| u64::try_from(secs).ok());
    let cacert = if verify {
        params.present("ca_cert_file").map(ToString::to_string)
    } else {
        None
    };

    ConnectionConfig {
        interface,
        region_name: params
            .present(REGION_NAME)
            .map(ToString::to_string)
            .unwrap_or_default(),
        verify,
        api_timeout,
        cacert,
    }
}

/// Copies the parameters declared by the rules of `auth_type` into a new
/// [`AuthCredential`], tagging it with the auth type unless it is
/// `cloud-config`.
pub fn build_credential(params: &ParameterSet, auth_type: AuthType) -> AuthCredential {
    let mut credential = AuthCredential::default();
    if auth_type != AuthType::CloudConfig {
        credential.insert(
            ParameterSet::AUTH_TYPE,
            ParamValue::String(auth_type.as_str().to_string()),
        );
    }
    for key in rules::declared_keys(auth_type) {
        if let Some(value) = params.present(key) {
            credential.insert(key, value.clone());
        }
    }

    log::debug!(
        "Built {auth_type} credential with keys [{}]",
        credential.keys().collect::<Vec<_>>().join(", ")
    );
    credential
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cloud_config_credential_is_just_cloud() {
        let params = ParameterSet::new()
            .with("region_name", "RegionOne")
            .with("cloud", "mycloud");
        let (_, credential) = build(&params, AuthType::CloudConfig);

        assert!(credential.auth_type().is_none());
        assert_eq!(credential.len(), 1);
        assert_eq!(credential.get("cloud"), Some(&ParamValue::from("mycloud")));
    }

    #[test]
    fn v3token_credential_has_no_foreign_keys() {
        let params = ParameterSet::new()
            .with("region_name", "r1")
            .with("auth_url", "https://x")
            .with("token", "abc")
            .with("domain_name", "Default")
            .with("project_name", "p")
            // belong to other auth types
            .with("cloud", "leftover")
            .with("password", "pw")
            .with("username", "alice");
        let (_, credential) = build(&params, AuthType::V3Token);

        let keys: Vec<_> = credential.keys().collect();
        assert_eq!(
            keys,
            vec!["auth_type", "auth_url", "domain_name", "project_name", "token"]
        );
        assert_eq!(credential.auth_type(), Some("v3token"));
        assert_eq!(credential.get("token"), Some(&ParamValue::from("abc")));
    }

    #[test]
    fn absent_and_blank_values_are_skipped() {
        let params = ParameterSet::new()
            .with("region_name", "r1")
            .with("auth_url", "https://x")
            .with("password", "pw")
            .with("domain_id", ParamValue::Absent)
            .with("domain_name", "  ");
        let (_, credential) = build(&params, AuthType::V3Password);
        assert!(!credential.contains_key("domain_id"));
        assert!(!credential.contains_key("domain_name"));
    }

    #[test]
    fn optional_group_members_are_not_copied() {
        let params = ParameterSet::new()
            .with("region_name", "r1")
            .with("auth_url", "https://x")
            .with("token", "abc")
            .with("trust_id", "t-1");
        let (_, credential) = build(&params, AuthType::V3Token);
        assert!(!credential.contains_key("trust_id"));
    }

    #[test]
    fn connection_config_defaults() {
        let params = ParameterSet::new().with("region_name", "RegionOne");
        let config = build_connection_config(&params);
        assert_eq!(
            config,
            ConnectionConfig {
                interface: Interface::Public,
                region_name: "RegionOne".to_string(),
                verify: false,
                api_timeout: None,
                cacert: None,
            }
        );
    }

    #[test]
    fn cacert_only_honoured_when_verifying() {
        let params = ParameterSet::new()
            .with("region_name", "RegionOne")
            .with("ca_cert_file", "/etc/ssl/ca.pem");
        assert_eq!(build_connection_config(&params).cacert, None);

        let params = params.with("validate_certs", "yes").with("api_timeout", 45_i64);
        let config = build_connection_config(&params);
        assert!(config.verify);
        assert_eq!(config.cacert.as_deref(), Some("/etc/ssl/ca.pem"));
        assert_eq!(config.api_timeout, Some(45));
    }

    #[test]
    fn interface_is_parsed() {
        let params = ParameterSet::new()
            .with("region_name", "RegionOne")
            .with("interface", "internal");
        assert_eq!(build_connection_config(&params).interface, Interface::Internal);
    }

    #[test]
    fn build_does_not_touch_params() {
        let params = ParameterSet::new()
            .with("region_name", "r1")
            .with("cloud", "c");
        let before = params.clone();
        let _ = build(&params, AuthType::CloudConfig);
        assert_eq!(params, before);
    }
}
