use serde_json::{Map, Value};

use openstack_auth_connector::{ParamValue, ParameterSet};

use crate::error::{CoreError, CoreResult};

/// Key under which the host may wrap the module parameters.
pub const MODULE_ARGS_KEY: &str = "ANSIBLE_MODULE_ARGS";

/// Host-internal parameters all share this prefix.
const INTERNAL_PREFIX: &str = "_ansible_";
const HOST_CHECK_MODE: &str = "_ansible_check_mode";

/// Parses the module arguments JSON into a [`ParameterSet`].
///
/// Accepts a bare parameter object or one wrapped in `ANSIBLE_MODULE_ARGS`.
/// `_ansible_check_mode` is kept as `check_mode`; every other `_ansible_*`
/// key is dropped. Lists, objects and floats are rejected.
pub fn parse_module_args(json: &str) -> CoreResult<ParameterSet> {
    let value: Value =
        serde_json::from_str(json).map_err(|e| CoreError::InvalidArguments(e.to_string()))?;
    let Value::Object(mut object) = value else {
        return Err(CoreError::InvalidArguments(
            "expected a JSON object".to_string(),
        ));
    };

    if let Some(inner) = object.remove(MODULE_ARGS_KEY) {
        let Value::Object(inner) = inner else {
            return Err(CoreError::InvalidArguments(format!(
                "'{MODULE_ARGS_KEY}' must be an object"
            )));
        };
        object = inner;
    }

    collect(object)
}

fn collect(object: Map<String, Value>) -> CoreResult<ParameterSet> {
    let mut params = ParameterSet::new();
    for (key, value) in object {
        let key = if key == HOST_CHECK_MODE {
            ParameterSet::CHECK_MODE.to_string()
        } else if key.starts_with(INTERNAL_PREFIX) {
            continue;
        } else {
            key
        };
        let value: ParamValue = serde_json::from_value(value).map_err(|_| {
            CoreError::InvalidArguments(format!("'{key}' must be a string, integer or boolean"))
        })?;
        params.insert(key, value);
    }
    if params.is_empty() {
        log::warn!("No module parameters supplied");
    } else {
        log::debug!("Parsed {} module parameters", params.len());
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_object() {
        let params =
            parse_module_args(r#"{"region_name": "RegionOne", "cloud": "devstack"}"#).unwrap();
        assert_eq!(params.get_str("cloud"), Some("devstack"));
        assert!(!params.check_mode());
    }

    #[test]
    fn wrapped_object_and_host_keys() {
        let params = parse_module_args(
            r#"{"ANSIBLE_MODULE_ARGS": {
                "region_name": "RegionOne",
                "api_timeout": 30,
                "ca_cert_file": null,
                "_ansible_check_mode": true,
                "_ansible_verbosity": 2
            }}"#,
        )
        .unwrap();
        assert!(params.check_mode());
        assert_eq!(params.get_int("api_timeout").unwrap(), Some(30));
        assert_eq!(params.get("ca_cert_file"), Some(&ParamValue::Absent));
        assert!(params.get("_ansible_verbosity").is_none());
    }

    #[test]
    fn empty_object_is_empty_set() {
        let params = parse_module_args(r#"{"ANSIBLE_MODULE_ARGS": {"_ansible_verbosity": 0}}"#)
            .unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn rejects_non_objects() {
        assert!(matches!(
            parse_module_args("[1, 2]"),
            Err(CoreError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_module_args(r#"{"ANSIBLE_MODULE_ARGS": "x"}"#),
            Err(CoreError::InvalidArguments(_))
        ));
        assert!(matches!(
            parse_module_args("not json"),
            Err(CoreError::InvalidArguments(_))
        ));
    }

    #[test]
    fn rejects_nested_values() {
        let err = parse_module_args(r#"{"region_name": ["a", "b"]}"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid module arguments: 'region_name' must be a string, integer or boolean"
        );
    }
}
