//! Shared helpers for live connector tests

#![allow(dead_code)]

use std::env;

use openstack_auth_connector::{ParameterSet, ServiceCatalog};

/// Skips the test when any of the given environment variables is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("skipping: {} is not set", $var);
                return;
            }
        )+
    };
}

/// Copies `OS_<KEY>` variables into a parameter set under `key`.
pub fn params_from_env(keys: &[&str]) -> ParameterSet {
    let mut params = ParameterSet::new();
    for key in keys {
        if let Ok(value) = env::var(format!("OS_{}", key.to_ascii_uppercase())) {
            params.insert(*key, value);
        }
    }
    params
}

/// Asserts that a catalog returned by a real cloud lists Keystone.
pub fn assert_has_identity(catalog: &ServiceCatalog) {
    assert!(
        catalog.contains_key("identity"),
        "catalog has no identity service: {:?}",
        catalog.keys().collect::<Vec<_>>()
    );
}
