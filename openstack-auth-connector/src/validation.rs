//! Parameter validation against the per-auth-type rule tables.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::rules::{self, REGION_NAME, RuleKind};
use crate::types::{AuthType, Interface, ParamValue, ParameterSet};

/// A single violated parameter constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ValidationError {
    /// One or more parameters that must all be present are missing.
    #[error("{auth_type}: missing required parameters: {}", .missing_keys.join(", "))]
    MissingRequired {
        auth_type: AuthType,
        missing_keys: Vec<String>,
    },

    /// None of an either-or group was supplied.
    #[error("{auth_type}: one of the following is required: {}", .candidates.join(", "))]
    MissingOneOf {
        auth_type: AuthType,
        candidates: Vec<String>,
    },

    /// The `auth_type` value is not a supported authentication type.
    #[error("unsupported auth_type '{value}'")]
    UnknownAuthType { value: String },

    /// Options required for every auth type are missing; only reported on
    /// its own when the auth type itself is unknown.
    #[error("missing required parameters: {}", .missing_keys.join(", "))]
    MissingCommon { missing_keys: Vec<String> },

    /// A parameter the auth type does not know about (usually a typo).
    #[error("{auth_type}: unsupported parameter '{key}'")]
    UnsupportedParameter { auth_type: AuthType, key: String },

    /// A parameter is present but has the wrong type or an unknown choice.
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Every constraint violation found in one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates `params` against the rules of `auth_type`.
///
/// Pure: performs no I/O and collects every violation instead of stopping at
/// the first one. Optional groups are never enforced, but their members are
/// accepted; any other key outside the auth type's rules and the generic
/// options is reported as unsupported.
pub fn validate(params: &ParameterSet, auth_type: AuthType) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    let mut missing = missing_common(params);

    let mut one_of = Vec::new();
    for rule in rules::requirement_rules(auth_type) {
        match rule.kind {
            RuleKind::AllRequired => missing.extend(
                rule.keys
                    .iter()
                    .filter(|key| !params.is_present(key))
                    .map(ToString::to_string),
            ),
            RuleKind::OneOf => {
                if !rule.keys.iter().any(|key| params.is_present(key)) {
                    one_of.push(ValidationError::MissingOneOf {
                        auth_type,
                        candidates: rule.keys.iter().map(ToString::to_string).collect(),
                    });
                }
            }
        }
    }

    if !missing.is_empty() {
        errors.push(ValidationError::MissingRequired {
            auth_type,
            missing_keys: missing,
        });
    }
    errors.extend(one_of);
    errors.extend(check_value_types(params));
    errors.extend(check_unsupported(params, auth_type));

    ValidationErrors { errors }.into_result()
}

/// Resolves the auth type from `params` and validates against it.
///
/// With an unknown `auth_type` no rule lookup happens; the checks that do
/// not depend on the auth type are still reported after it.
pub fn validate_params(params: &ParameterSet) -> Result<AuthType, ValidationErrors> {
    match params.auth_type() {
        Ok(auth_type) => validate(params, auth_type).map(|()| auth_type),
        Err(unknown) => {
            let mut errors = vec![unknown];
            let missing_keys = missing_common(params);
            if !missing_keys.is_empty() {
                errors.push(ValidationError::MissingCommon { missing_keys });
            }
            errors.extend(check_value_types(params));
            Err(ValidationErrors { errors })
        }
    }
}

fn missing_common(params: &ParameterSet) -> Vec<String> {
    if params.is_present(REGION_NAME) {
        Vec::new()
    } else {
        vec![REGION_NAME.to_string()]
    }
}

/// Supplied keys `auth_type` does not accept. Unset (null) keys are ignored.
fn check_unsupported(params: &ParameterSet, auth_type: AuthType) -> Vec<ValidationError> {
    params
        .keys()
        .filter(|key| params.get(key).is_some_and(|v| *v != ParamValue::Absent))
        .filter(|key| !rules::accepts(auth_type, key))
        .map(|key| ValidationError::UnsupportedParameter {
            auth_type,
            key: key.to_string(),
        })
        .collect()
}

/// Type and choice checks for the auth-type independent options.
fn check_value_types(params: &ParameterSet) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(value) = params.present("interface") {
        if let Err(e) = value.to_string().parse::<Interface>() {
            errors.push(e);
        }
    }
    if let Err(e) = params.get_bool("validate_certs") {
        errors.push(e);
    }
    match params.get_int("api_timeout") {
        Ok(Some(secs)) if secs < 0 => errors.push(ValidationError::InvalidValue {
            key: "api_timeout".to_string(),
            reason: format!("{secs} is negative"),
        }),
        Ok(_) => {}
        Err(e) => errors.push(e),
    }
    if let Some(value) = params.present("access_token_type") {
        let value = value.to_string();
        if !rules::ACCESS_TOKEN_TYPES.contains(&value.as_str()) {
            errors.push(ValidationError::InvalidValue {
                key: "access_token_type".to_string(),
                reason: format!(
                    "'{value}' is not one of {}",
                    rules::ACCESS_TOKEN_TYPES.join(", ")
                ),
            });
        }
    }

    errors
}
