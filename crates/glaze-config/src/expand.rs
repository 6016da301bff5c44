//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in a configuration value.
///
/// `field` names the config key and only appears in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

/// Expand an optional value, leaving `None` untouched.
pub(crate) fn expand_opt(value: Option<&str>, field: &str) -> Result<Option<String>, ConfigError> {
    value.map(|v| expand_env(v, field)).transpose()
}
