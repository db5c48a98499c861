//! Small helpers shared by the `from_env` constructors.

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

/// Reads one variable. `from_env` constructors use [`process_env`]; tests
/// pass a fixed map instead of mutating the process environment.
pub(crate) type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub(crate) fn process_env(var: &str) -> Option<String> {
    env::var(var).ok()
}

/// Unset and whitespace-only values are both missing.
pub(crate) fn required_in(lookup: Lookup<'_>, var: &'static str) -> Result<String, ConfigError> {
    optional_in(lookup, var).ok_or(ConfigError::Missing(var))
}

pub(crate) fn optional(var: &'static str) -> Option<String> {
    optional_in(&process_env, var)
}

pub(crate) fn optional_in(lookup: Lookup<'_>, var: &'static str) -> Option<String> {
    lookup(var).filter(|value| !value.trim().is_empty())
}

pub(crate) fn parsed<T>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parsed_in(&process_env, var, default)
}

pub(crate) fn parsed_in<T>(lookup: Lookup<'_>, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_in(lookup, var) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

pub(crate) fn flag(var: &'static str, default: bool) -> Result<bool, ConfigError> {
    match optional(var) {
        Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError::Invalid {
            var,
            reason: format!("expected true/false, got {raw:?}"),
        }),
        None => Ok(default),
    }
}

pub(crate) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// A lookup over fixed `(name, value)` pairs.
#[cfg(test)]
pub(crate) fn fixed(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let vars: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |var| vars.get(var).cloned()
}
