use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use humantime::parse_duration;

use crate::error::ConfigError;

/// Raw value of `key`; `None` when unset.
pub(super) fn env_string(key: &'static str) -> std::result::Result<Option<String>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(ConfigError::InvalidField {
            field: key,
            message: err.to_string(),
        }),
    }
}

/// Trimmed value of `key` run through `parse`; unset and blank are `None`.
fn env_with<T, E, F>(key: &'static str, parse: F) -> std::result::Result<Option<T>, ConfigError>
where
    E: Display,
    F: FnOnce(&str) -> std::result::Result<T, E>,
{
    let Some(value) = env_string(key)? else {
        return Ok(None);
    };
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    parse(value)
        .map(Some)
        .map_err(|err| ConfigError::InvalidField {
            field: key,
            message: err.to_string(),
        })
}

pub(super) fn env_parse<T>(key: &'static str) -> std::result::Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    env_with(key, str::parse::<T>)
}

pub(super) fn env_bool(key: &'static str) -> std::result::Result<Option<bool>, ConfigError> {
    env_parse::<bool>(key)
}

/// Humantime duration such as `30s` or `1m 30s`.
pub(super) fn env_duration(
    key: &'static str,
) -> std::result::Result<Option<Duration>, ConfigError> {
    env_with(key, parse_duration)
}

#[cfg(test)]
mod tests {
    use super::{env_duration, env_string};

    #[test]
    fn unset_variables_are_none() {
        assert_eq!(
            env_string("ZBX_TEST_SURELY_UNSET_VARIABLE").unwrap(),
            None
        );
        assert_eq!(
            env_duration("ZBX_TEST_SURELY_UNSET_DURATION").unwrap(),
            None
        );
    }
}
