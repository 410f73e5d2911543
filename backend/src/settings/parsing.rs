//! Environment parsing helpers for application settings.

use std::fmt::Display;
use std::str::FromStr;

use mockable::Env;
use tracing::warn;

use super::{AppEnvironment, SettingsError};

const NUMBER_EXPECTED: &str = "a positive integer";

/// A numeric variable with a default used when it is unset.
pub(super) struct NumberEnv<T> {
    name: &'static str,
    default_value: T,
}

impl<T> NumberEnv<T> {
    pub(super) const fn positive(name: &'static str, default_value: T) -> Self {
        Self {
            name,
            default_value,
        }
    }
}

/// Parse a positive number, falling back to the default outside production.
pub(super) fn parse_env<E, T>(
    env: &E,
    environment: AppEnvironment,
    config: NumberEnv<T>,
) -> Result<T, SettingsError>
where
    E: Env,
    T: FromStr + PartialOrd + Default + Display + Copy,
{
    let Some(value) = env.string(config.name) else {
        return Ok(config.default_value);
    };
    match value.trim().parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => lenient_or_error(
            environment,
            config.default_value,
            SettingsError::InvalidEnv {
                name: config.name,
                value: value.clone(),
                expected: NUMBER_EXPECTED,
            },
            || {
                warn!(
                    value = %value,
                    "invalid {}; defaulting to {}",
                    config.name,
                    config.default_value
                );
            },
        ),
    }
}

/// Return `error` in production; otherwise run `warn_fn` and use `fallback`.
pub(super) fn lenient_or_error<T, F>(
    environment: AppEnvironment,
    fallback: T,
    error: SettingsError,
    warn_fn: F,
) -> Result<T, SettingsError>
where
    F: FnOnce(),
{
    if environment.is_production() {
        Err(error)
    } else {
        warn_fn();
        Ok(fallback)
    }
}

pub(super) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
