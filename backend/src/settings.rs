//! Environment-driven application settings.
//!
//! Production requires explicit, valid values. Development and test runs
//! tolerate missing or malformed values, logging a warning and falling back
//! to a default.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use mockable::Env;
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;
use zeroize::Zeroizing;

mod parsing;

use parsing::{NumberEnv, lenient_or_error, parse_bool, parse_env};

const APP_ENV: &str = "APP_ENV";
const JWT_SECRET_ENV: &str = "JWT_SECRET";
const JWT_TTL_ENV: &str = "JWT_EXPIRES_IN_SECS";
const COOKIE_MAX_AGE_ENV: &str = "SESSION_COOKIE_MAX_AGE_SECS";
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const DATABASE_URL_ENV: &str = "DATABASE_URL";
const DATABASE_MAX_CONNECTIONS_ENV: &str = "DATABASE_MAX_CONNECTIONS";
const BIND_ADDR_ENV: &str = "BIND_ADDR";

const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const APP_ENV_EXPECTED: &str = "production|development|test";

/// Minimum secret length accepted in production.
pub const JWT_SECRET_MIN_LEN: usize = 32;
const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;
const DEFAULT_COOKIE_MAX_AGE_SECS: u64 = 900;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Deployment environment selected by `APP_ENV`.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AppEnvironment {
    Production,
    #[default]
    Development,
    Test,
}

impl AppEnvironment {
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for AppEnvironment {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            "test" => Ok(Self::Test),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Production => "production",
            Self::Development => "development",
            Self::Test => "test",
        })
    }
}

/// Token signing secret. Wiped from memory on drop.
#[derive(Clone)]
pub struct JwtSecret {
    bytes: Zeroizing<Vec<u8>>,
    ephemeral: bool,
}

impl JwtSecret {
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Whether the secret was generated for this process only.
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    fn generate() -> Result<Self, SettingsError> {
        let mut bytes = Zeroizing::new(vec![0_u8; JWT_SECRET_MIN_LEN]);
        OsRng
            .try_fill_bytes(bytes.as_mut_slice())
            .map_err(|error| SettingsError::SecretGeneration {
                message: error.to_string(),
            })?;
        Ok(Self {
            bytes,
            ephemeral: true,
        })
    }
}

impl fmt::Debug for JwtSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtSecret")
            .field("len", &self.bytes.len())
            .field("ephemeral", &self.ephemeral)
            .finish()
    }
}

/// Validated process settings.
#[derive(Clone, Debug)]
pub struct AppSettings {
    pub environment: AppEnvironment,
    pub jwt_secret: JwtSecret,
    pub token_ttl: Duration,
    pub cookie_max_age: Duration,
    pub cookie_secure: bool,
    /// `None` selects the in-memory account store.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
}

/// Errors raised while validating settings.
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The signing secret is shorter than production allows.
    #[error("JWT_SECRET too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort { length: usize, min_len: usize },
    /// The operating system random source failed.
    #[error("failed to generate an ephemeral JWT secret: {message}")]
    SecretGeneration { message: String },
}

impl AppSettings {
    /// Read settings from the environment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use acquisitions::settings::{AppEnvironment, AppSettings};
    /// use mockable::MockEnv;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "APP_ENV" => Some("production".to_owned()),
    ///     "JWT_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
    ///     "DATABASE_URL" => Some("postgres://localhost/acquisitions".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = AppSettings::from_env(&env).expect("valid settings");
    /// assert_eq!(settings.environment, AppEnvironment::Production);
    /// assert!(settings.cookie_secure);
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, SettingsError> {
        let environment = environment_from_env(env)?;
        let jwt_secret = jwt_secret_from_env(env, environment)?;
        let token_ttl = Duration::from_secs(parse_env(
            env,
            environment,
            NumberEnv::positive(JWT_TTL_ENV, DEFAULT_TOKEN_TTL_SECS),
        )?);
        let cookie_max_age = Duration::from_secs(parse_env(
            env,
            environment,
            NumberEnv::positive(COOKIE_MAX_AGE_ENV, DEFAULT_COOKIE_MAX_AGE_SECS),
        )?);
        let cookie_secure = cookie_secure_from_env(env, environment)?;
        let database_url = database_url_from_env(env, environment)?;
        let database_max_connections = parse_env(
            env,
            environment,
            NumberEnv::positive(DATABASE_MAX_CONNECTIONS_ENV, DEFAULT_MAX_CONNECTIONS),
        )?;
        let bind_addr = bind_addr_from_env(env, environment)?;

        let settings = Self {
            environment,
            jwt_secret,
            token_ttl,
            cookie_max_age,
            cookie_secure,
            database_url,
            database_max_connections,
            bind_addr,
        };
        settings.warn_on_lifetime_mismatch();
        Ok(settings)
    }

    /// Whether the token and its cookie expire at different times.
    pub fn lifetimes_differ(&self) -> bool {
        self.token_ttl != self.cookie_max_age
    }

    fn warn_on_lifetime_mismatch(&self) {
        if self.lifetimes_differ() {
            warn!(
                token_ttl_secs = self.token_ttl.as_secs(),
                cookie_max_age_secs = self.cookie_max_age.as_secs(),
                "session cookie and token lifetimes differ"
            );
        }
    }
}

fn environment_from_env<E: Env>(env: &E) -> Result<AppEnvironment, SettingsError> {
    match env.string(APP_ENV) {
        Some(value) => value
            .parse()
            .map_err(|()| SettingsError::InvalidEnv {
                name: APP_ENV,
                value,
                expected: APP_ENV_EXPECTED,
            }),
        None => Ok(AppEnvironment::default()),
    }
}

fn jwt_secret_from_env<E: Env>(
    env: &E,
    environment: AppEnvironment,
) -> Result<JwtSecret, SettingsError> {
    let Some(value) = env.string(JWT_SECRET_ENV).filter(|value| !value.is_empty()) else {
        if environment.is_production() {
            return Err(SettingsError::MissingEnv {
                name: JWT_SECRET_ENV,
            });
        }
        warn!("JWT_SECRET not set; using an ephemeral secret (sessions end on restart)");
        return JwtSecret::generate();
    };

    let bytes = Zeroizing::new(value.into_bytes());
    let length = bytes.len();
    if length < JWT_SECRET_MIN_LEN {
        lenient_or_error(
            environment,
            (),
            SettingsError::SecretTooShort {
                length,
                min_len: JWT_SECRET_MIN_LEN,
            },
            || warn!(length, "JWT_SECRET shorter than {JWT_SECRET_MIN_LEN} bytes"),
        )?;
    }
    Ok(JwtSecret {
        bytes,
        ephemeral: false,
    })
}

fn cookie_secure_from_env<E: Env>(
    env: &E,
    environment: AppEnvironment,
) -> Result<bool, SettingsError> {
    let default_secure = environment.is_production();
    let Some(value) = env.string(COOKIE_SECURE_ENV) else {
        return Ok(default_secure);
    };
    match parse_bool(&value) {
        Some(flag) => {
            if environment.is_production() && !flag {
                warn!("SESSION_COOKIE_SECURE disabled in production");
            }
            Ok(flag)
        }
        None => lenient_or_error(
            environment,
            default_secure,
            SettingsError::InvalidEnv {
                name: COOKIE_SECURE_ENV,
                value: value.clone(),
                expected: BOOL_EXPECTED,
            },
            || warn!(value = %value, "invalid SESSION_COOKIE_SECURE; using default"),
        ),
    }
}

fn database_url_from_env<E: Env>(
    env: &E,
    environment: AppEnvironment,
) -> Result<Option<String>, SettingsError> {
    match env.string(DATABASE_URL_ENV).filter(|value| !value.trim().is_empty()) {
        Some(url) => Ok(Some(url)),
        None => lenient_or_error(
            environment,
            None,
            SettingsError::MissingEnv {
                name: DATABASE_URL_ENV,
            },
            || warn!("DATABASE_URL not set; using the in-memory account store"),
        ),
    }
}

fn bind_addr_from_env<E: Env>(
    env: &E,
    environment: AppEnvironment,
) -> Result<SocketAddr, SettingsError> {
    let fallback = SocketAddr::from(([0, 0, 0, 0], 3000));
    let Some(value) = env.string(BIND_ADDR_ENV) else {
        return Ok(fallback);
    };
    match value.trim().parse::<SocketAddr>() {
        Ok(addr) => Ok(addr),
        Err(_) => lenient_or_error(
            environment,
            fallback,
            SettingsError::InvalidEnv {
                name: BIND_ADDR_ENV,
                value: value.clone(),
                expected: "host:port, e.g. 0.0.0.0:3000",
            },
            || warn!(value = %value, %fallback, "invalid BIND_ADDR; using default"),
        ),
    }
}

#[cfg(test)]
mod tests;
