//! Unit tests for settings parsing.

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;

const SECRET: &str = "0123456789abcdef0123456789abcdef";

fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn production(extra: &[(&'static str, &'static str)]) -> MockEnv {
    let mut vars = vec![
        (APP_ENV, "production"),
        (JWT_SECRET_ENV, SECRET),
        (DATABASE_URL_ENV, "postgres://db/acquisitions"),
    ];
    vars.extend_from_slice(extra);
    mock_env(&vars)
}

fn expect_error(result: Result<AppSettings, SettingsError>, label: &str) -> SettingsError {
    match result {
        Ok(_) => panic!("{label}"),
        Err(error) => error,
    }
}

#[rstest]
fn development_defaults_apply_when_unset() {
    let settings = AppSettings::from_env(&mock_env(&[])).expect("development defaults");

    assert_eq!(settings.environment, AppEnvironment::Development);
    assert!(settings.jwt_secret.is_ephemeral());
    assert_eq!(settings.jwt_secret.as_bytes().len(), JWT_SECRET_MIN_LEN);
    assert_eq!(settings.token_ttl, Duration::from_secs(86_400));
    assert_eq!(settings.cookie_max_age, Duration::from_secs(900));
    assert!(!settings.cookie_secure);
    assert!(settings.database_url.is_none());
    assert_eq!(settings.database_max_connections, 10);
    assert_eq!(settings.bind_addr, SocketAddr::from(([0, 0, 0, 0], 3000)));
    assert!(settings.lifetimes_differ());
}

#[rstest]
fn ephemeral_secrets_differ_between_runs() {
    let first = AppSettings::from_env(&mock_env(&[])).expect("first");
    let second = AppSettings::from_env(&mock_env(&[])).expect("second");

    assert_ne!(first.jwt_secret.as_bytes(), second.jwt_secret.as_bytes());
}

#[rstest]
fn production_reads_explicit_values() {
    let env = production(&[
        (JWT_TTL_ENV, "900"),
        (COOKIE_MAX_AGE_ENV, "900"),
        (DATABASE_MAX_CONNECTIONS_ENV, "4"),
        (BIND_ADDR_ENV, "127.0.0.1:8080"),
    ]);

    let settings = AppSettings::from_env(&env).expect("valid production settings");

    assert_eq!(settings.environment, AppEnvironment::Production);
    assert!(!settings.jwt_secret.is_ephemeral());
    assert_eq!(settings.jwt_secret.as_bytes(), SECRET.as_bytes());
    assert!(settings.cookie_secure);
    assert_eq!(
        settings.database_url.as_deref(),
        Some("postgres://db/acquisitions")
    );
    assert_eq!(settings.database_max_connections, 4);
    assert_eq!(settings.bind_addr, SocketAddr::from(([127, 0, 0, 1], 8080)));
    assert!(!settings.lifetimes_differ());
}

#[rstest]
#[case(JWT_SECRET_ENV)]
#[case(DATABASE_URL_ENV)]
fn production_requires_secret_and_database(#[case] missing: &'static str) {
    let vars: Vec<(&str, &str)> = [
        (APP_ENV, "production"),
        (JWT_SECRET_ENV, SECRET),
        (DATABASE_URL_ENV, "postgres://db/acquisitions"),
    ]
    .into_iter()
    .filter(|(key, _)| *key != missing)
    .collect();

    let error = expect_error(
        AppSettings::from_env(&mock_env(&vars)),
        "missing variable must fail",
    );

    assert!(matches!(error, SettingsError::MissingEnv { name } if name == missing));
}

#[rstest]
fn production_rejects_short_secret() {
    let env = mock_env(&[
        (APP_ENV, "production"),
        (JWT_SECRET_ENV, "short"),
        (DATABASE_URL_ENV, "postgres://db/acquisitions"),
    ]);

    let error = expect_error(AppSettings::from_env(&env), "short secret must fail");

    assert!(matches!(
        error,
        SettingsError::SecretTooShort {
            length: 5,
            min_len: JWT_SECRET_MIN_LEN
        }
    ));
}

#[rstest]
fn development_accepts_short_secret_with_warning() {
    let settings = AppSettings::from_env(&mock_env(&[(JWT_SECRET_ENV, "short")]))
        .expect("lenient in development");

    assert_eq!(settings.jwt_secret.as_bytes(), b"short");
    assert!(!settings.jwt_secret.is_ephemeral());
}

#[rstest]
#[case(JWT_TTL_ENV, "soon")]
#[case(JWT_TTL_ENV, "0")]
#[case(COOKIE_MAX_AGE_ENV, "-5")]
#[case(DATABASE_MAX_CONNECTIONS_ENV, "many")]
#[case(BIND_ADDR_ENV, "localhost")]
#[case(COOKIE_SECURE_ENV, "maybe")]
fn production_rejects_invalid_values(#[case] name: &'static str, #[case] value: &'static str) {
    let error = expect_error(
        AppSettings::from_env(&production(&[(name, value)])),
        "invalid value must fail",
    );

    assert!(matches!(error, SettingsError::InvalidEnv { name: reported, .. } if reported == name));
}

#[rstest]
#[case(JWT_TTL_ENV, "soon")]
#[case(COOKIE_MAX_AGE_ENV, "-5")]
#[case(DATABASE_MAX_CONNECTIONS_ENV, "many")]
#[case(BIND_ADDR_ENV, "localhost")]
#[case(COOKIE_SECURE_ENV, "maybe")]
fn development_falls_back_on_invalid_values(
    #[case] name: &'static str,
    #[case] value: &'static str,
) {
    let settings = AppSettings::from_env(&mock_env(&[(name, value)])).expect("lenient defaults");

    assert_eq!(settings.token_ttl, Duration::from_secs(86_400));
    assert_eq!(settings.cookie_max_age, Duration::from_secs(900));
    assert_eq!(settings.database_max_connections, 10);
    assert_eq!(settings.bind_addr, SocketAddr::from(([0, 0, 0, 0], 3000)));
    assert!(!settings.cookie_secure);
}

#[rstest]
#[case("1", true)]
#[case("yes", true)]
#[case("0", false)]
#[case("False", false)]
fn cookie_secure_override_is_honoured(#[case] value: &'static str, #[case] expected: bool) {
    let settings = AppSettings::from_env(&production(&[(COOKIE_SECURE_ENV, value)]))
        .expect("valid settings");

    assert_eq!(settings.cookie_secure, expected);
}

#[rstest]
#[case("production", AppEnvironment::Production)]
#[case("Development", AppEnvironment::Development)]
#[case("test", AppEnvironment::Test)]
fn app_env_parses_known_names(#[case] raw: &str, #[case] expected: AppEnvironment) {
    assert_eq!(raw.parse::<AppEnvironment>(), Ok(expected));
}

#[rstest]
fn unknown_app_env_is_rejected() {
    let error = expect_error(
        AppSettings::from_env(&mock_env(&[(APP_ENV, "staging")])),
        "unknown environment must fail",
    );

    assert!(matches!(error, SettingsError::InvalidEnv { name: APP_ENV, .. }));
}

#[rstest]
fn secret_debug_output_is_redacted() {
    let settings = AppSettings::from_env(&production(&[])).expect("valid settings");

    assert!(!format!("{:?}", settings.jwt_secret).contains(SECRET));
}
