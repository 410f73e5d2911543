//! Authentication primitives: sign-up and sign-in payloads, token claims and
//! the caller identity derived from them.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::account::{Account, AccountId, AccountName, AccountView, EmailAddress, Password, Role};
use super::validation::FieldErrors;

/// Raw sign-up fields as received from a client.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignupFields<'a> {
    pub name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub role: Option<&'a str>,
}

/// Validated registration request.
///
/// ## Invariants
/// - `name` is trimmed and 2 to 255 characters long.
/// - `email` is normalised to trimmed lowercase.
/// - `role` defaults to [`Role::User`] when omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupDetails {
    name: AccountName,
    email: EmailAddress,
    password: Password,
    role: Role,
}

impl SignupDetails {
    /// Validate every field, reporting all failures together.
    ///
    /// # Examples
    /// ```
    /// use acquisitions::domain::{Role, SignupDetails, SignupFields};
    ///
    /// let details = SignupDetails::try_from_fields(SignupFields {
    ///     name: Some("Ann"),
    ///     email: Some("Ann@X.com"),
    ///     password: Some("secret1"),
    ///     role: None,
    /// })
    /// .expect("valid sign-up");
    /// assert_eq!(details.email().as_ref(), "ann@x.com");
    /// assert_eq!(details.role(), Role::User);
    /// ```
    pub fn try_from_fields(fields: SignupFields<'_>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let name = errors
            .require("name", fields.name)
            .and_then(|raw| errors.check("name", AccountName::new(raw)));
        let email = errors
            .require("email", fields.email)
            .and_then(|raw| errors.check("email", EmailAddress::new(raw)));
        let password = errors
            .require("password", fields.password)
            .and_then(|raw| errors.check("password", Password::new(raw)));
        let role = match fields.role {
            Some(raw) => errors.check("role", raw.parse::<Role>()),
            None => Some(Role::default()),
        };

        match (name, email, password, role) {
            (Some(name), Some(email), Some(password), Some(role)) if errors.is_empty() => {
                Ok(Self {
                    name,
                    email,
                    password,
                    role,
                })
            }
            _ => Err(errors),
        }
    }

    pub fn name(&self) -> &AccountName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `email` is normalised to trimmed lowercase and well formed.
/// - `password` is non-empty but retains caller-provided whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigninCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl SigninCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = errors
            .require("email", email)
            .and_then(|raw| errors.check("email", EmailAddress::normalise(raw)));
        let password = errors.require("password", password).and_then(|raw| {
            if raw.is_empty() {
                errors.push("password", "password is required");
                None
            } else {
                Some(Zeroizing::new(raw.to_owned()))
            }
        });

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => Ok(Self { email, password }),
            _ => Err(errors),
        }
    }

    /// Email address suitable for account lookups.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Signed token payload.
///
/// `iat` and `exp` are seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: AccountId,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Caller identity carried by these claims.
    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Authenticated caller. A snapshot taken when the token was issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: AccountId,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Whether `target` is the caller's own account.
    pub fn owns(&self, target: AccountId) -> bool {
        self.id == target
    }
}

impl From<&Account> for Identity {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.to_string(),
            role: account.role,
        }
    }
}

/// Token and public account returned by sign-up and sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub token: String,
    pub account: AccountView,
}
