//! Account data model.
//!
//! Field newtypes validate on construction, so an [`Account`] assembled from
//! them always satisfies the stored-record invariants.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Validation errors returned by the account field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountValidationError {
    InvalidId,
    NameTooShort { min: usize },
    NameTooLong { max: usize },
    InvalidEmail,
    EmailTooLong { max: usize },
    PasswordTooShort { min: usize },
    PasswordTooLong { max: usize },
    UnknownRole,
}

impl fmt::Display for AccountValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "id must be a positive integer"),
            Self::NameTooShort { min } => write!(f, "name must be at least {min} characters"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
            Self::PasswordTooLong { max } => {
                write!(f, "password must be at most {max} characters")
            }
            Self::UnknownRole => write!(f, "role must be one of: user, admin"),
        }
    }
}

impl std::error::Error for AccountValidationError {}

/// Store-assigned account identifier. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct AccountId(i32);

impl AccountId {
    /// Validate a raw identifier.
    pub fn new(raw: i32) -> Result<Self, AccountValidationError> {
        if raw <= 0 {
            return Err(AccountValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Parse a path segment. Only ASCII digits are accepted.
    ///
    /// # Examples
    /// ```
    /// use acquisitions::domain::AccountId;
    ///
    /// assert_eq!(AccountId::parse("42").map(AccountId::get), Ok(42));
    /// assert!(AccountId::parse("abc").is_err());
    /// assert!(AccountId::parse("-1").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, AccountValidationError> {
        if raw.is_empty() || !raw.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(AccountValidationError::InvalidId);
        }
        let value = raw
            .parse::<i32>()
            .map_err(|_| AccountValidationError::InvalidId)?;
        Self::new(value)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i32> for AccountId {
    type Error = AccountValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountId> for i32 {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

/// Minimum length of an account name.
pub const NAME_MIN: usize = 2;
/// Maximum length of an account name.
pub const NAME_MAX: usize = 255;

/// Trimmed display name of an account holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountName(String);

impl AccountName {
    /// Trim and validate a name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if length < NAME_MIN {
            return Err(AccountValidationError::NameTooShort { min: NAME_MIN });
        }
        if length > NAME_MAX {
            return Err(AccountValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Maximum length of an email address.
pub const EMAIL_MAX: usize = 255;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address normalised to trimmed lowercase.
///
/// Normalisation happens before uniqueness checks, so `Ann@X.com ` and
/// `ann@x.com` name the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an address, enforcing the stored length limit.
    ///
    /// # Examples
    /// ```
    /// use acquisitions::domain::EmailAddress;
    ///
    /// let email = EmailAddress::new("  Ann@Example.COM ").expect("valid email");
    /// assert_eq!(email.as_ref(), "ann@example.com");
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let email = Self::normalise(raw)?;
        if email.0.chars().count() > EMAIL_MAX {
            return Err(AccountValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        Ok(email)
    }

    /// Normalise and check the format only. Used for sign-in lookups.
    pub fn normalise(raw: impl AsRef<str>) -> Result<Self, AccountValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if !email_regex().is_match(&normalised) {
            return Err(AccountValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Minimum length of a new password.
pub const PASSWORD_MIN: usize = 6;
/// Maximum length of a new password.
pub const PASSWORD_MAX: usize = 128;

/// Plaintext password accepted for hashing. Wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub fn new(raw: impl Into<String>) -> Result<Self, AccountValidationError> {
        let raw = Zeroizing::new(raw.into());
        let length = raw.chars().count();
        if length < PASSWORD_MIN {
            return Err(AccountValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        if length > PASSWORD_MAX {
            return Err(AccountValidationError::PasswordTooLong { max: PASSWORD_MAX });
        }
        Ok(Self(raw))
    }

    /// Borrow the plaintext for hashing.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Opaque salted password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Account role used for authorisation decisions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccountValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            _ => Err(AccountValidationError::UnknownRole),
        }
    }
}

/// Stored account record, including the password hash.
///
/// ## Invariants
/// - `email` is unique across accounts in its normalised form.
/// - `updated_at` is never earlier than `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub name: AccountName,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to insert an account; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: AccountName,
    pub email: EmailAddress,
    pub password_hash: PasswordHash,
    pub role: Role,
}

/// Partial update applied by the store. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountChanges {
    pub name: Option<AccountName>,
    pub email: Option<EmailAddress>,
    pub password_hash: Option<PasswordHash>,
    pub role: Option<Role>,
}

/// Public projection of an [`Account`]. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountView {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.get(),
            name: account.name.to_string(),
            email: account.email.to_string(),
            role: account.role,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Minimal projection returned after deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletedAccount {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<&Account> for DeletedAccount {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.get(),
            name: account.name.to_string(),
            email: account.email.to_string(),
        }
    }
}
