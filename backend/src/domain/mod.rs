//! Domain types, policies and services.
//!
//! Transport agnostic: inbound adapters translate payloads into the
//! validated types here, and outbound adapters implement [`ports`].

pub mod account;
pub mod account_service;
pub mod account_update;
pub mod auth;
pub mod error;
pub mod policy;
pub mod ports;
pub mod trace_id;
pub mod validation;

pub use self::account::{
    Account, AccountChanges, AccountId, AccountName, AccountValidationError, AccountView,
    DeletedAccount, EmailAddress, NewAccount, Password, PasswordHash, Role,
};
pub use self::account_service::AccountService;
pub use self::account_update::{AccountUpdate, UpdateFields};
pub use self::auth::{
    Claims, Identity, IssuedSession, SigninCredentials, SignupDetails, SignupFields,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::trace_id::TraceId;
pub use self::validation::{FieldError, FieldErrors};

