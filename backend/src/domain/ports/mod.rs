//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`AccountRepository`, `CredentialHasher`, `TokenService`)
//! expose strongly typed errors so adapters map their failures into
//! predictable variants. Driving ports (`AuthService`, `AccountsService`)
//! return the domain [`Error`](crate::domain::Error) consumed by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod accounts_service;
mod auth_service;
mod credential_hasher;
mod token_service;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRepository, AccountRepositoryError};
#[cfg(test)]
pub use accounts_service::MockAccountsService;
pub use accounts_service::AccountsService;
#[cfg(test)]
pub use auth_service::MockAuthService;
pub use auth_service::AuthService;
#[cfg(test)]
pub use credential_hasher::MockCredentialHasher;
pub use credential_hasher::{CredentialError, CredentialHasher};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
