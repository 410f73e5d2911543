//! Driving port for registration, sign-in and token authentication.
//!
//! Inbound adapters call it to issue and check sessions without knowing the
//! backing store, hasher or token format.

use async_trait::async_trait;

use crate::domain::{Claims, Error, IssuedSession, SigninCredentials, SignupDetails};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account and issue a session token for it.
    async fn sign_up(&self, details: SignupDetails) -> Result<IssuedSession, Error>;

    /// Check credentials and issue a session token.
    async fn sign_in(&self, credentials: &SigninCredentials) -> Result<IssuedSession, Error>;

    /// Verify a session token and return its claims.
    fn authenticate(&self, token: &str) -> Result<Claims, Error>;
}
