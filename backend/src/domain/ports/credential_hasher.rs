//! Port for one-way password hashing.
use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Failures raised by credential hashing adapters.
    pub enum CredentialError {
        /// The hash could not be produced.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be compared.
        Comparison { message: String } => "password comparison failed: {message}",
    }
}

/// Salted password hashing. Implementations must be safe to call concurrently.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Produce a fresh salted hash of `password`.
    async fn hash(&self, password: &Password) -> Result<PasswordHash, CredentialError>;

    /// Whether `plaintext` matches `hash`. A mismatch is `Ok(false)`.
    async fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, CredentialError>;
}
