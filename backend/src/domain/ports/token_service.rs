//! Port for signing and verifying session tokens.

use crate::domain::{Claims, Identity};

use super::define_port_error;

define_port_error! {
    /// Failures raised by token adapters.
    pub enum TokenError {
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token is malformed, tampered with, or expired.
        Invalid { message: String } => "token rejected: {message}",
    }
}

/// Signed, expiring tokens carrying [`Claims`].
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token for `identity`, stamping issue and expiry times.
    fn sign(&self, identity: &Identity) -> Result<String, TokenError>;

    /// Verify signature and expiry, returning the embedded claims.
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}
