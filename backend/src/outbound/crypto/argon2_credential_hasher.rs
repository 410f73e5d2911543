//! Argon2id implementation of the `CredentialHasher` port.
//!
//! Hashing is CPU bound, so each call runs on the blocking pool with the
//! caller's trace id carried across.

use std::sync::Arc;

use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash as PhcString, PasswordHasher, PasswordVerifier,
    Salt, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialError, CredentialHasher};
use crate::domain::{Password, PasswordHash, TraceId};

/// Argon2id hasher producing PHC strings with a random 16-byte salt.
#[derive(Clone)]
pub struct Argon2CredentialHasher {
    argon2: Arc<Argon2<'static>>,
}

impl Argon2CredentialHasher {
    /// Hasher with the library's recommended Argon2id parameters.
    pub fn new() -> Self {
        Self::with_params(Params::default())
    }

    /// Hasher with caller-specified parameters, e.g. cheap ones for tests.
    pub fn with_params(params: Params) -> Self {
        Self {
            argon2: Arc::new(Argon2::new(Algorithm::Argon2id, Version::default(), params)),
        }
    }

    fn hash_blocking(argon2: &Argon2<'_>, material: &[u8]) -> Result<String, CredentialError> {
        let mut salt_bytes = [0u8; Salt::RECOMMENDED_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|err| CredentialError::hashing(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|err| CredentialError::hashing(err.to_string()))?;
        argon2
            .hash_password(material, &salt)
            .map(|hash| hash.to_string())
            .map_err(|err| CredentialError::hashing(err.to_string()))
    }

    fn verify_blocking(
        argon2: &Argon2<'_>,
        material: &[u8],
        encoded: &str,
    ) -> Result<bool, CredentialError> {
        let parsed =
            PhcString::new(encoded).map_err(|err| CredentialError::comparison(err.to_string()))?;
        match argon2.verify_password(material, &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(err) => Err(CredentialError::comparison(err.to_string())),
        }
    }

    async fn run_blocking<T, F>(task: F) -> Result<T, CredentialError>
    where
        T: Send + 'static,
        F: FnOnce() -> Result<T, CredentialError> + Send + 'static,
    {
        let trace_id = TraceId::current();
        let handle = tokio::task::spawn_blocking(move || match trace_id {
            Some(id) => id.run_sync(task),
            None => task(),
        });
        handle
            .await
            .map_err(|err| CredentialError::hashing(format!("hashing task failed: {err}")))?
    }
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, CredentialError> {
        let argon2 = Arc::clone(&self.argon2);
        let material = Zeroizing::new(password.expose().as_bytes().to_vec());
        let encoded =
            Self::run_blocking(move || Self::hash_blocking(&argon2, &material)).await?;
        Ok(PasswordHash::new(encoded))
    }

    async fn verify(&self, plaintext: &str, hash: &PasswordHash) -> Result<bool, CredentialError> {
        let argon2 = Arc::clone(&self.argon2);
        let material = Zeroizing::new(plaintext.as_bytes().to_vec());
        let encoded = hash.as_str().to_owned();
        Self::run_blocking(move || Self::verify_blocking(&argon2, &material, &encoded)).await
    }
}
