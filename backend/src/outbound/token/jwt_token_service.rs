//! HS256 JSON Web Token implementation of the `TokenService` port.

use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;

use crate::domain::ports::{TokenError, TokenService};
use crate::domain::{Claims, Identity};

/// Signs and verifies session tokens with a shared secret.
///
/// `iat` comes from the injected clock. Expiry is checked against the
/// system clock with no leeway.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn sign(&self, identity: &Identity) -> Result<String, TokenError> {
        let issued_at = self.clock.utc();
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::signing("token lifetime overflows the calendar"))?;
        let claims = Claims {
            id: identity.id,
            email: identity.email.clone(),
            role: identity.role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| TokenError::invalid(err.to_string()))
    }
}
