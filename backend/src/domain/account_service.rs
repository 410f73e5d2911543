//! Account domain services.
//!
//! [`AccountService`] implements both driving ports: [`AuthService`] for
//! registration, sign-in and token checks, and [`AccountsService`] for
//! managing accounts on behalf of an authenticated caller.

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, AccountsService, AuthService, CredentialError,
    CredentialHasher, TokenError, TokenService,
};
use crate::domain::policy::{authorize_delete, authorize_update};
use crate::domain::{
    Account, AccountChanges, AccountId, AccountUpdate, AccountView, Claims, DeletedAccount, Error,
    Identity, IssuedSession, NewAccount, Password, PasswordHash, SigninCredentials, SignupDetails,
};

const USER_NOT_FOUND: &str = "User not found";
/// Plaintext behind the decoy hash checked when a sign-in email is unknown.
const DECOY_PASSWORD: &str = "decoy-password-never-issued";

/// Account service implementing the authentication and management ports.
pub struct AccountService<R: ?Sized, H, T> {
    accounts: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    decoy_hash: Arc<OnceLock<PasswordHash>>,
}

impl<R: ?Sized, H, T> Clone for AccountService<R, H, T> {
    fn clone(&self) -> Self {
        Self {
            accounts: Arc::clone(&self.accounts),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
            decoy_hash: Arc::clone(&self.decoy_hash),
        }
    }
}

impl<R: ?Sized, H, T> AccountService<R, H, T> {
    /// Create a new service over the given adapters.
    pub fn new(accounts: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            accounts,
            hasher,
            tokens,
            decoy_hash: Arc::new(OnceLock::new()),
        }
    }
}

fn map_repository_error(error: AccountRepositoryError) -> Error {
    match error {
        AccountRepositoryError::Connection { message } => {
            error!(%message, "account repository unavailable");
            Error::service_unavailable("account store unavailable")
        }
        AccountRepositoryError::Query { message } => {
            error!(%message, "account repository query failed");
            Error::internal(format!("account repository error: {message}"))
        }
        AccountRepositoryError::DuplicateEmail => Error::conflict("user already exists"),
    }
}

fn map_credential_error(error: CredentialError) -> Error {
    error!(kind = error.kind(), %error, "credential operation failed");
    Error::internal(error.to_string())
}

fn invalid_credentials() -> Error {
    Error::unauthorized("Invalid email or password")
}

impl<R, H, T> AccountService<R, H, T>
where
    R: AccountRepository + ?Sized,
    H: CredentialHasher,
    T: TokenService,
{
    /// Spend one hash verification on an unknown email so response timing
    /// matches a wrong password. The decoy hash is built once with the
    /// configured hasher, so it carries the same cost parameters.
    async fn verify_against_decoy(&self, plaintext: &str) {
        let decoy = match self.decoy_hash.get() {
            Some(hash) => hash.clone(),
            None => {
                let Ok(password) = Password::new(DECOY_PASSWORD) else {
                    return;
                };
                match self.hasher.hash(&password).await {
                    Ok(hash) => self.decoy_hash.get_or_init(|| hash).clone(),
                    Err(err) => {
                        debug!(kind = err.kind(), "decoy hash unavailable");
                        return;
                    }
                }
            }
        };
        if let Err(err) = self.hasher.verify(plaintext, &decoy).await {
            debug!(kind = err.kind(), "decoy verification failed");
        }
    }

    fn issue_session(&self, account: &Account) -> Result<IssuedSession, Error> {
        let token = self
            .tokens
            .sign(&Identity::from(account))
            .map_err(|err| Error::internal(err.to_string()))?;
        Ok(IssuedSession {
            token,
            account: AccountView::from(account),
        })
    }
}

#[async_trait]
impl<R, H, T> AuthService for AccountService<R, H, T>
where
    R: AccountRepository + ?Sized,
    H: CredentialHasher,
    T: TokenService,
{
    async fn sign_up(&self, details: SignupDetails) -> Result<IssuedSession, Error> {
        let existing = self
            .accounts
            .find_by_email(details.email())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            warn!(email = %details.email(), "sign-up rejected: email already registered");
            return Err(Error::conflict("user already exists"));
        }

        let password_hash = self
            .hasher
            .hash(details.password())
            .await
            .map_err(map_credential_error)?;
        let account = self
            .accounts
            .insert(&NewAccount {
                name: details.name().clone(),
                email: details.email().clone(),
                password_hash,
                role: details.role(),
            })
            .await
            .map_err(map_repository_error)?;

        info!(account_id = %account.id, role = %account.role, "account registered");
        self.issue_session(&account)
    }

    async fn sign_in(&self, credentials: &SigninCredentials) -> Result<IssuedSession, Error> {
        let Some(account) = self
            .accounts
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?
        else {
            warn!(email = %credentials.email(), "sign-in rejected: unknown email");
            self.verify_against_decoy(credentials.password()).await;
            return Err(invalid_credentials());
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &account.password_hash)
            .await
            .map_err(map_credential_error)?;
        if !matches {
            warn!(account_id = %account.id, "sign-in rejected: wrong password");
            return Err(invalid_credentials());
        }

        info!(account_id = %account.id, "account signed in");
        self.issue_session(&account)
    }

    fn authenticate(&self, token: &str) -> Result<Claims, Error> {
        self.tokens.verify(token).map_err(|err| match err {
            TokenError::Invalid { message } => {
                debug!(%message, "session token rejected");
                Error::unauthorized("Authentication failed").with_summary("Invalid token")
            }
            TokenError::Signing { message } => Error::internal(message),
        })
    }
}

#[async_trait]
impl<R, H, T> AccountsService for AccountService<R, H, T>
where
    R: AccountRepository + ?Sized,
    H: CredentialHasher,
    T: TokenService,
{
    async fn list(&self, actor: &Identity) -> Result<Vec<AccountView>, Error> {
        let accounts = self.accounts.list().await.map_err(map_repository_error)?;
        debug!(account_id = %actor.id, count = accounts.len(), "listed accounts");
        Ok(accounts.iter().map(AccountView::from).collect())
    }

    async fn get(&self, _actor: &Identity, id: AccountId) -> Result<AccountView, Error> {
        self.accounts
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .map(|account| AccountView::from(&account))
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }

    async fn update(
        &self,
        actor: &Identity,
        id: AccountId,
        update: AccountUpdate,
    ) -> Result<AccountView, Error> {
        let AccountUpdate {
            name,
            email,
            password,
            role,
        } = authorize_update(actor, id, update)?;

        let password_hash = match password {
            Some(password) => Some(
                self.hasher
                    .hash(&password)
                    .await
                    .map_err(map_credential_error)?,
            ),
            None => None,
        };
        let changes = AccountChanges {
            name,
            email,
            password_hash,
            role,
        };

        let account = self
            .accounts
            .update(id, &changes)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;

        info!(account_id = %account.id, actor = %actor.id, "account updated");
        Ok(AccountView::from(&account))
    }

    async fn delete(&self, actor: &Identity, id: AccountId) -> Result<DeletedAccount, Error> {
        authorize_delete(actor, id)?;
        let deleted = self
            .accounts
            .delete(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;

        info!(account_id = deleted.id, actor = %actor.id, "account deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
