//! Port abstraction for account persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Account, AccountChanges, AccountId, DeletedAccount, EmailAddress, NewAccount};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by account repository adapters.
    pub enum AccountRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "account repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account repository query failed: {message}",
        /// Another account already uses the email address.
        DuplicateEmail => "an account with this email already exists",
    }
}

/// Account store. Emails are compared in their normalised form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Insert a new account, assigning id and timestamps.
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError>;

    /// Fetch an account by normalised email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// All accounts ordered by id.
    async fn list(&self) -> Result<Vec<Account>, AccountRepositoryError>;

    /// Apply `changes` and refresh `updated_at`. `None` when absent.
    async fn update(
        &self,
        id: AccountId,
        changes: &AccountChanges,
    ) -> Result<Option<Account>, AccountRepositoryError>;

    /// Remove an account. `None` when absent.
    async fn delete(&self, id: AccountId) -> Result<Option<DeletedAccount>, AccountRepositoryError>;
}
