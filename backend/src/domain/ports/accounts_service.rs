//! Driving port for account management by an authenticated caller.

use async_trait::async_trait;

use crate::domain::{AccountId, AccountUpdate, AccountView, DeletedAccount, Error, Identity};

/// Domain use-case port for listing, reading, updating and deleting accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Every account, ordered by id.
    async fn list(&self, actor: &Identity) -> Result<Vec<AccountView>, Error>;

    /// One account by id.
    async fn get(&self, actor: &Identity, id: AccountId) -> Result<AccountView, Error>;

    /// Apply a partial update permitted for `actor`.
    async fn update(
        &self,
        actor: &Identity,
        id: AccountId,
        update: AccountUpdate,
    ) -> Result<AccountView, Error>;

    /// Delete an account owned by `actor`, or any account for admins.
    async fn delete(&self, actor: &Identity, id: AccountId) -> Result<DeletedAccount, Error>;
}
