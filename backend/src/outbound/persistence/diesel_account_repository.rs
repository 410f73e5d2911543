//! PostgreSQL-backed `AccountRepository` implementation using Diesel ORM.
//!
//! The unique index on `users.email` backs the duplicate-email check, so a
//! racing sign-up surfaces as [`AccountRepositoryError::DuplicateEmail`].

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{
    Account, AccountChanges, AccountId, AccountName, DeletedAccount, EmailAddress, NewAccount,
    PasswordHash, Role,
};

use super::models::{DeletedUserRow, NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `AccountRepository` port.
///
/// `updated_at` is stamped from the injected clock; `created_at` comes from
/// the column default.
#[derive(Clone)]
pub struct DieselAccountRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselAccountRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> AccountRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AccountRepositoryError::connection(message)
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> AccountRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            AccountRepositoryError::duplicate_email()
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AccountRepositoryError::connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => AccountRepositoryError::query("database query error"),
        _ => AccountRepositoryError::query("database error"),
    }
}

fn row_to_account(row: UserRow) -> Result<Account, AccountRepositoryError> {
    let corrupt = |field: &str| {
        AccountRepositoryError::query(format!("stored user {} has an invalid {field}", row.id))
    };
    Ok(Account {
        id: AccountId::new(row.id).map_err(|_| corrupt("id"))?,
        name: AccountName::new(&row.name).map_err(|_| corrupt("name"))?,
        email: EmailAddress::new(&row.email).map_err(|_| corrupt("email"))?,
        password_hash: PasswordHash::new(row.password),
        role: row.role.parse::<Role>().map_err(|_| corrupt("role"))?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn row_to_deleted(row: DeletedUserRow) -> DeletedAccount {
    DeletedAccount {
        id: row.id,
        name: row.name,
        email: row.email,
    }
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewUserRow {
            name: account.name.as_ref(),
            email: account.email.as_ref(),
            password: account.password_hash.as_str(),
            role: account.role.as_str(),
        };

        let stored = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_account(stored)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_account)
            .transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_account)
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        users::table
            .order(users::id.asc())
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?
            .into_iter()
            .map(row_to_account)
            .collect()
    }

    async fn update(
        &self,
        id: AccountId,
        changes: &AccountChanges,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = UserChangeset {
            name: changes.name.as_ref().map(AsRef::<str>::as_ref),
            email: changes.email.as_ref().map(AsRef::<str>::as_ref),
            password: changes.password_hash.as_ref().map(PasswordHash::as_str),
            role: changes.role.map(Role::as_str),
            updated_at: self.clock.utc(),
        };

        diesel::update(users::table.find(id.get()))
            .set(&changeset)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_account)
            .transpose()
    }

    async fn delete(&self, id: AccountId) -> Result<Option<DeletedAccount>, AccountRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(users::table.find(id.get()))
            .returning(DeletedUserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(deleted.map(row_to_deleted))
    }
}
