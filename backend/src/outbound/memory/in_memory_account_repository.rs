//! Process-local `AccountRepository` used when no database is configured.
//!
//! Same contract as the Diesel adapter: ids count up from 1, emails are
//! unique, and `list` returns accounts in id order. Contents are lost on
//! restart.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{AccountRepository, AccountRepositoryError};
use crate::domain::{
    Account, AccountChanges, AccountId, DeletedAccount, EmailAddress, NewAccount,
};

#[derive(Default)]
struct State {
    last_id: i32,
    accounts: BTreeMap<AccountId, Account>,
}

impl State {
    fn email_taken(&self, email: &EmailAddress, except: Option<AccountId>) -> bool {
        self.accounts
            .values()
            .any(|account| &account.email == email && Some(account.id) != except)
    }
}

/// In-memory implementation of the `AccountRepository` port.
pub struct InMemoryAccountRepository {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
}

impl InMemoryAccountRepository {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, AccountRepositoryError> {
        self.state
            .lock()
            .map_err(|_| AccountRepositoryError::query("account store lock poisoned"))
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn insert(&self, account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut state = self.lock()?;
        if state.email_taken(&account.email, None) {
            return Err(AccountRepositoryError::duplicate_email());
        }

        let next = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| AccountRepositoryError::query("account id space exhausted"))?;
        let id = AccountId::new(next).map_err(|err| AccountRepositoryError::query(err.to_string()))?;
        let now = self.clock.utc();
        let stored = Account {
            id,
            name: account.name.clone(),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            role: account.role,
            created_at: now,
            updated_at: now,
        };

        state.last_id = next;
        state.accounts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(self.lock()?.accounts.get(&id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        Ok(self
            .lock()?
            .accounts
            .values()
            .find(|account| &account.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Account>, AccountRepositoryError> {
        Ok(self.lock()?.accounts.values().cloned().collect())
    }

    async fn update(
        &self,
        id: AccountId,
        changes: &AccountChanges,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let mut state = self.lock()?;
        if !state.accounts.contains_key(&id) {
            return Ok(None);
        }
        let email_clash = changes
            .email
            .as_ref()
            .is_some_and(|email| state.email_taken(email, Some(id)));
        if email_clash {
            return Err(AccountRepositoryError::duplicate_email());
        }

        let now = self.clock.utc();
        let Some(account) = state.accounts.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.name {
            account.name = name.clone();
        }
        if let Some(email) = &changes.email {
            account.email = email.clone();
        }
        if let Some(hash) = &changes.password_hash {
            account.password_hash = hash.clone();
        }
        if let Some(role) = changes.role {
            account.role = role;
        }
        account.updated_at = now.max(account.created_at);
        Ok(Some(account.clone()))
    }

    async fn delete(&self, id: AccountId) -> Result<Option<DeletedAccount>, AccountRepositoryError> {
        Ok(self
            .lock()?
            .accounts
            .remove(&id)
            .map(|account| DeletedAccount::from(&account)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccountName, PasswordHash, Role};
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    #[fixture]
    fn repository() -> InMemoryAccountRepository {
        let utc_now = Utc
            .with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        InMemoryAccountRepository::new(Arc::new(FixtureClock { utc_now }))
    }

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: AccountName::new("Ann Lee").expect("valid name"),
            email: EmailAddress::new(email).expect("valid email"),
            password_hash: PasswordHash::new("hash"),
            role: Role::User,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_sequential_ids(repository: InMemoryAccountRepository) {
        let first = repository.insert(&new_account("a@x.com")).await.expect("insert");
        let second = repository.insert(&new_account("b@x.com")).await.expect("insert");

        assert_eq!(first.id.get(), 1);
        assert_eq!(second.id.get(), 2);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_duplicate_email(repository: InMemoryAccountRepository) {
        repository.insert(&new_account("a@x.com")).await.expect("insert");
        let err = repository
            .insert(&new_account("a@x.com"))
            .await
            .expect_err("duplicate email");

        assert_eq!(err, AccountRepositoryError::duplicate_email());
    }

    #[rstest]
    #[tokio::test]
    async fn update_rejects_email_owned_by_another_account(repository: InMemoryAccountRepository) {
        repository.insert(&new_account("a@x.com")).await.expect("insert");
        let second = repository.insert(&new_account("b@x.com")).await.expect("insert");

        let changes = AccountChanges {
            email: Some(EmailAddress::new("a@x.com").expect("valid email")),
            ..AccountChanges::default()
        };
        let err = repository
            .update(second.id, &changes)
            .await
            .expect_err("email taken");

        assert_eq!(err, AccountRepositoryError::duplicate_email());
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_account_is_none_even_with_taken_email(
        repository: InMemoryAccountRepository,
    ) {
        let stored = repository.insert(&new_account("a@x.com")).await.expect("insert");
        let missing = AccountId::new(stored.id.get() + 1).expect("positive id");
        let changes = AccountChanges {
            email: Some(EmailAddress::new("a@x.com").expect("valid email")),
            ..AccountChanges::default()
        };

        let result = repository.update(missing, &changes).await.expect("update");

        assert!(result.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn update_applies_present_fields_only(repository: InMemoryAccountRepository) {
        let stored = repository.insert(&new_account("a@x.com")).await.expect("insert");
        let changes = AccountChanges {
            role: Some(Role::Admin),
            ..AccountChanges::default()
        };

        let updated = repository
            .update(stored.id, &changes)
            .await
            .expect("update")
            .expect("account exists");

        assert_eq!(updated.role, Role::Admin);
        assert_eq!(updated.email, stored.email);
        assert_eq!(updated.name, stored.name);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_returns_projection_once(repository: InMemoryAccountRepository) {
        let stored = repository.insert(&new_account("a@x.com")).await.expect("insert");

        let deleted = repository.delete(stored.id).await.expect("delete");
        let again = repository.delete(stored.id).await.expect("delete");

        assert_eq!(deleted.map(|d| d.email), Some("a@x.com".to_owned()));
        assert!(again.is_none());
        assert!(repository.list().await.expect("list").is_empty());
    }
}
