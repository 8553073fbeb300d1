use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;

/// Process-local account store keyed by lowercase username.
///
/// Used when no database is configured and by the API tests. Contents are lost
/// on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<String, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError> {
        Ok(self.accounts.read().await.get(username.as_str()).cloned())
    }

    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        // Check and insert under one write lock so racing registrations cannot both win.
        let mut accounts = self.accounts.write().await;

        match accounts.entry(account.username.as_str().to_string()) {
            Entry::Occupied(_) => Err(AccountError::UsernameTaken(
                account.username.as_str().to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
                Ok(account)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::account::models::AccountId;

    fn account(username: &str) -> Account {
        Account {
            id: AccountId::new(),
            username: Username::new(username).unwrap(),
            password_hash: vec![1; 64],
            password_salt: vec![2; 128],
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let repository = InMemoryAccountRepository::new();
        let created = repository.insert(account("alice")).await.unwrap();

        let found = repository
            .find_by_username(&Username::new("ALICE").unwrap())
            .await
            .unwrap()
            .expect("account should exist");

        assert_eq!(found.id, created.id);
        assert_eq!(found.password_salt, vec![2; 128]);
    }

    #[tokio::test]
    async fn test_find_missing() {
        let repository = InMemoryAccountRepository::new();
        let found = repository
            .find_by_username(&Username::new("nouser").unwrap())
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_is_conflict() {
        let repository = InMemoryAccountRepository::new();
        repository.insert(account("Alice")).await.unwrap();

        let result = repository.insert(account("alice")).await;
        assert!(matches!(result, Err(AccountError::UsernameTaken(name)) if name == "alice"));
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_single_winner() {
        let repository = InMemoryAccountRepository::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repository = repository.clone();
                tokio::spawn(async move { repository.insert(account("carol")).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(repository.len().await, 1);
    }
}
