use async_trait::async_trait;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountToken;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::Username;
use crate::account::errors::AccountError;

/// Port for account domain service operations.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Register a new account and issue its first token.
    ///
    /// # Arguments
    /// * `command` - Validated username and plaintext password
    ///
    /// # Returns
    /// Stored username and a signed bearer token
    ///
    /// # Errors
    /// * `UsernameTaken` - Username exists, compared case-insensitively
    /// * `DatabaseError` - Repository operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AccountToken, AccountError>;

    /// Verify credentials and issue a token.
    ///
    /// # Arguments
    /// * `command` - Username and plaintext password
    ///
    /// # Returns
    /// Stored username and a signed bearer token
    ///
    /// # Errors
    /// * `UnknownUsername` - No account with this username
    /// * `InvalidPassword` - Password does not match
    /// * `Password` - Stored credential is malformed
    /// * `DatabaseError` - Repository operation failed
    async fn login(&self, command: LoginCommand) -> Result<AccountToken, AccountError>;
}

/// Persistence operations for account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Retrieve account by (lowercase) username.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError>;

    /// Persist a new account.
    ///
    /// # Returns
    /// Created account entity
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already stored
    /// * `DatabaseError` - Database operation failed
    async fn insert(&self, account: Account) -> Result<Account, AccountError>;
}
