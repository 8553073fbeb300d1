use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountToken;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::RegisterCommand;

/// Domain service implementation for account operations.
///
/// Concrete implementation of AccountServicePort with dependency injection.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator>,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Credential hashing and token signing
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AccountToken, AccountError> {
        // Reject duplicates before spending entropy on a salt.
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            tracing::info!(username = %command.username, "Registration rejected: username taken");
            return Err(AccountError::UsernameTaken(command.username.to_string()));
        }

        let salted = self.authenticator.hash_password(&command.password)?;

        let account = Account {
            id: AccountId::new(),
            username: command.username,
            password_hash: salted.hash,
            password_salt: salted.salt,
            created_at: Utc::now(),
        };

        let created = self.repository.insert(account).await?;
        let token = self.authenticator.generate_token(&created.identity())?;

        tracing::info!(
            account_id = %created.id,
            username = %created.username,
            "Account registered"
        );

        Ok(AccountToken {
            username: created.username,
            token,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<AccountToken, AccountError> {
        let account = match self.repository.find_by_username(&command.username).await? {
            Some(account) => account,
            None => {
                tracing::warn!(username = %command.username, "Login rejected: unknown username");
                return Err(AccountError::UnknownUsername(command.username.to_string()));
            }
        };

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                &account.password_hash,
                &account.password_salt,
                &account.identity(),
            )
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => {
                    tracing::warn!(username = %account.username, "Login rejected: invalid password");
                    AccountError::InvalidPassword
                }
                AuthenticationError::PasswordError(err) => {
                    tracing::error!(
                        account_id = %account.id,
                        error = %err,
                        "Stored credential is malformed"
                    );
                    AccountError::Password(err)
                }
                AuthenticationError::JwtError(err) => AccountError::Token(err),
            })?;

        tracing::info!(account_id = %account.id, username = %account.username, "Login succeeded");

        Ok(AccountToken {
            username: account.username,
            token: result.access_token,
        })
    }
}
