use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::account::errors::AuthError;
use crate::domain::account::models::Account;
use crate::domain::account::ports::UserStore;

/// In-memory user store keyed by email.
///
/// Backs local development and the API test suite. A single write lock
/// around each mutation gives the same per-email atomicity the database
/// adapter gets from its constraints: concurrent duplicate sign-ups lose
/// to `EmailTaken` and a confirmation code redeems at most once.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create(&self, account: Account) -> Result<(), AuthError> {
        let mut accounts = self.accounts.write().await;

        let email = account.email.as_str().to_string();
        if accounts.contains_key(&email) {
            return Err(AuthError::EmailTaken(email));
        }

        // Codes are globally unique, not just unique per account
        if let Some(code) = account.confirmation_code.as_deref() {
            if accounts
                .values()
                .any(|existing| existing.confirmation_code.as_deref() == Some(code))
            {
                return Err(AuthError::StoreError(format!(
                    "confirmation code collision for {}",
                    email
                )));
            }
        }

        accounts.insert(email, account);
        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError> {
        let accounts = self.accounts.read().await;

        Ok(accounts.get(email).cloned())
    }

    async fn confirm(&self, email: &str, code: &str) -> Result<Account, AuthError> {
        let mut accounts = self.accounts.write().await;

        let account = accounts
            .get_mut(email)
            .ok_or(AuthError::InvalidConfirmationToken)?;

        // A redeemed account holds no code, so the same check also rejects
        // a second redemption
        if account.confirmation_code.as_deref() != Some(code) {
            return Err(AuthError::InvalidConfirmationToken);
        }

        account.confirmed = true;
        account.confirmation_code = None;

        Ok(account.clone())
    }
}
