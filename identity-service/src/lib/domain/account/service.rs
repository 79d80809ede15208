use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use auth::Claims;
use auth::CodeGenerator;
use auth::JwtHandler;
use auth::PasswordHasher;

use crate::account::errors::AuthError;
use crate::domain::account::models::AccessToken;
use crate::domain::account::models::Account;
use crate::domain::account::models::Credentials;
use crate::domain::account::ports::AuthServicePort;
use crate::domain::account::ports::IdentityVerifier;
use crate::domain::account::ports::UserStore;

/// Domain service implementation for the authentication flows.
///
/// Concrete implementation of AuthServicePort with dependency injection.
/// Holds no mutable state of its own; everything durable lives behind the
/// user store port. An access token leaves this service only after a
/// password match on a confirmed account, a successful confirmation-code
/// redemption, or a provider-attested federated identity.
pub struct AuthService<S, V>
where
    S: UserStore,
    V: IdentityVerifier,
{
    store: Arc<S>,
    verifier: Arc<V>,
    jwt_handler: Arc<JwtHandler>,
    password_hasher: PasswordHasher,
    code_generator: CodeGenerator,
    token_ttl: Duration,
}

impl<S, V> AuthService<S, V>
where
    S: UserStore,
    V: IdentityVerifier,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Account persistence implementation
    /// * `verifier` - Federated identity verification implementation
    /// * `jwt_handler` - Token signer configured with the service secret
    /// * `token_ttl` - Lifetime stamped into every issued token
    ///
    /// # Returns
    /// Configured authentication service instance
    pub fn new(
        store: Arc<S>,
        verifier: Arc<V>,
        jwt_handler: Arc<JwtHandler>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            store,
            verifier,
            jwt_handler,
            password_hasher: PasswordHasher::new(),
            code_generator: CodeGenerator::new(),
            token_ttl,
        }
    }

    fn issue_token(&self, email: &str) -> Result<AccessToken, AuthError> {
        let claims = Claims::for_email(email, self.token_ttl);
        let access_token = self.jwt_handler.encode(&claims)?;

        Ok(AccessToken { access_token })
    }
}

#[async_trait]
impl<S, V> AuthServicePort for AuthService<S, V>
where
    S: UserStore,
    V: IdentityVerifier,
{
    async fn sign_up(&self, credentials: Credentials) -> Result<(), AuthError> {
        let password_hash = self.password_hasher.hash(&credentials.password)?;

        let account = Account {
            email: credentials.email,
            password_hash,
            confirmation_code: Some(self.code_generator.generate()),
            confirmed: false,
        };

        self.store.create(account).await
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<AccessToken, AuthError> {
        let account = self
            .store
            .find_by_email(credentials.email.as_str())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        // A wrong password must surface before the confirmation state is
        // consulted, and identically to an unknown email.
        if !self
            .password_hasher
            .verify(&credentials.password, &account.password_hash)
        {
            return Err(AuthError::InvalidCredentials);
        }

        if !account.confirmed {
            return Err(AuthError::UserNotConfirmed);
        }

        self.issue_token(account.email.as_str())
    }

    async fn confirm_account(&self, email: &str, token: &str) -> Result<AccessToken, AuthError> {
        let account = self.store.confirm(email, token).await?;

        self.issue_token(account.email.as_str())
    }

    async fn sign_in_google(&self, code: &str) -> Result<AccessToken, AuthError> {
        let identity = self.verifier.validate(code).await?;

        self.issue_token(identity.email.as_str())
    }
}
