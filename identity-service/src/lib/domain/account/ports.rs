use async_trait::async_trait;

use crate::account::errors::AuthError;
use crate::domain::account::models::AccessToken;
use crate::domain::account::models::Account;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::FederatedIdentity;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new unconfirmed account.
    ///
    /// Hashes the password, attaches a fresh confirmation code, and persists
    /// the record. No token is issued at this point.
    ///
    /// # Arguments
    /// * `credentials` - Validated email and plaintext password
    ///
    /// # Returns
    /// Unit on success
    ///
    /// # Errors
    /// * `EmailTaken` - Email is already registered
    /// * `StoreError` - Persistence operation failed
    async fn sign_up(&self, credentials: Credentials) -> Result<(), AuthError>;

    /// Authenticate with email and password.
    ///
    /// # Arguments
    /// * `credentials` - Validated email and plaintext password
    ///
    /// # Returns
    /// Signed access token for the account
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, indistinguishably
    /// * `UserNotConfirmed` - Password matched but the account is unconfirmed
    /// * `StoreError` - Persistence operation failed
    async fn sign_in(&self, credentials: Credentials) -> Result<AccessToken, AuthError>;

    /// Redeem a confirmation code for an account.
    ///
    /// Marks the account confirmed, invalidates the code, and signs the
    /// caller in.
    ///
    /// # Arguments
    /// * `email` - Email address the code was issued for
    /// * `token` - Confirmation code to redeem
    ///
    /// # Returns
    /// Signed access token for the freshly confirmed account
    ///
    /// # Errors
    /// * `InvalidConfirmationToken` - Unknown email, wrong code, or already redeemed
    /// * `StoreError` - Persistence operation failed
    async fn confirm_account(&self, email: &str, token: &str) -> Result<AccessToken, AuthError>;

    /// Authenticate through the federated identity provider.
    ///
    /// Exchanges the provider's authorization code for an attested identity
    /// and issues a token for it. No local account lookup takes place.
    ///
    /// # Arguments
    /// * `code` - Authorization code from the provider's redirect
    ///
    /// # Returns
    /// Signed access token for the attested identity
    ///
    /// # Errors
    /// * `FederatedAuthFailed` - Provider exchange failed or attested no email
    async fn sign_in_google(&self, code: &str) -> Result<AccessToken, AuthError>;
}

/// Persistence operations for account records.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// Uniqueness of the email and of the confirmation code is enforced
    /// here, atomically with the insert.
    ///
    /// # Arguments
    /// * `account` - Account record to create
    ///
    /// # Returns
    /// Unit on success
    ///
    /// # Errors
    /// * `EmailTaken` - An account with this email already exists
    /// * `StoreError` - Persistence operation failed or code collided
    async fn create(&self, account: Account) -> Result<(), AuthError>;

    /// Retrieve an account by email address.
    ///
    /// # Arguments
    /// * `email` - Email address string
    ///
    /// # Returns
    /// Optional account record (None if not found)
    ///
    /// # Errors
    /// * `StoreError` - Persistence operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AuthError>;

    /// Atomically redeem a confirmation code.
    ///
    /// Succeeds at most once per account: the matching record is marked
    /// confirmed and its code cleared in a single step, so a concurrent
    /// duplicate redemption loses.
    ///
    /// # Arguments
    /// * `email` - Email address the code was issued for
    /// * `code` - Confirmation code to redeem
    ///
    /// # Returns
    /// The updated account record
    ///
    /// # Errors
    /// * `InvalidConfirmationToken` - No unconfirmed account matches email and code
    /// * `StoreError` - Persistence operation failed
    async fn confirm(&self, email: &str, code: &str) -> Result<Account, AuthError>;
}

/// Federated identity verification against an external provider.
#[async_trait]
pub trait IdentityVerifier: Send + Sync + 'static {
    /// Exchange an authorization code for an attested identity.
    ///
    /// # Arguments
    /// * `code` - Authorization code from the provider's redirect
    ///
    /// # Returns
    /// Identity attested by the provider
    ///
    /// # Errors
    /// * `FederatedAuthFailed` - Exchange failed, timed out, or attested no email
    async fn validate(&self, code: &str) -> Result<FederatedIdentity, AuthError>;
}
