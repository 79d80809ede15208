use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;

use crate::account::errors::AuthError;
use crate::config::GoogleConfig;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::FederatedIdentity;
use crate::domain::account::ports::IdentityVerifier;

/// Federated identity verifier backed by Google's OAuth 2.0 endpoints.
///
/// Exchanges an authorization code for an access token at the token
/// endpoint, then resolves the account email from the userinfo endpoint.
/// The email comes exclusively from the provider response; nothing the
/// caller supplied beyond the code is trusted. Transport failures,
/// non-success statuses, timeouts, and responses without an email all
/// collapse into `FederatedAuthFailed`.
pub struct GoogleIdentityVerifier {
    client: Client,
    config: GoogleConfig,
}

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    code: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    redirect_uri: &'a str,
    grant_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfoResponse {
    email: Option<String>,
}

impl GoogleIdentityVerifier {
    /// Create a verifier with a bounded-timeout HTTP client.
    ///
    /// # Arguments
    /// * `config` - Provider endpoints, client credentials, and timeout
    ///
    /// # Errors
    /// * `FederatedAuthFailed` - HTTP client construction failed
    pub fn new(config: GoogleConfig) -> Result<Self, AuthError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AuthError::FederatedAuthFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    async fn exchange_code(&self, code: &str) -> Result<String, AuthError> {
        let request = TokenRequest {
            code,
            client_id: &self.config.client_id,
            client_secret: &self.config.client_secret,
            redirect_uri: &self.config.redirect_uri,
            grant_type: "authorization_code",
        };

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&request)
            .send()
            .await
            .map_err(|e| AuthError::FederatedAuthFailed(format!("token exchange failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AuthError::FederatedAuthFailed(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            AuthError::FederatedAuthFailed(format!("invalid token response: {}", e))
        })?;

        Ok(token.access_token)
    }

    async fn fetch_email(&self, access_token: &str) -> Result<EmailAddress, AuthError> {
        let response = self
            .client
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::FederatedAuthFailed(format!("userinfo fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AuthError::FederatedAuthFailed(format!(
                "userinfo endpoint returned {}",
                response.status()
            )));
        }

        let info: UserInfoResponse = response.json().await.map_err(|e| {
            AuthError::FederatedAuthFailed(format!("invalid userinfo response: {}", e))
        })?;

        let email = info.email.ok_or_else(|| {
            AuthError::FederatedAuthFailed("provider attested no email".to_string())
        })?;

        EmailAddress::new(email)
            .map_err(|e| AuthError::FederatedAuthFailed(format!("provider email rejected: {}", e)))
    }
}

#[async_trait]
impl IdentityVerifier for GoogleIdentityVerifier {
    async fn validate(&self, code: &str) -> Result<FederatedIdentity, AuthError> {
        let access_token = self.exchange_code(code).await?;
        let email = self.fetch_email(&access_token).await?;

        Ok(FederatedIdentity { email })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_parsing() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token": "ya29.secret", "expires_in": 3599, "token_type": "Bearer"}"#,
        )
        .expect("Failed to parse token response");

        assert_eq!(response.access_token, "ya29.secret");
    }

    #[test]
    fn test_userinfo_parsing() {
        let response: UserInfoResponse = serde_json::from_str(
            r#"{"sub": "10769150350006150715113082367", "email": "alice@example.com", "email_verified": true}"#,
        )
        .expect("Failed to parse userinfo response");

        assert_eq!(response.email.as_deref(), Some("alice@example.com"));
    }

    #[test]
    fn test_userinfo_without_email() {
        let response: UserInfoResponse =
            serde_json::from_str(r#"{"sub": "10769150350006150715113082367"}"#)
                .expect("Failed to parse userinfo response");

        assert!(response.email.is_none());
    }
}
