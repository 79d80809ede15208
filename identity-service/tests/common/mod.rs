use std::sync::Arc;

use async_trait::async_trait;
use auth::JwtHandler;
use chrono::Duration;
use identity_service::domain::account::errors::AuthError;
use identity_service::domain::account::models::EmailAddress;
use identity_service::domain::account::models::FederatedIdentity;
use identity_service::domain::account::ports::IdentityVerifier;
use identity_service::domain::account::ports::UserStore;
use identity_service::domain::account::service::AuthService;
use identity_service::inbound::http::router::create_router;
use identity_service::outbound::repositories::InMemoryUserStore;

/// Signing secret shared by the spawned server and test assertions
pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Identity verifier double with a fixed outcome
pub struct StubIdentityVerifier {
    outcome: Result<String, String>,
}

impl StubIdentityVerifier {
    /// Stub that attests the given email for any authorization code
    pub fn verified(email: &str) -> Self {
        Self {
            outcome: Ok(email.to_string()),
        }
    }

    /// Stub that rejects every authorization code with the given reason
    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
        }
    }
}

#[async_trait]
impl IdentityVerifier for StubIdentityVerifier {
    async fn validate(&self, _code: &str) -> Result<FederatedIdentity, AuthError> {
        match &self.outcome {
            Ok(email) => {
                let email = EmailAddress::new(email.clone())
                    .map_err(|e| AuthError::FederatedAuthFailed(e.to_string()))?;
                Ok(FederatedIdentity { email })
            }
            Err(reason) => Err(AuthError::FederatedAuthFailed(reason.clone())),
        }
    }
}

/// Test application that spawns a real server over in-memory adapters
pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryUserStore>,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application with a verifier that attests a fixed email
    pub async fn spawn() -> Self {
        Self::spawn_with_verifier(StubIdentityVerifier::verified("federated@example.com")).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with_verifier(verifier: StubIdentityVerifier) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryUserStore::new());
        let jwt_handler = Arc::new(JwtHandler::new(JWT_SECRET));

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&store),
            Arc::new(verifier),
            Arc::clone(&jwt_handler),
            Duration::hours(24),
        ));

        let router = create_router(auth_service, jwt_handler);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            store,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Read the pending confirmation code straight out of the store
    pub async fn confirmation_code_for(&self, email: &str) -> String {
        self.store
            .find_by_email(email)
            .await
            .expect("Failed to read account")
            .expect("Account not found")
            .confirmation_code
            .expect("Account has no pending confirmation code")
    }
}
