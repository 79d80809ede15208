use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AuthServicePort;
use crate::domain::account::ports::IdentityVerifier;
use crate::domain::account::ports::UserStore;
use crate::inbound::http::router::AppState;

pub async fn sign_up<S: UserStore, V: IdentityVerifier>(
    State(state): State<AppState<S, V>>,
    Json(body): Json<SignUpRequestBody>,
) -> Result<ApiSuccess<()>, ApiError> {
    state
        .auth_service
        .sign_up(body.try_into_credentials()?)
        .await
        .map_err(ApiError::from)
        .map(|()| ApiSuccess::new(StatusCode::CREATED, ()))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignUpRequestBody {
    email: String,
    password: String,
}

impl SignUpRequestBody {
    fn try_into_credentials(self) -> Result<Credentials, ApiError> {
        let email = EmailAddress::new(self.email)
            .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

        Ok(Credentials::new(email, self.password))
    }
}
