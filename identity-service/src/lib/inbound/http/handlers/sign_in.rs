use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::AuthError;
use crate::domain::account::models::AccessToken;
use crate::domain::account::models::Credentials;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AuthServicePort;
use crate::domain::account::ports::IdentityVerifier;
use crate::domain::account::ports::UserStore;
use crate::inbound::http::router::AppState;

pub async fn sign_in<S: UserStore, V: IdentityVerifier>(
    State(state): State<AppState<S, V>>,
    Json(body): Json<SignInRequestBody>,
) -> Result<ApiSuccess<AccessToken>, ApiError> {
    // A malformed email is reported exactly like a failed lookup, so the
    // response never hints at which part of the credentials was wrong
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::from(AuthError::InvalidCredentials))?;

    state
        .auth_service
        .sign_in(Credentials::new(email, body.password))
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignInRequestBody {
    email: String,
    password: String,
}
