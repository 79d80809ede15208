use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AccessToken;
use crate::domain::account::ports::AuthServicePort;
use crate::domain::account::ports::IdentityVerifier;
use crate::domain::account::ports::UserStore;
use crate::inbound::http::router::AppState;

pub async fn sign_in_google<S: UserStore, V: IdentityVerifier>(
    State(state): State<AppState<S, V>>,
    Json(body): Json<GoogleSignInRequestBody>,
) -> Result<ApiSuccess<AccessToken>, ApiError> {
    state
        .auth_service
        .sign_in_google(&body.code)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token))
}

/// Carries the authorization code from the provider's redirect
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GoogleSignInRequestBody {
    code: String,
}
