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

pub async fn confirm_account<S: UserStore, V: IdentityVerifier>(
    State(state): State<AppState<S, V>>,
    Json(body): Json<ConfirmAccountRequestBody>,
) -> Result<ApiSuccess<AccessToken>, ApiError> {
    state
        .auth_service
        .confirm_account(&body.email, &body.token)
        .await
        .map_err(ApiError::from)
        .map(|token| ApiSuccess::new(StatusCode::OK, token))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfirmAccountRequestBody {
    email: String,
    token: String,
}
