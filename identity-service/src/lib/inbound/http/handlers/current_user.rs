use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;

/// Return the identity behind the presented bearer token.
///
/// The middleware has already validated the token; everything here comes
/// from its verified claims, not from the request body.
pub async fn current_user(
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<CurrentUserResponseData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        CurrentUserResponseData {
            email: identity.email,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub email: String,
}
