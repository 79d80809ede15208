use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::account::errors::AuthError;
use crate::domain::account::ports::IdentityVerifier;
use crate::domain::account::ports::UserStore;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated identity in request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    pub email: String,
}

/// Middleware that validates bearer tokens and adds the identity to request extensions
pub async fn authenticate<S: UserStore, V: IdentityVerifier>(
    State(state): State<AppState<S, V>>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    // Extract token from Authorization header
    let token = extract_token_from_header(&req)?;

    // Validate token and extract claims
    let claims: auth::Claims = state.jwt_handler.decode(token).map_err(|e| {
        tracing::warn!("Bearer token rejected: {}", e);
        unauthenticated()
    })?;

    // Add the verified identity to request extensions
    req.extensions_mut().insert(AuthenticatedIdentity {
        email: claims.email,
    });

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(unauthenticated)?;

    let auth_str = auth_header.to_str().map_err(|_| unauthenticated())?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(unauthenticated)
}

fn unauthenticated() -> Response {
    ApiError::from(AuthError::Unauthenticated).into_response()
}
