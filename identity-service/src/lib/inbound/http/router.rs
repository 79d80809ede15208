use std::sync::Arc;
use std::time::Duration;

use auth::JwtHandler;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::confirm_account::confirm_account;
use super::handlers::current_user::current_user;
use super::handlers::sign_in::sign_in;
use super::handlers::sign_in_google::sign_in_google;
use super::handlers::sign_up::sign_up;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::ports::IdentityVerifier;
use crate::domain::account::ports::UserStore;
use crate::domain::account::service::AuthService;

/// Shared state handed to every handler and to the auth middleware.
///
/// Generic over the store and verifier so tests can assemble the router
/// on top of in-memory implementations.
pub struct AppState<S, V>
where
    S: UserStore,
    V: IdentityVerifier,
{
    pub auth_service: Arc<AuthService<S, V>>,
    pub jwt_handler: Arc<JwtHandler>,
}

impl<S, V> Clone for AppState<S, V>
where
    S: UserStore,
    V: IdentityVerifier,
{
    fn clone(&self) -> Self {
        Self {
            auth_service: Arc::clone(&self.auth_service),
            jwt_handler: Arc::clone(&self.jwt_handler),
        }
    }
}

pub fn create_router<S, V>(
    auth_service: Arc<AuthService<S, V>>,
    jwt_handler: Arc<JwtHandler>,
) -> Router
where
    S: UserStore,
    V: IdentityVerifier,
{
    let state = AppState {
        auth_service,
        jwt_handler,
    };

    let public_routes = Router::new()
        .route("/api/auth/signup", post(sign_up::<S, V>))
        .route("/api/auth/signin", post(sign_in::<S, V>))
        .route("/api/auth/confirm", post(confirm_account::<S, V>))
        .route("/api/auth/signin/google", post(sign_in_google::<S, V>));

    let protected_routes = Router::new()
        .route("/api/auth/me", get(current_user))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::<S, V>,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
