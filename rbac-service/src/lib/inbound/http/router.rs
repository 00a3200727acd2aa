use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
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

use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::not_found;
use super::handlers::register::register;
use super::handlers::resources;
use super::middleware::authenticate;
use super::middleware::authorize;
use crate::domain::access::policy::AccessPolicy;
use crate::domain::access::ports::PrincipalResolverPort;
use crate::domain::access::service::PrincipalResolver;
use crate::domain::token::ports::TokenRepository;
use crate::domain::user::ports::IdentityServicePort;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::IdentityService;

#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<dyn IdentityServicePort>,
    pub principal_resolver: Arc<dyn PrincipalResolverPort>,
    pub access_policy: Arc<AccessPolicy>,
}

/// Wire the identity service and principal resolver over shared stores.
pub fn build_router<UR, TR>(
    users: Arc<UR>,
    tokens: Arc<TR>,
    authenticator: Arc<Authenticator>,
) -> Router
where
    UR: UserRepository,
    TR: TokenRepository,
{
    let identity_service = Arc::new(IdentityService::new(
        Arc::clone(&users),
        Arc::clone(&tokens),
        Arc::clone(&authenticator),
    ));
    let principal_resolver = Arc::new(PrincipalResolver::new(users, tokens, authenticator));

    create_router(
        identity_service,
        principal_resolver,
        Arc::new(AccessPolicy::default()),
    )
}

pub fn create_router(
    identity_service: Arc<dyn IdentityServicePort>,
    principal_resolver: Arc<dyn PrincipalResolverPort>,
    access_policy: Arc<AccessPolicy>,
) -> Router {
    let state = AppState {
        identity_service,
        principal_resolver,
        access_policy,
    };

    let public_routes = Router::new()
        .route("/api/v1/public/register", post(register))
        .route("/api/v1/public/login", post(login))
        .route("/api/v1/public/logout", post(logout));

    let resource_routes = Router::new()
        .route(
            "/api/v1/admin",
            get(resources::admin)
                .post(resources::admin)
                .put(resources::admin)
                .delete(resources::admin),
        )
        .route("/api/v1/admin/users", get(list_users))
        .route(
            "/api/v1/moderator",
            get(resources::moderator)
                .post(resources::moderator)
                .put(resources::moderator)
                .delete(resources::moderator),
        )
        .route(
            "/api/v1/user",
            get(resources::user)
                .post(resources::user)
                .put(resources::user)
                .delete(resources::user),
        );

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

    // Layers wrap outside-in: authenticate runs before authorize.
    Router::new()
        .merge(public_routes)
        .merge(resource_routes)
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), authorize))
        .layer(middleware::from_fn_with_state(state.clone(), authenticate))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
