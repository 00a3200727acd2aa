use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::access::models::Principal;
use crate::domain::access::policy::AccessDecision;
use crate::domain::token::models::bearer_credentials;
use crate::inbound::http::router::AppState;

/// Resolve the bearer token into a [`Principal`] request extension.
///
/// Never rejects a request: any failure leaves the request unauthenticated
/// and the decision to the authorization gate. Public paths are not resolved.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if state.access_policy.is_public(req.uri().path()) {
        return next.run(req).await;
    }

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(bearer_credentials)
        .map(str::to_string);

    if let Some(token) = token {
        match state.principal_resolver.resolve(&token).await {
            Ok(principal) => {
                tracing::debug!(
                    user_id = %principal.user_id,
                    authorities = ?principal.authorities(),
                    "Request authenticated"
                );
                req.extensions_mut().insert(principal);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Bearer token rejected");
            }
        }
    }

    next.run(req).await
}

/// Enforce the access policy for the request path.
///
/// `401` when a protected route has no principal, `403` when the principal
/// holds none of the required roles.
pub async fn authorize(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = req.extensions().get::<Principal>();
    let decision = state.access_policy.decide(req.uri().path(), principal);

    match decision {
        AccessDecision::Granted => Ok(next.run(req).await),
        AccessDecision::Unauthenticated => {
            tracing::warn!(
                path = %req.uri().path(),
                method = %req.method(),
                "Unauthenticated request to protected route"
            );
            Err(ApiError::Unauthorized(
                "Full authentication is required to access this resource".to_string(),
            ))
        }
        AccessDecision::Forbidden => {
            tracing::warn!(
                path = %req.uri().path(),
                method = %req.method(),
                user_id = ?principal.map(|p| p.user_id.0),
                "Insufficient role for route"
            );
            Err(ApiError::Forbidden("Access denied".to_string()))
        }
    }
}
