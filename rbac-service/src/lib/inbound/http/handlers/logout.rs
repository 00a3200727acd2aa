use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use crate::inbound::http::router::AppState;

/// Revoke the presented bearer token. Always succeeds.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> StatusCode {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    state.identity_service.logout(authorization).await;

    StatusCode::OK
}
