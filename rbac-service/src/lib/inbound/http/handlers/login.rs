use axum::extract::Query;
use axum::extract::State;
use serde::Deserialize;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// Exchange query-string credentials for a bearer token.
///
/// The token is delivered in a plain-text body.
pub async fn login(
    State(state): State<AppState>,
    Query(params): Query<LoginParams>,
) -> Result<String, ApiError> {
    let token = state
        .identity_service
        .authenticate(&params.email, &params.password)
        .await?;

    Ok(format!(
        "Authentication successful for email: {}\nJWT Token: {}",
        params.email, token
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginParams {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}
