use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::HeaderMap,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::{SessionResponse, User};
use shared_models::error::AppError;
use shared_utils::extractor::extract_bearer_token;
use shared_utils::jwt::validate_token;

/// Reports whether the bearer token would be accepted. A present but bad
/// token is answered with `valid: false`, not an error.
#[axum::debug_handler]
pub async fn verify_token(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    debug!("Verifying token");

    let token = extract_bearer_token(&headers)?;

    match validate_token(&token, &config.jwt_secret) {
        Ok(user) => {
            debug!("Token valid for user {}", user.id);
            Ok(Json(json!({ "valid": true })))
        }
        Err(err) => {
            debug!("Token rejected: {}", err);
            Ok(Json(json!({ "valid": false })))
        }
    }
}

#[axum::debug_handler]
pub async fn get_session(Extension(user): Extension<User>) -> Json<SessionResponse> {
    debug!("Session requested by user {}", user.id);

    Json(SessionResponse::from(&user))
}
