use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::Response,
};
use tracing::error;

use crate::auth::AppState;

/// Identity resolved by the authentication gate, handed to handlers as a
/// request extension. Handlers never see the token itself.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub uid: String,
}

/// Resolve the Authorization header to a user identity: no header is a
/// missing credential (400), an unregistered token an invalid one (401).
/// A token stays valid until its user row changes or is deleted — there is
/// no expiry or rotation.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let raw = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::BAD_REQUEST)?;

    // Accept both a bare token and the "Bearer <token>" form.
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw);

    let uid = state
        .db
        .find_uid_by_token(token)
        .map_err(|e| {
            error!("Token lookup failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(AuthedUser { uid });
    Ok(next.run(req).await)
}
