use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use tracing::error;

use lookbook_db::{Database, StoreError};
use lookbook_types::api::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

use crate::password;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    // Validate input
    if req.name.trim().is_empty() || req.password.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    if !is_plausible_email(&req.email) {
        return Err(StatusCode::BAD_REQUEST);
    }

    let password_hash = password::hash(&req.password).map_err(|e| {
        error!("Password hashing failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    match state.db.create_user(&req.name, &req.email, &password_hash) {
        Ok(user) => Ok((
            StatusCode::CREATED,
            Json(RegisterResponse {
                uid: user.uid,
                api_token: user.api_token,
            }),
        )),
        Err(e) if e.downcast_ref::<StoreError>() == Some(&StoreError::DuplicateCredential) => {
            Err(StatusCode::CONFLICT)
        }
        Err(e) => {
            error!("User creation failed: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    let user = state
        .db
        .get_user_by_email(&req.email)
        .map_err(|e| {
            error!("Login lookup failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::UNAUTHORIZED)?;

    // Verify password; unknown email and wrong password are the same 401.
    if !password::verify(&user.password_hash, &req.password) {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(Json(LoginResponse {
        created_at: crate::parse_timestamp(&user.created_at, &user.uid),
        updated_at: crate::parse_timestamp(&user.updated_at, &user.uid),
        uid: user.uid,
        name: user.name,
        email: user.email,
        api_token: user.api_token,
        birthday: user.birthday,
        location: user.location,
        about: user.about,
    }))
}

/// Enough structure to catch obvious garbage; real mailbox validation is
/// the client's problem.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::is_plausible_email;

    #[test]
    fn email_plausibility() {
        assert!(is_plausible_email("a@x.com"));
        assert!(is_plausible_email("first.last@sub.example.org"));
        assert!(!is_plausible_email("not-an-email"));
        assert!(!is_plausible_email("@x.com"));
        assert!(!is_plausible_email("a@nodot"));
    }
}
