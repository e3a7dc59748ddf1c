use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, warn};

use lookbook_db::models::LookRow;
use lookbook_types::api::{CreateLookRequest, CreatedResponse, LookResponse, UpdateLookRequest};
use lookbook_types::models::Privacy;

use crate::auth::AppState;
use crate::middleware::AuthedUser;

pub async fn create_look(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Json(req): Json<CreateLookRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let created = state
        .db
        .create_look(
            &user.uid,
            &req.title,
            req.privacy,
            req.num_items,
            req.num_likes,
            req.num_comments,
            req.num_shares,
        )
        .map_err(|e| {
            error!("Look creation failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    match created {
        Some(uid) => Ok((StatusCode::CREATED, Json(CreatedResponse { uid }))),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

pub async fn get_look(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let row = state
        .db
        .get_look(&uid, &user.uid)
        .map_err(|e| {
            error!("Look fetch failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(look_response(row)))
}

pub async fn list_looks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = state.db.list_user_looks(&user.uid).map_err(|e| {
        error!("Look listing failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let looks: Vec<LookResponse> = rows.into_iter().map(look_response).collect();
    Ok(Json(looks))
}

pub async fn update_look(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(uid): Path<String>,
    Json(req): Json<UpdateLookRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let n = state
        .db
        .update_look(
            &uid,
            &user.uid,
            &req.title,
            req.privacy,
            req.num_items,
            req.num_likes,
            req.num_comments,
            req.num_shares,
        )
        .map_err(|e| {
            error!("Look update failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(serde_json::json!({ "updated": n > 0 })))
}

pub async fn delete_look(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let n = state.db.delete_look(&uid, &user.uid).map_err(|e| {
        error!("Look delete failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(serde_json::json!({ "deleted": n > 0 })))
}

fn look_response(row: LookRow) -> LookResponse {
    let privacy = Privacy::from_i64(row.privacy).unwrap_or_else(|| {
        warn!("Corrupt privacy value {} on look '{}'", row.privacy, row.uid);
        Privacy::Private
    });

    LookResponse {
        created_at: crate::parse_timestamp(&row.created_at, &row.uid),
        updated_at: crate::parse_timestamp(&row.updated_at, &row.uid),
        uid: row.uid,
        title: row.title,
        privacy,
        num_items: row.num_items,
        num_likes: row.num_likes,
        num_comments: row.num_comments,
        num_shares: row.num_shares,
    }
}
