use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, warn};

use lookbook_db::models::PostRow;
use lookbook_types::api::{CreatePostRequest, CreatedResponse, PostResponse, UpdatePostRequest};
use lookbook_types::models::Privacy;

use crate::auth::AppState;
use crate::middleware::AuthedUser;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Json(req): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.content.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let created = state
        .db
        .create_post(
            &user.uid,
            &req.content,
            req.privacy,
            req.num_likes,
            req.num_comments,
            req.num_shares,
        )
        .map_err(|e| {
            error!("Post creation failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    match created {
        Some(uid) => Ok((StatusCode::CREATED, Json(CreatedResponse { uid }))),
        None => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

pub async fn get_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let row = state
        .db
        .get_post(&uid, &user.uid)
        .map_err(|e| {
            error!("Post fetch failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(post_response(row)))
}

pub async fn list_posts(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = state.db.list_user_posts(&user.uid).map_err(|e| {
        error!("Post listing failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let posts: Vec<PostResponse> = rows.into_iter().map(post_response).collect();
    Ok(Json(posts))
}

pub async fn update_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(uid): Path<String>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.content.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let n = state
        .db
        .update_post(
            &uid,
            &user.uid,
            &req.content,
            req.privacy,
            req.num_likes,
            req.num_comments,
            req.num_shares,
        )
        .map_err(|e| {
            error!("Post update failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(serde_json::json!({ "updated": n > 0 })))
}

pub async fn delete_post(
    State(state): State<AppState>,
    Extension(user): Extension<AuthedUser>,
    Path(uid): Path<String>,
) -> Result<impl IntoResponse, StatusCode> {
    let n = state.db.delete_post(&uid, &user.uid).map_err(|e| {
        error!("Post delete failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(serde_json::json!({ "deleted": n > 0 })))
}

fn post_response(row: PostRow) -> PostResponse {
    let privacy = Privacy::from_i64(row.privacy).unwrap_or_else(|| {
        warn!("Corrupt privacy value {} on post '{}'", row.privacy, row.uid);
        Privacy::Private
    });

    PostResponse {
        created_at: crate::parse_timestamp(&row.created_at, &row.uid),
        updated_at: crate::parse_timestamp(&row.updated_at, &row.uid),
        uid: row.uid,
        content: row.content,
        privacy,
        num_likes: row.num_likes,
        num_comments: row.num_comments,
        num_shares: row.num_shares,
    }
}
