use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, warn};

use lookbook_db::models::CommentRow;
use lookbook_types::api::{
    CommentResponse, CommentScope, CreateCommentRequest, CreatedResponse, UpdateCommentRequest,
};
use lookbook_types::models::{CommentKind, CommentOwner};

use crate::auth::AppState;
use crate::middleware::AuthedUser;

/// The wire carries `entity_type` + `entity_uid`; they collapse into a
/// `CommentOwner` here and stay a typed variant below this point.
pub async fn create_comment(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthedUser>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.content.trim().is_empty() || req.entity_uid.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let owner = CommentOwner::new(req.entity_type, req.entity_uid);

    let created = state
        .db
        .create_comment(&owner, req.kind, &req.content, req.num_likes)
        .map_err(|e| {
            error!("Comment creation failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    match created {
        Some(uid) => Ok((StatusCode::CREATED, Json(CreatedResponse { uid }))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn get_comment(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthedUser>,
    Path(uid): Path<String>,
    Query(scope): Query<CommentScope>,
) -> Result<impl IntoResponse, StatusCode> {
    let owner = CommentOwner::new(scope.entity_type, scope.entity_uid);

    let row = state
        .db
        .get_comment(&uid, &owner)
        .map_err(|e| {
            error!("Comment fetch failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(comment_response(row)))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthedUser>,
    Query(scope): Query<CommentScope>,
) -> Result<impl IntoResponse, StatusCode> {
    let owner = CommentOwner::new(scope.entity_type, scope.entity_uid);

    let rows = state.db.list_entity_comments(&owner).map_err(|e| {
        error!("Comment listing failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let comments: Vec<CommentResponse> = rows.into_iter().map(comment_response).collect();
    Ok(Json(comments))
}

pub async fn update_comment(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthedUser>,
    Path(uid): Path<String>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.content.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let owner = CommentOwner::new(req.entity_type, req.entity_uid);

    let n = state
        .db
        .update_comment(&uid, &owner, &req.content, req.num_likes)
        .map_err(|e| {
            error!("Comment update failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(serde_json::json!({ "updated": n > 0 })))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthedUser>,
    Path(uid): Path<String>,
    Query(scope): Query<CommentScope>,
) -> Result<impl IntoResponse, StatusCode> {
    let owner = CommentOwner::new(scope.entity_type, scope.entity_uid);

    let n = state.db.delete_comment(&uid, &owner).map_err(|e| {
        error!("Comment delete failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(serde_json::json!({ "deleted": n > 0 })))
}

fn comment_response(row: CommentRow) -> CommentResponse {
    let kind = CommentKind::from_i64(row.kind).unwrap_or_else(|| {
        warn!("Corrupt kind value {} on comment '{}'", row.kind, row.uid);
        CommentKind::Comment
    });

    CommentResponse {
        created_at: crate::parse_timestamp(&row.created_at, &row.uid),
        updated_at: crate::parse_timestamp(&row.updated_at, &row.uid),
        uid: row.uid,
        kind,
        content: row.content,
        num_likes: row.num_likes,
    }
}
