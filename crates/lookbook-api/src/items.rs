use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::error;

use lookbook_db::models::ItemRow;
use lookbook_types::api::{
    CreateItemRequest, CreatedResponse, ItemResponse, ItemScope, UpdateItemRequest,
};

use crate::auth::AppState;
use crate::middleware::AuthedUser;

/// Items are scoped by their owning look rather than directly by the
/// caller; authentication still gates every route here.
pub async fn create_item(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthedUser>,
    Json(req): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.title.trim().is_empty() || req.look_uid.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let created = state
        .db
        .create_item(&req.look_uid, &req.title, &req.images)
        .map_err(|e| {
            error!("Item creation failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    match created {
        Some(uid) => Ok((StatusCode::CREATED, Json(CreatedResponse { uid }))),
        // The look uid didn't resolve; whether it exists for someone else
        // is deliberately not revealed.
        None => Err(StatusCode::NOT_FOUND),
    }
}

pub async fn get_item(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthedUser>,
    Path(uid): Path<String>,
    Query(scope): Query<ItemScope>,
) -> Result<impl IntoResponse, StatusCode> {
    let row = state
        .db
        .get_item(&uid, &scope.look_uid)
        .map_err(|e| {
            error!("Item fetch failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(item_response(row)))
}

pub async fn list_items(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthedUser>,
    Query(scope): Query<ItemScope>,
) -> Result<impl IntoResponse, StatusCode> {
    let rows = state.db.list_look_items(&scope.look_uid).map_err(|e| {
        error!("Item listing failed: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let items: Vec<ItemResponse> = rows.into_iter().map(item_response).collect();
    Ok(Json(items))
}

pub async fn update_item(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthedUser>,
    Path(uid): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> Result<impl IntoResponse, StatusCode> {
    if req.title.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let n = state
        .db
        .update_item(&uid, &req.look_uid, &req.title, &req.images)
        .map_err(|e| {
            error!("Item update failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(serde_json::json!({ "updated": n > 0 })))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Extension(_user): Extension<AuthedUser>,
    Path(uid): Path<String>,
    Query(scope): Query<ItemScope>,
) -> Result<impl IntoResponse, StatusCode> {
    let n = state
        .db
        .delete_item(&uid, &scope.look_uid)
        .map_err(|e| {
            error!("Item delete failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(serde_json::json!({ "deleted": n > 0 })))
}

fn item_response(row: ItemRow) -> ItemResponse {
    ItemResponse {
        created_at: crate::parse_timestamp(&row.created_at, &row.uid),
        updated_at: crate::parse_timestamp(&row.updated_at, &row.uid),
        uid: row.uid,
        title: row.title,
        images: row.images,
    }
}
