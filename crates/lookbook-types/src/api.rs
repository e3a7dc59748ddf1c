use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{CommentEntityKind, CommentKind, Privacy};

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub uid: String,
    pub api_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub api_token: String,
    pub birthday: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// -- Posts --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostRequest {
    pub content: String,
    pub privacy: Privacy,
    pub num_likes: i64,
    pub num_comments: i64,
    pub num_shares: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePostRequest {
    pub content: String,
    pub privacy: Privacy,
    pub num_likes: i64,
    pub num_comments: i64,
    pub num_shares: i64,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub uid: String,
    pub content: String,
    pub privacy: Privacy,
    pub num_likes: i64,
    pub num_comments: i64,
    pub num_shares: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// -- Looks --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateLookRequest {
    pub title: String,
    pub privacy: Privacy,
    pub num_items: i64,
    pub num_likes: i64,
    pub num_comments: i64,
    pub num_shares: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateLookRequest {
    pub title: String,
    pub privacy: Privacy,
    pub num_items: i64,
    pub num_likes: i64,
    pub num_comments: i64,
    pub num_shares: i64,
}

#[derive(Debug, Serialize)]
pub struct LookResponse {
    pub uid: String,
    pub title: String,
    pub privacy: Privacy,
    pub num_items: i64,
    pub num_likes: i64,
    pub num_comments: i64,
    pub num_shares: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// -- Items --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateItemRequest {
    pub look_uid: String,
    pub title: String,
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateItemRequest {
    pub look_uid: String,
    pub title: String,
    pub images: Vec<String>,
}

/// Query parameters scoping an item operation to its owning look.
#[derive(Debug, Deserialize)]
pub struct ItemScope {
    pub look_uid: String,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub uid: String,
    pub title: String,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// -- Comments --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateCommentRequest {
    pub entity_uid: String,
    pub entity_type: CommentEntityKind,
    pub kind: CommentKind,
    pub content: String,
    pub num_likes: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCommentRequest {
    pub entity_uid: String,
    pub entity_type: CommentEntityKind,
    pub content: String,
    pub num_likes: i64,
}

/// Query parameters scoping a comment operation to its owning entity.
#[derive(Debug, Deserialize)]
pub struct CommentScope {
    pub entity_uid: String,
    pub entity_type: CommentEntityKind,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub uid: String,
    pub kind: CommentKind,
    pub content: String,
    pub num_likes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// -- Shared --

/// Body returned by every create endpoint: the new entity's opaque uid.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub uid: String,
}
