/// Database row types — these map directly to SQLite rows.
/// Distinct from the lookbook-types API models to keep the DB layer
/// independent. Timestamps stay in SQLite's textual form here; the API
/// layer parses them when rendering responses.

pub struct UserRow {
    pub uid: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub api_token: String,
    pub status: i64,
    pub birthday: Option<String>,
    pub location: Option<String>,
    pub about: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Credentials handed back by user creation: the user's opaque uid and the
/// API token the client authenticates with from then on.
#[derive(Debug)]
pub struct RegisteredUser {
    pub uid: String,
    pub api_token: String,
}

pub struct PostRow {
    pub uid: String,
    pub content: String,
    pub privacy: i64,
    pub num_likes: i64,
    pub num_comments: i64,
    pub num_shares: i64,
    pub created_at: String,
    pub updated_at: String,
}

pub struct LookRow {
    pub uid: String,
    pub title: String,
    pub privacy: i64,
    pub num_items: i64,
    pub num_likes: i64,
    pub num_comments: i64,
    pub num_shares: i64,
    pub created_at: String,
    pub updated_at: String,
}

pub struct ItemRow {
    pub uid: String,
    pub title: String,
    pub images: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

pub struct CommentRow {
    pub uid: String,
    pub kind: i64,
    pub content: String,
    pub num_likes: i64,
    pub created_at: String,
    pub updated_at: String,
}
