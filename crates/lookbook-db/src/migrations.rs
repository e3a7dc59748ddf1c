use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            uid           TEXT NOT NULL UNIQUE,
            name          TEXT NOT NULL,
            email         TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            api_token     TEXT NOT NULL UNIQUE,
            status        INTEGER NOT NULL DEFAULT 1,
            birthday      TEXT,
            location      TEXT,
            about         TEXT,
            created_at    TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at    TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS posts (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            uid          TEXT NOT NULL UNIQUE,
            content      TEXT NOT NULL,
            privacy      INTEGER NOT NULL,
            num_likes    INTEGER NOT NULL DEFAULT 0,
            num_comments INTEGER NOT NULL DEFAULT 0,
            num_shares   INTEGER NOT NULL DEFAULT 0,
            created_at   TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS looks (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            uid          TEXT NOT NULL UNIQUE,
            title        TEXT NOT NULL,
            privacy      INTEGER NOT NULL,
            num_items    INTEGER NOT NULL DEFAULT 0,
            num_likes    INTEGER NOT NULL DEFAULT 0,
            num_comments INTEGER NOT NULL DEFAULT 0,
            num_shares   INTEGER NOT NULL DEFAULT 0,
            created_at   TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at   TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS items (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            uid        TEXT NOT NULL UNIQUE,
            title      TEXT NOT NULL,
            images     TEXT NOT NULL DEFAULT '[]',
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS comments (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            uid        TEXT NOT NULL UNIQUE,
            kind       INTEGER NOT NULL,
            content    TEXT NOT NULL,
            num_likes  INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- Ownership pairs. The association row is the sole authority on who
        -- owns what; entity tables carry no owner column. Deleting an entity
        -- row cascades into its association rows.

        CREATE TABLE IF NOT EXISTS user_posts (
            user_uid TEXT NOT NULL REFERENCES users(uid) ON DELETE CASCADE,
            post_uid TEXT NOT NULL REFERENCES posts(uid) ON DELETE CASCADE,
            PRIMARY KEY (user_uid, post_uid)
        );

        CREATE INDEX IF NOT EXISTS idx_user_posts_post
            ON user_posts(post_uid);

        CREATE TABLE IF NOT EXISTS user_looks (
            user_uid TEXT NOT NULL REFERENCES users(uid) ON DELETE CASCADE,
            look_uid TEXT NOT NULL REFERENCES looks(uid) ON DELETE CASCADE,
            PRIMARY KEY (user_uid, look_uid)
        );

        CREATE INDEX IF NOT EXISTS idx_user_looks_look
            ON user_looks(look_uid);

        CREATE TABLE IF NOT EXISTS look_items (
            look_uid TEXT NOT NULL REFERENCES looks(uid) ON DELETE CASCADE,
            item_uid TEXT NOT NULL REFERENCES items(uid) ON DELETE CASCADE,
            PRIMARY KEY (look_uid, item_uid)
        );

        CREATE INDEX IF NOT EXISTS idx_look_items_item
            ON look_items(item_uid);

        CREATE TABLE IF NOT EXISTS post_comments (
            post_uid    TEXT NOT NULL REFERENCES posts(uid) ON DELETE CASCADE,
            comment_uid TEXT NOT NULL REFERENCES comments(uid) ON DELETE CASCADE,
            PRIMARY KEY (post_uid, comment_uid)
        );

        CREATE INDEX IF NOT EXISTS idx_post_comments_comment
            ON post_comments(comment_uid);

        CREATE TABLE IF NOT EXISTS look_comments (
            look_uid    TEXT NOT NULL REFERENCES looks(uid) ON DELETE CASCADE,
            comment_uid TEXT NOT NULL REFERENCES comments(uid) ON DELETE CASCADE,
            PRIMARY KEY (look_uid, comment_uid)
        );

        CREATE INDEX IF NOT EXISTS idx_look_comments_comment
            ON look_comments(comment_uid);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
