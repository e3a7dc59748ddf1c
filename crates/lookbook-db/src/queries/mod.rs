mod comments;
mod items;
mod looks;
mod posts;
mod users;

use anyhow::Result;
use rusqlite::Connection;

/// The five ownership tables. Each records (owner uid, owned uid) pairs
/// with a composite primary key, so a pair can exist at most once.
#[derive(Debug, Clone, Copy)]
pub enum Assoc {
    UserPosts,
    UserLooks,
    LookItems,
    PostComments,
    LookComments,
}

impl Assoc {
    fn insert_sql(self) -> &'static str {
        match self {
            Assoc::UserPosts => "INSERT INTO user_posts (user_uid, post_uid) VALUES (?1, ?2)",
            Assoc::UserLooks => "INSERT INTO user_looks (user_uid, look_uid) VALUES (?1, ?2)",
            Assoc::LookItems => "INSERT INTO look_items (look_uid, item_uid) VALUES (?1, ?2)",
            Assoc::PostComments => {
                "INSERT INTO post_comments (post_uid, comment_uid) VALUES (?1, ?2)"
            }
            Assoc::LookComments => {
                "INSERT INTO look_comments (look_uid, comment_uid) VALUES (?1, ?2)"
            }
        }
    }
}

/// Record an ownership pair. Returns false when the pair already exists or
/// a referenced row is missing; callers treat that as creation failure and
/// roll back the surrounding transaction. Associations are never updated,
/// only created here and removed by the cascade on entity delete.
pub fn link(conn: &Connection, table: Assoc, owner_uid: &str, owned_uid: &str) -> Result<bool> {
    match conn.execute(table.insert_sql(), rusqlite::params![owner_uid, owned_uid]) {
        Ok(n) => Ok(n > 0),
        Err(e) if is_constraint_violation(&e) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::Database;
    use crate::models::RegisteredUser;

    pub fn test_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    /// Register a user with a throwaway password hash; the store never
    /// inspects the hash, so tests don't need a real digest.
    pub fn seed_user(db: &Database, email: &str) -> RegisteredUser {
        db.create_user("Test User", email, "not-a-real-digest").unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{seed_user, test_db};
    use crate::StoreError;
    use lookbook_types::models::Privacy;

    /// End-to-end pass over the store: registration, duplicate rejection,
    /// token resolution, ownership-scoped post CRUD.
    #[test]
    fn register_authenticate_and_scope_posts() {
        let db = test_db();

        let alice = db.create_user("A", "a@x.com", "pw-digest").unwrap();

        let dup = db.create_user("A2", "a@x.com", "other-digest");
        let err = dup.unwrap_err();
        assert_eq!(
            err.downcast_ref::<StoreError>(),
            Some(&StoreError::DuplicateCredential)
        );

        // The freshly issued token resolves back to the same identity.
        let resolved = db.find_uid_by_token(&alice.api_token).unwrap();
        assert_eq!(resolved.as_deref(), Some(alice.uid.as_str()));

        let post_uid = db
            .create_post(&alice.uid, "hello", Privacy::Public, 0, 0, 0)
            .unwrap()
            .expect("post creation");

        let posts = db.list_user_posts(&alice.uid).unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].content, "hello");

        // A different user cannot delete it, and cannot tell it exists.
        let bob = seed_user(&db, "b@x.com");
        assert_eq!(db.delete_post(&post_uid, &bob.uid).unwrap(), 0);
        assert!(db.get_post(&post_uid, &bob.uid).unwrap().is_none());

        // Still there for its owner.
        let mine = db.get_post(&post_uid, &alice.uid).unwrap().unwrap();
        assert_eq!(mine.content, "hello");
    }
}
