use anyhow::Result;
use lookbook_types::models::Privacy;
use rusqlite::{OptionalExtension, params};

use super::{Assoc, link};
use crate::models::PostRow;
use crate::{Database, new_uid};

impl Database {
    /// Insert a post and its owning association in one transaction. A
    /// failed link rolls the entity row back and reports `None` instead of
    /// leaving an orphan behind.
    pub fn create_post(
        &self,
        user_uid: &str,
        content: &str,
        privacy: Privacy,
        num_likes: i64,
        num_comments: i64,
        num_shares: i64,
    ) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            let uid = new_uid();

            tx.execute(
                "INSERT INTO posts (uid, content, privacy, num_likes, num_comments, num_shares)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![uid, content, privacy.as_i64(), num_likes, num_comments, num_shares],
            )?;

            if !link(&tx, Assoc::UserPosts, user_uid, &uid)? {
                return Ok(None);
            }

            tx.commit()?;
            Ok(Some(uid))
        })
    }

    /// Owner-scoped fetch. A miss does not reveal whether the post exists
    /// under a different owner.
    pub fn get_post(&self, post_uid: &str, user_uid: &str) -> Result<Option<PostRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT p.uid, p.content, p.privacy, p.num_likes, p.num_comments, p.num_shares,
                        p.created_at, p.updated_at
                 FROM posts p
                 JOIN user_posts up ON up.post_uid = p.uid
                 WHERE p.uid = ?1 AND up.user_uid = ?2",
            )?;

            let row = stmt
                .query_row(params![post_uid, user_uid], post_from_row)
                .optional()?;
            Ok(row)
        })
    }

    pub fn list_user_posts(&self, user_uid: &str) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT p.uid, p.content, p.privacy, p.num_likes, p.num_comments, p.num_shares,
                        p.created_at, p.updated_at
                 FROM posts p
                 JOIN user_posts up ON up.post_uid = p.uid
                 WHERE up.user_uid = ?1",
            )?;

            let rows = stmt
                .query_map([user_uid], post_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Set new field values on a post the given user owns. Returns the
    /// affected-row count; zero means not found or not owned.
    pub fn update_post(
        &self,
        post_uid: &str,
        user_uid: &str,
        content: &str,
        privacy: Privacy,
        num_likes: i64,
        num_comments: i64,
        num_shares: i64,
    ) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE posts
                 SET content = ?1, privacy = ?2, num_likes = ?3, num_comments = ?4,
                     num_shares = ?5, updated_at = datetime('now')
                 WHERE uid = ?6
                   AND uid IN (SELECT post_uid FROM user_posts WHERE user_uid = ?7)",
                params![content, privacy.as_i64(), num_likes, num_comments, num_shares, post_uid, user_uid],
            )?;
            Ok(n)
        })
    }

    /// Delete a post the given user owns; the association row goes with it
    /// via the cascade. Zero rows is "nothing to delete under this owner".
    pub fn delete_post(&self, post_uid: &str, user_uid: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "DELETE FROM posts
                 WHERE uid = ?1
                   AND uid IN (SELECT post_uid FROM user_posts WHERE user_uid = ?2)",
                params![post_uid, user_uid],
            )?;
            Ok(n)
        })
    }
}

fn post_from_row(row: &rusqlite::Row) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        uid: row.get(0)?,
        content: row.get(1)?,
        privacy: row.get(2)?,
        num_likes: row.get(3)?,
        num_comments: row.get(4)?,
        num_shares: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{seed_user, test_db};
    use lookbook_types::models::Privacy;

    #[test]
    fn create_then_get_roundtrips_fields() {
        let db = test_db();
        let user = seed_user(&db, "a@x.com");

        let uid = db
            .create_post(&user.uid, "first post", Privacy::FriendsOnly, 3, 1, 2)
            .unwrap()
            .unwrap();

        let post = db.get_post(&uid, &user.uid).unwrap().unwrap();
        assert_eq!(post.uid, uid);
        assert_eq!(post.content, "first post");
        assert_eq!(post.privacy, Privacy::FriendsOnly.as_i64());
        assert_eq!(post.num_likes, 3);
        assert_eq!(post.num_comments, 1);
        assert_eq!(post.num_shares, 2);
        assert!(!post.created_at.is_empty());
    }

    #[test]
    fn create_under_unknown_owner_rolls_back() {
        let db = test_db();

        // No such user: the association insert hits a foreign-key wall and
        // the post row must not survive it.
        let res = db
            .create_post("ghost-uid", "orphan", Privacy::Public, 0, 0, 0)
            .unwrap();
        assert!(res.is_none());

        let user = seed_user(&db, "a@x.com");
        assert!(db.list_user_posts(&user.uid).unwrap().is_empty());
        let count: i64 = db
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM posts", [], |r| r.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn get_is_scoped_to_owner() {
        let db = test_db();
        let alice = seed_user(&db, "a@x.com");
        let bob = seed_user(&db, "b@x.com");

        let uid = db
            .create_post(&alice.uid, "mine", Privacy::Private, 0, 0, 0)
            .unwrap()
            .unwrap();

        assert!(db.get_post(&uid, &bob.uid).unwrap().is_none());
        assert!(db.get_post("missing", &alice.uid).unwrap().is_none());
    }

    #[test]
    fn update_is_scoped_and_touches_updated_at() {
        let db = test_db();
        let alice = seed_user(&db, "a@x.com");
        let bob = seed_user(&db, "b@x.com");

        let uid = db
            .create_post(&alice.uid, "v1", Privacy::Public, 0, 0, 0)
            .unwrap()
            .unwrap();

        assert_eq!(
            db.update_post(&uid, &bob.uid, "stolen", Privacy::Public, 0, 0, 0)
                .unwrap(),
            0
        );

        let n = db
            .update_post(&uid, &alice.uid, "v2", Privacy::Private, 7, 0, 0)
            .unwrap();
        assert_eq!(n, 1);

        let post = db.get_post(&uid, &alice.uid).unwrap().unwrap();
        assert_eq!(post.content, "v2");
        assert_eq!(post.privacy, Privacy::Private.as_i64());
        assert_eq!(post.num_likes, 7);
    }

    #[test]
    fn delete_then_get_is_none() {
        let db = test_db();
        let user = seed_user(&db, "a@x.com");

        let uid = db
            .create_post(&user.uid, "bye", Privacy::Public, 0, 0, 0)
            .unwrap()
            .unwrap();

        assert_eq!(db.delete_post(&uid, &user.uid).unwrap(), 1);
        assert!(db.get_post(&uid, &user.uid).unwrap().is_none());
        // Idempotent from the caller's view: nothing left to delete.
        assert_eq!(db.delete_post(&uid, &user.uid).unwrap(), 0);
    }

    #[test]
    fn list_returns_only_owned_posts() {
        let db = test_db();
        let alice = seed_user(&db, "a@x.com");
        let bob = seed_user(&db, "b@x.com");

        db.create_post(&alice.uid, "one", Privacy::Public, 0, 0, 0)
            .unwrap()
            .unwrap();
        db.create_post(&alice.uid, "two", Privacy::Public, 0, 0, 0)
            .unwrap()
            .unwrap();
        db.create_post(&bob.uid, "other", Privacy::Public, 0, 0, 0)
            .unwrap()
            .unwrap();

        let posts = db.list_user_posts(&alice.uid).unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.content != "other"));
    }
}
