use anyhow::Result;
use lookbook_types::models::{CommentKind, CommentOwner};
use rusqlite::{OptionalExtension, params};

use super::{Assoc, link};
use crate::models::CommentRow;
use crate::{Database, new_uid};

/// Map a comment owner onto its association table. The variant is decided
/// once at the request boundary; everything below here is concrete SQL.
fn owner_assoc(owner: &CommentOwner) -> (Assoc, &'static str, &'static str) {
    match owner {
        CommentOwner::Post(_) => (Assoc::PostComments, "post_comments", "post_uid"),
        CommentOwner::Look(_) => (Assoc::LookComments, "look_comments", "look_uid"),
    }
}

impl Database {
    /// Insert a comment and link it under its post or look in one
    /// transaction. An unknown entity uid fails the link and rolls back.
    pub fn create_comment(
        &self,
        owner: &CommentOwner,
        kind: CommentKind,
        content: &str,
        num_likes: i64,
    ) -> Result<Option<String>> {
        let (assoc, _, _) = owner_assoc(owner);

        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            let uid = new_uid();

            tx.execute(
                "INSERT INTO comments (uid, kind, content, num_likes) VALUES (?1, ?2, ?3, ?4)",
                params![uid, kind.as_i64(), content, num_likes],
            )?;

            if !link(&tx, assoc, owner.uid(), &uid)? {
                return Ok(None);
            }

            tx.commit()?;
            Ok(Some(uid))
        })
    }

    pub fn get_comment(
        &self,
        comment_uid: &str,
        owner: &CommentOwner,
    ) -> Result<Option<CommentRow>> {
        let (_, table, owner_col) = owner_assoc(owner);
        let sql = format!(
            "SELECT c.uid, c.kind, c.content, c.num_likes, c.created_at, c.updated_at
             FROM comments c
             JOIN {table} ac ON ac.comment_uid = c.uid
             WHERE c.uid = ?1 AND ac.{owner_col} = ?2"
        );

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let row = stmt
                .query_row(params![comment_uid, owner.uid()], comment_from_row)
                .optional()?;
            Ok(row)
        })
    }

    pub fn list_entity_comments(&self, owner: &CommentOwner) -> Result<Vec<CommentRow>> {
        let (_, table, owner_col) = owner_assoc(owner);
        let sql = format!(
            "SELECT c.uid, c.kind, c.content, c.num_likes, c.created_at, c.updated_at
             FROM comments c
             JOIN {table} ac ON ac.comment_uid = c.uid
             WHERE ac.{owner_col} = ?1"
        );

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map([owner.uid()], comment_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_comment(
        &self,
        comment_uid: &str,
        owner: &CommentOwner,
        content: &str,
        num_likes: i64,
    ) -> Result<usize> {
        let (_, table, owner_col) = owner_assoc(owner);
        let sql = format!(
            "UPDATE comments
             SET content = ?1, num_likes = ?2, updated_at = datetime('now')
             WHERE uid = ?3
               AND uid IN (SELECT comment_uid FROM {table} WHERE {owner_col} = ?4)"
        );

        self.with_conn(|conn| {
            let n = conn.execute(&sql, params![content, num_likes, comment_uid, owner.uid()])?;
            Ok(n)
        })
    }

    pub fn delete_comment(&self, comment_uid: &str, owner: &CommentOwner) -> Result<usize> {
        let (_, table, owner_col) = owner_assoc(owner);
        let sql = format!(
            "DELETE FROM comments
             WHERE uid = ?1
               AND uid IN (SELECT comment_uid FROM {table} WHERE {owner_col} = ?2)"
        );

        self.with_conn(|conn| {
            let n = conn.execute(&sql, params![comment_uid, owner.uid()])?;
            Ok(n)
        })
    }
}

fn comment_from_row(row: &rusqlite::Row) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        uid: row.get(0)?,
        kind: row.get(1)?,
        content: row.get(2)?,
        num_likes: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{seed_user, test_db};
    use crate::Database;
    use lookbook_types::models::{CommentKind, CommentOwner, Privacy};

    fn seed_post_and_look(db: &Database) -> (String, String) {
        let user = seed_user(db, "a@x.com");
        let post_uid = db
            .create_post(&user.uid, "a post", Privacy::Public, 0, 0, 0)
            .unwrap()
            .unwrap();
        let look_uid = db
            .create_look(&user.uid, "a look", Privacy::Public, 0, 0, 0, 0)
            .unwrap()
            .unwrap();
        (post_uid, look_uid)
    }

    #[test]
    fn comments_dispatch_to_the_right_association_table() {
        let db = test_db();
        let (post_uid, look_uid) = seed_post_and_look(&db);

        let on_post = CommentOwner::Post(post_uid);
        let on_look = CommentOwner::Look(look_uid);

        let c1 = db
            .create_comment(&on_post, CommentKind::Comment, "nice post", 0)
            .unwrap()
            .unwrap();
        let c2 = db
            .create_comment(&on_look, CommentKind::Answer, "nice look", 0)
            .unwrap()
            .unwrap();

        // Each comment is only reachable through its own entity.
        assert!(db.get_comment(&c1, &on_post).unwrap().is_some());
        assert!(db.get_comment(&c1, &on_look).unwrap().is_none());
        assert!(db.get_comment(&c2, &on_look).unwrap().is_some());
        assert!(db.get_comment(&c2, &on_post).unwrap().is_none());

        assert_eq!(db.list_entity_comments(&on_post).unwrap().len(), 1);
        assert_eq!(db.list_entity_comments(&on_look).unwrap().len(), 1);
    }

    #[test]
    fn create_under_unknown_entity_rolls_back() {
        let db = test_db();
        let owner = CommentOwner::Post("no-such-post".into());

        let res = db
            .create_comment(&owner, CommentKind::Comment, "into the void", 0)
            .unwrap();
        assert!(res.is_none());

        let count: i64 = db
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM comments", [], |r| r.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn update_and_delete_are_entity_scoped() {
        let db = test_db();
        let (post_uid, look_uid) = seed_post_and_look(&db);

        let on_post = CommentOwner::Post(post_uid);
        let on_look = CommentOwner::Look(look_uid);

        let uid = db
            .create_comment(&on_post, CommentKind::Comment, "v1", 0)
            .unwrap()
            .unwrap();

        assert_eq!(db.update_comment(&uid, &on_look, "v2", 0).unwrap(), 0);
        assert_eq!(db.update_comment(&uid, &on_post, "v2", 5).unwrap(), 1);

        let row = db.get_comment(&uid, &on_post).unwrap().unwrap();
        assert_eq!(row.content, "v2");
        assert_eq!(row.num_likes, 5);
        assert_eq!(row.kind, CommentKind::Comment.as_i64());

        assert_eq!(db.delete_comment(&uid, &on_look).unwrap(), 0);
        assert_eq!(db.delete_comment(&uid, &on_post).unwrap(), 1);
        assert!(db.get_comment(&uid, &on_post).unwrap().is_none());
    }
}
