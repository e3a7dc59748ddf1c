use anyhow::Result;
use lookbook_types::models::Privacy;
use rusqlite::{OptionalExtension, params};

use super::{Assoc, link};
use crate::models::LookRow;
use crate::{Database, new_uid};

impl Database {
    /// Insert a look and its owning association in one transaction, same
    /// contract as `create_post`.
    pub fn create_look(
        &self,
        user_uid: &str,
        title: &str,
        privacy: Privacy,
        num_items: i64,
        num_likes: i64,
        num_comments: i64,
        num_shares: i64,
    ) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            let uid = new_uid();

            tx.execute(
                "INSERT INTO looks (uid, title, privacy, num_items, num_likes, num_comments, num_shares)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![uid, title, privacy.as_i64(), num_items, num_likes, num_comments, num_shares],
            )?;

            if !link(&tx, Assoc::UserLooks, user_uid, &uid)? {
                return Ok(None);
            }

            tx.commit()?;
            Ok(Some(uid))
        })
    }

    pub fn get_look(&self, look_uid: &str, user_uid: &str) -> Result<Option<LookRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT l.uid, l.title, l.privacy, l.num_items, l.num_likes, l.num_comments,
                        l.num_shares, l.created_at, l.updated_at
                 FROM looks l
                 JOIN user_looks ul ON ul.look_uid = l.uid
                 WHERE l.uid = ?1 AND ul.user_uid = ?2",
            )?;

            let row = stmt
                .query_row(params![look_uid, user_uid], look_from_row)
                .optional()?;
            Ok(row)
        })
    }

    pub fn list_user_looks(&self, user_uid: &str) -> Result<Vec<LookRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT l.uid, l.title, l.privacy, l.num_items, l.num_likes, l.num_comments,
                        l.num_shares, l.created_at, l.updated_at
                 FROM looks l
                 JOIN user_looks ul ON ul.look_uid = l.uid
                 WHERE ul.user_uid = ?1",
            )?;

            let rows = stmt
                .query_map([user_uid], look_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_look(
        &self,
        look_uid: &str,
        user_uid: &str,
        title: &str,
        privacy: Privacy,
        num_items: i64,
        num_likes: i64,
        num_comments: i64,
        num_shares: i64,
    ) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE looks
                 SET title = ?1, privacy = ?2, num_items = ?3, num_likes = ?4,
                     num_comments = ?5, num_shares = ?6, updated_at = datetime('now')
                 WHERE uid = ?7
                   AND uid IN (SELECT look_uid FROM user_looks WHERE user_uid = ?8)",
                params![
                    title,
                    privacy.as_i64(),
                    num_items,
                    num_likes,
                    num_comments,
                    num_shares,
                    look_uid,
                    user_uid
                ],
            )?;
            Ok(n)
        })
    }

    pub fn delete_look(&self, look_uid: &str, user_uid: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "DELETE FROM looks
                 WHERE uid = ?1
                   AND uid IN (SELECT look_uid FROM user_looks WHERE user_uid = ?2)",
                params![look_uid, user_uid],
            )?;
            Ok(n)
        })
    }
}

fn look_from_row(row: &rusqlite::Row) -> rusqlite::Result<LookRow> {
    Ok(LookRow {
        uid: row.get(0)?,
        title: row.get(1)?,
        privacy: row.get(2)?,
        num_items: row.get(3)?,
        num_likes: row.get(4)?,
        num_comments: row.get(5)?,
        num_shares: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
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
            .create_look(&user.uid, "summer", Privacy::Public, 4, 10, 2, 1)
            .unwrap()
            .unwrap();

        let look = db.get_look(&uid, &user.uid).unwrap().unwrap();
        assert_eq!(look.title, "summer");
        assert_eq!(look.num_items, 4);
        assert_eq!(look.num_likes, 10);
    }

    #[test]
    fn update_and_delete_are_owner_scoped() {
        let db = test_db();
        let alice = seed_user(&db, "a@x.com");
        let bob = seed_user(&db, "b@x.com");

        let uid = db
            .create_look(&alice.uid, "v1", Privacy::Private, 0, 0, 0, 0)
            .unwrap()
            .unwrap();

        assert_eq!(
            db.update_look(&uid, &bob.uid, "v2", Privacy::Public, 0, 0, 0, 0)
                .unwrap(),
            0
        );
        assert_eq!(
            db.update_look(&uid, &alice.uid, "v2", Privacy::Public, 1, 0, 0, 0)
                .unwrap(),
            1
        );

        assert_eq!(db.delete_look(&uid, &bob.uid).unwrap(), 0);
        assert_eq!(db.delete_look(&uid, &alice.uid).unwrap(), 1);
        assert!(db.get_look(&uid, &alice.uid).unwrap().is_none());
    }

    #[test]
    fn list_is_per_user() {
        let db = test_db();
        let alice = seed_user(&db, "a@x.com");
        let bob = seed_user(&db, "b@x.com");

        db.create_look(&alice.uid, "mine", Privacy::Public, 0, 0, 0, 0)
            .unwrap()
            .unwrap();

        assert_eq!(db.list_user_looks(&alice.uid).unwrap().len(), 1);
        assert!(db.list_user_looks(&bob.uid).unwrap().is_empty());
    }
}
