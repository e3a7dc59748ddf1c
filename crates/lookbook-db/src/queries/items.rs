use anyhow::Result;
use rusqlite::{OptionalExtension, params};
use tracing::warn;

use super::{Assoc, link};
use crate::models::ItemRow;
use crate::{Database, new_uid};

impl Database {
    /// Insert an item and link it to its owning look in one transaction.
    /// An unknown look uid fails the link and rolls everything back.
    pub fn create_item(
        &self,
        look_uid: &str,
        title: &str,
        images: &[String],
    ) -> Result<Option<String>> {
        let images_json = serde_json::to_string(images)?;

        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            let uid = new_uid();

            tx.execute(
                "INSERT INTO items (uid, title, images) VALUES (?1, ?2, ?3)",
                params![uid, title, images_json],
            )?;

            if !link(&tx, Assoc::LookItems, look_uid, &uid)? {
                return Ok(None);
            }

            tx.commit()?;
            Ok(Some(uid))
        })
    }

    /// Look-scoped fetch; the owning look uid plays the owner role here.
    pub fn get_item(&self, item_uid: &str, look_uid: &str) -> Result<Option<ItemRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT i.uid, i.title, i.images, i.created_at, i.updated_at
                 FROM items i
                 JOIN look_items li ON li.item_uid = i.uid
                 WHERE i.uid = ?1 AND li.look_uid = ?2",
            )?;

            let row = stmt
                .query_row(params![item_uid, look_uid], item_from_row)
                .optional()?;
            Ok(row)
        })
    }

    pub fn list_look_items(&self, look_uid: &str) -> Result<Vec<ItemRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT i.uid, i.title, i.images, i.created_at, i.updated_at
                 FROM items i
                 JOIN look_items li ON li.item_uid = i.uid
                 WHERE li.look_uid = ?1",
            )?;

            let rows = stmt
                .query_map([look_uid], item_from_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn update_item(
        &self,
        item_uid: &str,
        look_uid: &str,
        title: &str,
        images: &[String],
    ) -> Result<usize> {
        let images_json = serde_json::to_string(images)?;

        self.with_conn(|conn| {
            let n = conn.execute(
                "UPDATE items
                 SET title = ?1, images = ?2, updated_at = datetime('now')
                 WHERE uid = ?3
                   AND uid IN (SELECT item_uid FROM look_items WHERE look_uid = ?4)",
                params![title, images_json, item_uid, look_uid],
            )?;
            Ok(n)
        })
    }

    pub fn delete_item(&self, item_uid: &str, look_uid: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let n = conn.execute(
                "DELETE FROM items
                 WHERE uid = ?1
                   AND uid IN (SELECT item_uid FROM look_items WHERE look_uid = ?2)",
                params![item_uid, look_uid],
            )?;
            Ok(n)
        })
    }
}

fn item_from_row(row: &rusqlite::Row) -> rusqlite::Result<ItemRow> {
    let uid: String = row.get(0)?;
    let raw_images: String = row.get(2)?;
    let images = serde_json::from_str(&raw_images).unwrap_or_else(|e| {
        warn!("Corrupt images column on item '{}': {}", uid, e);
        Vec::new()
    });

    Ok(ItemRow {
        uid,
        title: row.get(1)?,
        images,
        created_at: row.get(3)?,
        updated_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{seed_user, test_db};
    use lookbook_types::models::Privacy;

    fn seed_look(db: &crate::Database) -> String {
        let user = seed_user(db, "a@x.com");
        db.create_look(&user.uid, "fits", Privacy::Public, 0, 0, 0, 0)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn create_then_get_roundtrips_images() {
        let db = test_db();
        let look_uid = seed_look(&db);

        let images = vec!["https://img/1.jpg".to_string(), "https://img/2.jpg".to_string()];
        let uid = db.create_item(&look_uid, "jacket", &images).unwrap().unwrap();

        let item = db.get_item(&uid, &look_uid).unwrap().unwrap();
        assert_eq!(item.title, "jacket");
        assert_eq!(item.images, images);
    }

    #[test]
    fn create_under_unknown_look_rolls_back() {
        let db = test_db();

        let res = db.create_item("no-such-look", "jacket", &[]).unwrap();
        assert!(res.is_none());

        let count: i64 = db
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM items", [], |r| r.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn item_operations_are_scoped_to_owning_look() {
        let db = test_db();
        let user = seed_user(&db, "a@x.com");
        let look_a = db
            .create_look(&user.uid, "a", Privacy::Public, 0, 0, 0, 0)
            .unwrap()
            .unwrap();
        let look_b = db
            .create_look(&user.uid, "b", Privacy::Public, 0, 0, 0, 0)
            .unwrap()
            .unwrap();

        let uid = db.create_item(&look_a, "boots", &[]).unwrap().unwrap();

        assert!(db.get_item(&uid, &look_b).unwrap().is_none());
        assert_eq!(db.update_item(&uid, &look_b, "x", &[]).unwrap(), 0);
        assert_eq!(db.delete_item(&uid, &look_b).unwrap(), 0);

        assert_eq!(db.update_item(&uid, &look_a, "boots v2", &[]).unwrap(), 1);
        assert_eq!(db.delete_item(&uid, &look_a).unwrap(), 1);
        assert!(db.get_item(&uid, &look_a).unwrap().is_none());
    }

    #[test]
    fn list_returns_items_of_one_look() {
        let db = test_db();
        let look_uid = seed_look(&db);

        db.create_item(&look_uid, "one", &[]).unwrap().unwrap();
        db.create_item(&look_uid, "two", &[]).unwrap().unwrap();

        let items = db.list_look_items(&look_uid).unwrap();
        assert_eq!(items.len(), 2);
    }
}
