use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

use super::is_constraint_violation;
use crate::models::{RegisteredUser, UserRow};
use crate::{Database, StoreError, new_uid};

impl Database {
    /// Create a user with a fresh uid and API token. Fails with
    /// `StoreError::DuplicateCredential` when the email is already
    /// registered; the UNIQUE constraints on email and api_token are the
    /// backstop for concurrent registrations.
    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<RegisteredUser> {
        self.with_conn(|conn| {
            if email_exists(conn, email)? {
                return Err(StoreError::DuplicateCredential.into());
            }

            let uid = new_uid();
            let api_token = new_uid();

            match conn.execute(
                "INSERT INTO users (uid, name, email, password_hash, api_token, status)
                 VALUES (?1, ?2, ?3, ?4, ?5, 1)",
                params![uid, name, email, password_hash, api_token],
            ) {
                Ok(_) => Ok(RegisteredUser { uid, api_token }),
                Err(e) if is_constraint_violation(&e) => {
                    Err(StoreError::DuplicateCredential.into())
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT uid, name, email, password_hash, api_token, status,
                        birthday, location, about, created_at, updated_at
                 FROM users WHERE email = ?1",
            )?;

            let row = stmt
                .query_row([email], |row| {
                    Ok(UserRow {
                        uid: row.get(0)?,
                        name: row.get(1)?,
                        email: row.get(2)?,
                        password_hash: row.get(3)?,
                        api_token: row.get(4)?,
                        status: row.get(5)?,
                        birthday: row.get(6)?,
                        location: row.get(7)?,
                        about: row.get(8)?,
                        created_at: row.get(9)?,
                        updated_at: row.get(10)?,
                    })
                })
                .optional()?;

            Ok(row)
        })
    }

    /// Resolve an API token to its owning user's uid. One lookup; a miss
    /// means the token is not registered.
    pub fn find_uid_by_token(&self, api_token: &str) -> Result<Option<String>> {
        self.with_conn(|conn| {
            let uid = conn
                .query_row(
                    "SELECT uid FROM users WHERE api_token = ?1",
                    [api_token],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(uid)
        })
    }
}

fn email_exists(conn: &Connection, email: &str) -> Result<bool> {
    let hit: Option<i64> = conn
        .query_row("SELECT 1 FROM users WHERE email = ?1", [email], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(hit.is_some())
}
