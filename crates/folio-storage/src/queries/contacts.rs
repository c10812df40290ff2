// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Contact message operations.

use folio_core::{ContactMessage, FolioError, NewContactMessage};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

const INSERT_SQL: &str = "INSERT INTO contact_messages (name, email, subject, message, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5)";

const LIST_SQL: &str = "SELECT id, name, email, subject, message, created_at
     FROM contact_messages
     ORDER BY created_at DESC, id DESC LIMIT ?1";

const COUNT_SQL: &str = "SELECT COUNT(*) FROM contact_messages";

/// Insert a contact submission stamped with the current time. Returns the row id.
pub async fn insert_contact_message(
    db: &Database,
    msg: &NewContactMessage,
) -> Result<i64, FolioError> {
    let msg = msg.clone();
    let created_at = super::now_timestamp();
    db.echo(INSERT_SQL);
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                INSERT_SQL,
                params![msg.name, msg.email, msg.subject, msg.message, created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// The `limit` most recent contact messages, newest first.
pub async fn list_contact_messages(
    db: &Database,
    limit: i64,
) -> Result<Vec<ContactMessage>, FolioError> {
    db.echo(LIST_SQL);
    db.connection()
        .call(move |conn| -> Result<Vec<ContactMessage>, rusqlite::Error> {
            let mut stmt = conn.prepare(LIST_SQL)?;
            let rows = stmt.query_map(params![limit], |row| {
                Ok(ContactMessage {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    subject: row.get(3)?,
                    message: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?;
            let items = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(items)
        })
        .await
        .map_err(map_tr_err)
}

pub async fn count_contact_messages(db: &Database) -> Result<i64, FolioError> {
    db.echo(COUNT_SQL);
    db.connection()
        .call(|conn| -> Result<i64, rusqlite::Error> {
            conn.query_row(COUNT_SQL, [], |row| row.get(0))
        })
        .await
        .map_err(map_tr_err)
}
