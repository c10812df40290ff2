// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound email operations.

use folio_core::{FolioError, InboundEmail, NewInboundEmail};
use rusqlite::params;

use crate::database::{Database, map_tr_err};

const INSERT_SQL: &str = "INSERT INTO inbound_emails
     (from_email, to_email, subject, text_content, html_content, received_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

const LIST_SQL: &str = "SELECT id, from_email, to_email, subject, text_content, html_content, received_at
     FROM inbound_emails
     ORDER BY received_at DESC, id DESC LIMIT ?1";

const COUNT_SQL: &str = "SELECT COUNT(*) FROM inbound_emails";

/// Insert an inbound email stamped with the current time. Returns the row id.
pub async fn insert_inbound_email(
    db: &Database,
    email: &NewInboundEmail,
) -> Result<i64, FolioError> {
    let email = email.clone();
    let received_at = super::now_timestamp();
    db.echo(INSERT_SQL);
    db.connection()
        .call(move |conn| -> Result<i64, rusqlite::Error> {
            conn.execute(
                INSERT_SQL,
                params![
                    email.from_email,
                    email.to_email,
                    email.subject,
                    email.text_content,
                    email.html_content,
                    received_at,
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(map_tr_err)
}

/// The `limit` most recently received emails, newest first.
pub async fn list_inbound_emails(
    db: &Database,
    limit: i64,
) -> Result<Vec<InboundEmail>, FolioError> {
    db.echo(LIST_SQL);
    db.connection()
        .call(move |conn| -> Result<Vec<InboundEmail>, rusqlite::Error> {
            let mut stmt = conn.prepare(LIST_SQL)?;
            let rows = stmt.query_map(params![limit], |row| {
                Ok(InboundEmail {
                    id: row.get(0)?,
                    from_email: row.get(1)?,
                    to_email: row.get(2)?,
                    subject: row.get(3)?,
                    text_content: row.get(4)?,
                    html_content: row.get(5)?,
                    received_at: row.get(6)?,
                })
            })?;
            let items = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(items)
        })
        .await
        .map_err(map_tr_err)
}

pub async fn count_inbound_emails(db: &Database) -> Result<i64, FolioError> {
    db.echo(COUNT_SQL);
    db.connection()
        .call(|conn| -> Result<i64, rusqlite::Error> {
            conn.query_row(COUNT_SQL, [], |row| row.get(0))
        })
        .await
        .map_err(map_tr_err)
}
