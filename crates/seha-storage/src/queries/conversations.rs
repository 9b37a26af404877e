// SPDX-FileCopyrightText: 2026 Seha Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Whole-blob reads and writes on the `conversations` table.

use rusqlite::{params, OptionalExtension};
use seha_core::SehaError;

use crate::database::{map_tr_err, Database};

/// Fetch the raw JSON blob stored for `user_id`.
pub async fn get_state(db: &Database, user_id: &str) -> Result<Option<String>, SehaError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT state FROM conversations WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or overwrite the blob for `user_id`.
pub async fn put_state(
    db: &Database,
    user_id: &str,
    state: String,
    updated_at: String,
) -> Result<(), SehaError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversations (user_id, state, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id) DO UPDATE SET state = excluded.state, updated_at = excluded.updated_at",
                params![user_id, state, updated_at],
            )?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)
}

/// Whether a row exists for `user_id`.
pub async fn has_state(db: &Database, user_id: &str) -> Result<bool, SehaError> {
    let user_id = user_id.to_string();
    db.connection()
        .call(move |conn| {
            conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM conversations WHERE user_id = ?1)",
                params![user_id],
                |row| row.get(0),
            )
        })
        .await
        .map_err(map_tr_err)
}
