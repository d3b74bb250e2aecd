//! Append-only playlist activity log

use openmusic_core::{error::Result, types::*, CatalogError};
use sqlx::{Row, SqlitePool};

/// Append an entry with its own timestamp
pub async fn append(pool: &SqlitePool, entry: &ActivityEntry) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO playlist_song_activities (playlist_id, song_id, user_id, action, time)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(entry.playlist_id.as_str())
    .bind(entry.song_id.as_str())
    .bind(entry.user_id.as_str())
    .bind(entry.action.as_str())
    .bind(entry.time.timestamp_millis())
    .execute(pool)
    .await?;

    Ok(())
}

/// Entries for a playlist resolved to username and song title,
/// ascending by time with ties in insertion order
pub async fn list_by_playlist(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
) -> Result<Vec<ActivityView>> {
    let rows = sqlx::query(
        r#"
        SELECT u.username, s.title, a.action, a.time
        FROM playlist_song_activities a
        INNER JOIN users u ON u.id = a.user_id
        INNER JOIN songs s ON s.id = a.song_id
        WHERE a.playlist_id = ?
        ORDER BY a.time ASC, a.seq ASC
        "#,
    )
    .bind(playlist_id.as_str())
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            let action: String = row.get("action");
            let millis: i64 = row.get("time");

            Ok(ActivityView {
                username: row.get("username"),
                title: row.get("title"),
                action: ActivityAction::parse(&action).ok_or_else(|| {
                    CatalogError::storage(format!("unknown activity action: {action}"))
                })?,
                time: chrono::DateTime::from_timestamp_millis(millis).ok_or_else(|| {
                    CatalogError::storage(format!("invalid activity timestamp: {millis}"))
                })?,
            })
        })
        .collect()
}
