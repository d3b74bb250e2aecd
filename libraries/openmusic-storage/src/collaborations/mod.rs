use crate::error::conflict_on_unique;
use openmusic_core::{error::Result, types::*, CatalogError};
use sqlx::SqlitePool;

/// Grant a user collaboration on a playlist, returning the collaboration id
pub async fn add(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<String> {
    let id = Collaboration::generate_id();

    sqlx::query("INSERT INTO collaborations (id, playlist_id, user_id) VALUES (?, ?, ?)")
        .bind(&id)
        .bind(playlist_id.as_str())
        .bind(user_id.as_str())
        .execute(pool)
        .await
        .map_err(|e| conflict_on_unique(e, "user already collaborates on this playlist"))?;

    Ok(id)
}

/// Revoke a collaboration grant
pub async fn remove(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<()> {
    let result = sqlx::query("DELETE FROM collaborations WHERE playlist_id = ? AND user_id = ?")
        .bind(playlist_id.as_str())
        .bind(user_id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::invariant(format!(
            "no collaboration for user {user_id} on playlist {playlist_id}"
        )));
    }

    Ok(())
}

/// Whether an active grant exists for the pair
pub async fn exists(pool: &SqlitePool, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM collaborations WHERE playlist_id = ? AND user_id = ?")
        .bind(playlist_id.as_str())
        .bind(user_id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}
