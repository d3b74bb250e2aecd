//! Album like grants, the source of truth behind the cached like count

use crate::error::conflict_on_unique;
use openmusic_core::{error::Result, types::*, CatalogError};
use sqlx::{Row, SqlitePool};

/// Record a like; the unique (user, album) pair rejects duplicates
pub async fn add(pool: &SqlitePool, user_id: &UserId, album_id: &AlbumId) -> Result<()> {
    sqlx::query("INSERT INTO user_album_likes (user_id, album_id) VALUES (?, ?)")
        .bind(user_id.as_str())
        .bind(album_id.as_str())
        .execute(pool)
        .await
        .map_err(|e| conflict_on_unique(e, "album already liked"))?;

    Ok(())
}

/// Remove a like
pub async fn remove(pool: &SqlitePool, user_id: &UserId, album_id: &AlbumId) -> Result<()> {
    let result = sqlx::query("DELETE FROM user_album_likes WHERE user_id = ? AND album_id = ?")
        .bind(user_id.as_str())
        .bind(album_id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::invariant("failed to remove like: no such like"));
    }

    Ok(())
}

/// Count likes for an album
pub async fn count(pool: &SqlitePool, album_id: &AlbumId) -> Result<u64> {
    let row = sqlx::query("SELECT COUNT(*) AS likes FROM user_album_likes WHERE album_id = ?")
        .bind(album_id.as_str())
        .fetch_one(pool)
        .await?;

    Ok(row.get::<i64, _>("likes") as u64)
}
