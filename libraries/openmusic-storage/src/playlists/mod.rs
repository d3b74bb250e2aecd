use openmusic_core::{error::Result, types::*, CatalogError};
use sqlx::{Row, SqlitePool};

/// Create new playlist
pub async fn create(pool: &SqlitePool, playlist: CreatePlaylist) -> Result<Playlist> {
    let id = PlaylistId::generate();

    sqlx::query("INSERT INTO playlists (id, name, owner) VALUES (?, ?, ?)")
        .bind(id.as_str())
        .bind(&playlist.name)
        .bind(playlist.owner.as_str())
        .execute(pool)
        .await?;

    Ok(Playlist {
        id,
        name: playlist.name,
        owner: playlist.owner,
    })
}

/// Owner of a playlist, `None` if it does not exist
pub async fn get_owner(pool: &SqlitePool, id: &PlaylistId) -> Result<Option<UserId>> {
    let row = sqlx::query("SELECT owner FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| UserId::new(row.get::<String, _>("owner"))))
}

/// Get user's playlists (owned + shared with them)
pub async fn get_user_playlists(
    pool: &SqlitePool,
    user_id: &UserId,
) -> Result<Vec<PlaylistSummary>> {
    let rows = sqlx::query(
        r#"
        SELECT DISTINCT p.id, p.name, u.username
        FROM playlists p
        INNER JOIN users u ON u.id = p.owner
        LEFT JOIN collaborations c ON c.playlist_id = p.id
        WHERE p.owner = ? OR c.user_id = ?
        ORDER BY p.name, p.id
        "#,
    )
    .bind(user_id.as_str())
    .bind(user_id.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| PlaylistSummary {
            id: PlaylistId::new(row.get::<String, _>("id")),
            name: row.get("name"),
            username: row.get("username"),
        })
        .collect())
}

/// Delete playlist; songs, collaborations and activities cascade
pub async fn delete(pool: &SqlitePool, id: &PlaylistId) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = ?")
        .bind(id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::invariant(format!(
            "failed to delete playlist {id}"
        )));
    }

    Ok(())
}

/// Add song to playlist (no-op if already a member)
pub async fn add_song(pool: &SqlitePool, playlist_id: &PlaylistId, song_id: &SongId) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO playlist_songs (playlist_id, song_id)
        VALUES (?, ?)
        ON CONFLICT(playlist_id, song_id) DO NOTHING
        "#,
    )
    .bind(playlist_id.as_str())
    .bind(song_id.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// Remove song from playlist
pub async fn remove_song(
    pool: &SqlitePool,
    playlist_id: &PlaylistId,
    song_id: &SongId,
) -> Result<()> {
    let result = sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?")
        .bind(playlist_id.as_str())
        .bind(song_id.as_str())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CatalogError::invariant(format!(
            "song {song_id} is not in playlist {playlist_id}"
        )));
    }

    Ok(())
}

/// Playlist with its songs, in the order they were added
pub async fn get_with_songs(pool: &SqlitePool, id: &PlaylistId) -> Result<PlaylistSongs> {
    // Both reads see the same snapshot
    let mut tx = pool.begin().await?;

    let playlist = sqlx::query(
        r#"
        SELECT p.id, p.name, u.username
        FROM playlists p
        INNER JOIN users u ON u.id = p.owner
        WHERE p.id = ?
        "#,
    )
    .bind(id.as_str())
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| CatalogError::not_found("Playlist", id.as_str()))?;

    let songs = sqlx::query(
        r#"
        SELECT s.id, s.title, s.performer
        FROM playlist_songs ps
        INNER JOIN songs s ON s.id = ps.song_id
        WHERE ps.playlist_id = ?
        ORDER BY ps.id
        "#,
    )
    .bind(id.as_str())
    .fetch_all(&mut *tx)
    .await?
    .into_iter()
    .map(|row| SongSummary {
        id: SongId::new(row.get::<String, _>("id")),
        title: row.get("title"),
        performer: row.get("performer"),
    })
    .collect();

    tx.commit().await?;

    Ok(PlaylistSongs {
        id: PlaylistId::new(playlist.get::<String, _>("id")),
        name: playlist.get("name"),
        username: playlist.get("username"),
        songs,
    })
}
