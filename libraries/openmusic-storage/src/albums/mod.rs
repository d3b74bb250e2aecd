use openmusic_core::{error::Result, types::*};
use sqlx::{Row, SqlitePool};

/// Get album by ID
pub async fn get_by_id(pool: &SqlitePool, id: &AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query("SELECT id, name, year FROM albums WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| Album {
        id: AlbumId::new(row.get::<String, _>("id")),
        name: row.get("name"),
        year: row.get("year"),
    }))
}

/// Create new album
pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<Album> {
    let id = AlbumId::generate();

    sqlx::query("INSERT INTO albums (id, name, year) VALUES (?, ?, ?)")
        .bind(id.as_str())
        .bind(&album.name)
        .bind(album.year)
        .execute(pool)
        .await?;

    Ok(Album {
        id,
        name: album.name,
        year: album.year,
    })
}
