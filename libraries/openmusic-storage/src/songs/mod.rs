use openmusic_core::{error::Result, types::*};
use sqlx::{Row, SqlitePool};

/// Get song by ID
pub async fn get_by_id(pool: &SqlitePool, id: &SongId) -> Result<Option<Song>> {
    let row = sqlx::query(
        r#"
        SELECT id, title, year, performer, genre, duration, album_id
        FROM songs
        WHERE id = ?
        "#,
    )
    .bind(id.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| Song {
        id: SongId::new(row.get::<String, _>("id")),
        title: row.get("title"),
        year: row.get("year"),
        performer: row.get("performer"),
        genre: row.get("genre"),
        duration: row.get("duration"),
        album_id: row.get::<Option<String>, _>("album_id").map(AlbumId::new),
    }))
}

/// Whether a song exists
pub async fn exists(pool: &SqlitePool, id: &SongId) -> Result<bool> {
    let row = sqlx::query("SELECT 1 FROM songs WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

/// Create new song
pub async fn create(pool: &SqlitePool, song: CreateSong) -> Result<Song> {
    let id = SongId::generate();

    sqlx::query(
        r#"
        INSERT INTO songs (id, title, year, performer, genre, duration, album_id)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.as_str())
    .bind(&song.title)
    .bind(song.year)
    .bind(&song.performer)
    .bind(&song.genre)
    .bind(song.duration)
    .bind(song.album_id.as_ref().map(AlbumId::as_str))
    .execute(pool)
    .await?;

    Ok(Song {
        id,
        title: song.title,
        year: song.year,
        performer: song.performer,
        genre: song.genre,
        duration: song.duration,
        album_id: song.album_id,
    })
}
