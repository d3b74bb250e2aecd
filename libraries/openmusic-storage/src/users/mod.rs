use crate::error::conflict_on_unique;
use openmusic_core::{error::Result, types::*};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

fn from_row(row: &SqliteRow) -> User {
    User {
        id: UserId::new(row.get::<String, _>("id")),
        username: row.get("username"),
        fullname: row.get("fullname"),
    }
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, username, fullname FROM users ORDER BY username")
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(from_row).collect())
}

/// Get user by ID
pub async fn get_by_id(pool: &SqlitePool, id: &UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, username, fullname FROM users WHERE id = ?")
        .bind(id.as_str())
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(from_row))
}

/// Create a user; a taken username is a `Conflict`
pub async fn create(pool: &SqlitePool, user: CreateUser) -> Result<User> {
    let id = UserId::generate();

    sqlx::query("INSERT INTO users (id, username, fullname) VALUES (?, ?, ?)")
        .bind(id.as_str())
        .bind(&user.username)
        .bind(&user.fullname)
        .execute(pool)
        .await
        .map_err(|e| conflict_on_unique(e, "username already taken"))?;

    Ok(User {
        id,
        username: user.username,
        fullname: user.fullname,
    })
}
