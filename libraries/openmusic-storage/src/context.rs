use crate::{activities, albums, collaborations, likes, playlists, songs, users};
use async_trait::async_trait;
use openmusic_core::{
    error::Result,
    storage::{ActivityLog, CatalogStore},
    types::*,
};
use sqlx::SqlitePool;

/// Catalog store over a shared `SQLite` pool
#[derive(Clone)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for SqliteCatalog {
    // Users
    async fn create_user(&self, user: CreateUser) -> Result<User> {
        users::create(&self.pool, user).await
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<User>> {
        users::get_by_id(&self.pool, id).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        users::get_all(&self.pool).await
    }

    // Songs and albums
    async fn create_song(&self, song: CreateSong) -> Result<Song> {
        songs::create(&self.pool, song).await
    }

    async fn get_song(&self, id: &SongId) -> Result<Option<Song>> {
        songs::get_by_id(&self.pool, id).await
    }

    async fn create_album(&self, album: CreateAlbum) -> Result<Album> {
        albums::create(&self.pool, album).await
    }

    async fn get_album(&self, id: &AlbumId) -> Result<Option<Album>> {
        albums::get_by_id(&self.pool, id).await
    }

    // Playlists
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist> {
        playlists::create(&self.pool, playlist).await
    }

    async fn playlist_owner(&self, id: &PlaylistId) -> Result<Option<UserId>> {
        playlists::get_owner(&self.pool, id).await
    }

    async fn list_playlists_for(&self, user_id: &UserId) -> Result<Vec<PlaylistSummary>> {
        playlists::get_user_playlists(&self.pool, user_id).await
    }

    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()> {
        playlists::delete(&self.pool, id).await
    }

    async fn add_song_to_playlist(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<()> {
        playlists::add_song(&self.pool, playlist_id, song_id).await
    }

    async fn remove_song_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<()> {
        playlists::remove_song(&self.pool, playlist_id, song_id).await
    }

    async fn playlist_songs(&self, id: &PlaylistId) -> Result<PlaylistSongs> {
        playlists::get_with_songs(&self.pool, id).await
    }

    // Collaborations
    async fn add_collaborator(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<String> {
        collaborations::add(&self.pool, playlist_id, user_id).await
    }

    async fn remove_collaborator(
        &self,
        playlist_id: &PlaylistId,
        user_id: &UserId,
    ) -> Result<()> {
        collaborations::remove(&self.pool, playlist_id, user_id).await
    }

    async fn is_collaborator(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool> {
        collaborations::exists(&self.pool, playlist_id, user_id).await
    }

    // Album likes
    async fn add_like(&self, user_id: &UserId, album_id: &AlbumId) -> Result<()> {
        likes::add(&self.pool, user_id, album_id).await
    }

    async fn remove_like(&self, user_id: &UserId, album_id: &AlbumId) -> Result<()> {
        likes::remove(&self.pool, user_id, album_id).await
    }

    async fn count_likes(&self, album_id: &AlbumId) -> Result<u64> {
        likes::count(&self.pool, album_id).await
    }
}

#[async_trait]
impl ActivityLog for SqliteCatalog {
    async fn append(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
        action: ActivityAction,
    ) -> Result<()> {
        let entry = ActivityEntry::now(
            playlist_id.clone(),
            song_id.clone(),
            user_id.clone(),
            action,
        );
        activities::append(&self.pool, &entry).await
    }

    async fn list_by_playlist(&self, playlist_id: &PlaylistId) -> Result<Vec<ActivityView>> {
        activities::list_by_playlist(&self.pool, playlist_id).await
    }
}
