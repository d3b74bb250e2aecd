//! Store boundary traits
//!
//! Implemented by `openmusic-storage`. Referential cleanup on playlist delete
//! is the store's job.

use crate::error::Result;
use crate::types::{
    ActivityAction, ActivityView, Album, AlbumId, CreateAlbum, CreatePlaylist, CreateSong,
    CreateUser, Playlist, PlaylistId, PlaylistSongs, PlaylistSummary, Song, SongId, User, UserId,
};
use async_trait::async_trait;

/// Authoritative relational store for the catalog
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // Users
    async fn create_user(&self, user: CreateUser) -> Result<User>;
    async fn get_user(&self, id: &UserId) -> Result<Option<User>>;
    async fn list_users(&self) -> Result<Vec<User>>;

    // Songs and albums
    async fn create_song(&self, song: CreateSong) -> Result<Song>;
    async fn get_song(&self, id: &SongId) -> Result<Option<Song>>;
    async fn create_album(&self, album: CreateAlbum) -> Result<Album>;
    async fn get_album(&self, id: &AlbumId) -> Result<Option<Album>>;

    // Playlists
    async fn create_playlist(&self, playlist: CreatePlaylist) -> Result<Playlist>;
    /// Owner of the playlist, `None` when it does not exist
    async fn playlist_owner(&self, id: &PlaylistId) -> Result<Option<UserId>>;
    /// Playlists owned by or shared with the user
    async fn list_playlists_for(&self, user_id: &UserId) -> Result<Vec<PlaylistSummary>>;
    /// Fails with `InvariantViolation` when nothing was deleted
    async fn delete_playlist(&self, id: &PlaylistId) -> Result<()>;
    /// Set semantics: re-adding a member is a no-op
    async fn add_song_to_playlist(&self, playlist_id: &PlaylistId, song_id: &SongId)
        -> Result<()>;
    /// Fails with `InvariantViolation` when the song was not a member
    async fn remove_song_from_playlist(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<()>;
    /// Playlist and its songs; `NotFound` when the playlist does not exist
    async fn playlist_songs(&self, id: &PlaylistId) -> Result<PlaylistSongs>;

    // Collaborations
    /// Fails with `Conflict` on a duplicate grant; returns the collaboration id
    async fn add_collaborator(&self, playlist_id: &PlaylistId, user_id: &UserId)
        -> Result<String>;
    /// Fails with `InvariantViolation` when no grant existed
    async fn remove_collaborator(&self, playlist_id: &PlaylistId, user_id: &UserId)
        -> Result<()>;
    async fn is_collaborator(&self, playlist_id: &PlaylistId, user_id: &UserId) -> Result<bool>;

    // Album likes
    /// Fails with `Conflict` when the user already likes the album
    async fn add_like(&self, user_id: &UserId, album_id: &AlbumId) -> Result<()>;
    /// Fails with `InvariantViolation` when no like existed
    async fn remove_like(&self, user_id: &UserId, album_id: &AlbumId) -> Result<()>;
    async fn count_likes(&self, album_id: &AlbumId) -> Result<u64>;
}

/// Append-only record of playlist membership mutations
#[async_trait]
pub trait ActivityLog: Send + Sync {
    async fn append(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user_id: &UserId,
        action: ActivityAction,
    ) -> Result<()>;

    /// Ascending by time, ties in insertion order
    async fn list_by_playlist(&self, playlist_id: &PlaylistId) -> Result<Vec<ActivityView>>;
}
