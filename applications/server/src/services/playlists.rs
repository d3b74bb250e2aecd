/// Playlist operations guarded by the access resolver
use openmusic_core::{
    access::{authenticated, AccessResolver},
    error::Result,
    export::Exporter,
    storage::{ActivityLog, CatalogStore},
    types::{
        ActivityAction, ActivityView, CreatePlaylist, ExportJob, Playlist, PlaylistId,
        PlaylistSongs, PlaylistSummary, SongId, UserId,
    },
    CatalogError,
};
use std::sync::Arc;

/// Every operation takes the request's principal, if any, and fails with
/// `Unauthenticated` before touching the resolver when it is absent.
#[derive(Clone)]
pub struct PlaylistService {
    store: Arc<dyn CatalogStore>,
    activities: Arc<dyn ActivityLog>,
    access: Arc<dyn AccessResolver>,
    exporter: Arc<dyn Exporter>,
}

impl PlaylistService {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        activities: Arc<dyn ActivityLog>,
        access: Arc<dyn AccessResolver>,
        exporter: Arc<dyn Exporter>,
    ) -> Self {
        Self {
            store,
            activities,
            access,
            exporter,
        }
    }

    pub async fn create(&self, principal: Option<&UserId>, name: String) -> Result<Playlist> {
        let owner = authenticated(principal)?;
        self.store
            .create_playlist(CreatePlaylist {
                name,
                owner: owner.clone(),
            })
            .await
    }

    pub async fn list(&self, principal: Option<&UserId>) -> Result<Vec<PlaylistSummary>> {
        let user = authenticated(principal)?;
        self.store.list_playlists_for(user).await
    }

    /// Owner only; the store cascades songs, grants and activities
    pub async fn delete(&self, principal: Option<&UserId>, playlist_id: &PlaylistId) -> Result<()> {
        let user = authenticated(principal)?;
        self.access.require_owner(playlist_id, user).await?;
        self.store.delete_playlist(playlist_id).await
    }

    pub async fn add_song(
        &self,
        principal: Option<&UserId>,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<()> {
        let user = authenticated(principal)?;

        if self.store.get_song(song_id).await?.is_none() {
            return Err(CatalogError::not_found("Song", song_id.as_str()));
        }

        self.access.resolve_access(playlist_id, user).await?;
        self.store.add_song_to_playlist(playlist_id, song_id).await?;
        self.record_activity(playlist_id, song_id, user, ActivityAction::Add)
            .await;
        Ok(())
    }

    pub async fn remove_song(
        &self,
        principal: Option<&UserId>,
        playlist_id: &PlaylistId,
        song_id: &SongId,
    ) -> Result<()> {
        let user = authenticated(principal)?;
        self.access.resolve_access(playlist_id, user).await?;
        self.store
            .remove_song_from_playlist(playlist_id, song_id)
            .await?;
        self.record_activity(playlist_id, song_id, user, ActivityAction::Delete)
            .await;
        Ok(())
    }

    pub async fn songs(
        &self,
        principal: Option<&UserId>,
        playlist_id: &PlaylistId,
    ) -> Result<PlaylistSongs> {
        let user = authenticated(principal)?;
        self.access.resolve_access(playlist_id, user).await?;
        self.store.playlist_songs(playlist_id).await
    }

    pub async fn activities(
        &self,
        principal: Option<&UserId>,
        playlist_id: &PlaylistId,
    ) -> Result<Vec<ActivityView>> {
        let user = authenticated(principal)?;
        self.access.resolve_access(playlist_id, user).await?;
        self.activities.list_by_playlist(playlist_id).await
    }

    /// Owner only; returns the collaboration id
    pub async fn add_collaborator(
        &self,
        principal: Option<&UserId>,
        playlist_id: &PlaylistId,
        collaborator: &UserId,
    ) -> Result<String> {
        let user = authenticated(principal)?;

        if self.store.get_user(collaborator).await?.is_none() {
            return Err(CatalogError::not_found("User", collaborator.as_str()));
        }

        self.access.require_owner(playlist_id, user).await?;
        self.store.add_collaborator(playlist_id, collaborator).await
    }

    pub async fn remove_collaborator(
        &self,
        principal: Option<&UserId>,
        playlist_id: &PlaylistId,
        collaborator: &UserId,
    ) -> Result<()> {
        let user = authenticated(principal)?;
        self.access.require_owner(playlist_id, user).await?;
        self.store
            .remove_collaborator(playlist_id, collaborator)
            .await
    }

    /// Ownership is checked here, inline; the queued job carries no
    /// authorization
    pub async fn request_export(
        &self,
        principal: Option<&UserId>,
        playlist_id: &PlaylistId,
        target_email: &str,
    ) -> Result<()> {
        let user = authenticated(principal)?;
        self.access.require_owner(playlist_id, user).await?;
        self.exporter
            .submit(&ExportJob::new(playlist_id.clone(), target_email))
            .await
    }

    // Best-effort: the membership change already succeeded
    async fn record_activity(
        &self,
        playlist_id: &PlaylistId,
        song_id: &SongId,
        user: &UserId,
        action: ActivityAction,
    ) {
        if let Err(e) = self
            .activities
            .append(playlist_id, song_id, user, action)
            .await
        {
            tracing::warn!(
                playlist_id = %playlist_id,
                song_id = %song_id,
                action = %action,
                error = %e,
                "Failed to append playlist activity"
            );
        }
    }
}
