/// Playlists API routes
use super::ApiResponse;
use crate::{
    error::{Result, ServerError},
    middleware::Principal,
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use openmusic_core::{
    access::authenticated,
    types::{ActivityAction, PlaylistId, PlaylistSongs, PlaylistSummary, SongId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRequest {
    pub song_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedPlaylist {
    pub playlist_id: PlaylistId,
}

#[derive(Debug, Serialize)]
pub struct PlaylistList {
    pub playlists: Vec<PlaylistSummary>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistDetail {
    pub playlist: PlaylistSongs,
}

#[derive(Debug, Serialize)]
pub struct ActivityItem {
    pub username: String,
    pub title: String,
    pub action: ActivityAction,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistActivities {
    pub playlist_id: PlaylistId,
    pub activities: Vec<ActivityItem>,
}

/// POST /playlists
pub async fn create_playlist(
    State(app_state): State<AppState>,
    principal: Principal,
    payload: std::result::Result<Json<CreatePlaylistRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedPlaylist>>)> {
    authenticated(principal.user_id())?;
    let Json(req) = payload?;

    let name = req.name.trim();
    if name.is_empty() {
        return Err(ServerError::BadRequest(
            "playlist name must not be empty".to_string(),
        ));
    }

    let playlist = app_state
        .playlists
        .create(principal.user_id(), name.to_string())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(CreatedPlaylist {
            playlist_id: playlist.id,
        })),
    ))
}

/// GET /playlists
/// Playlists the principal owns or collaborates on
pub async fn list_playlists(
    State(app_state): State<AppState>,
    principal: Principal,
) -> Result<Json<ApiResponse<PlaylistList>>> {
    let playlists = app_state.playlists.list(principal.user_id()).await?;
    Ok(Json(ApiResponse::data(PlaylistList { playlists })))
}

/// DELETE /playlists/:id
pub async fn delete_playlist(
    State(app_state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    app_state
        .playlists
        .delete(principal.user_id(), &PlaylistId::new(id))
        .await?;
    Ok(Json(ApiResponse::message("Playlist deleted")))
}

/// POST /playlists/:id/songs
pub async fn add_song(
    State(app_state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    payload: std::result::Result<Json<SongRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<()>>)> {
    authenticated(principal.user_id())?;
    let Json(req) = payload?;

    app_state
        .playlists
        .add_song(
            principal.user_id(),
            &PlaylistId::new(id),
            &SongId::new(req.song_id),
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("Song added to playlist")),
    ))
}

/// GET /playlists/:id/songs
pub async fn get_songs(
    State(app_state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PlaylistDetail>>> {
    let playlist = app_state
        .playlists
        .songs(principal.user_id(), &PlaylistId::new(id))
        .await?;
    Ok(Json(ApiResponse::data(PlaylistDetail { playlist })))
}

/// DELETE /playlists/:id/songs
pub async fn remove_song(
    State(app_state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    payload: std::result::Result<Json<SongRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>> {
    authenticated(principal.user_id())?;
    let Json(req) = payload?;

    app_state
        .playlists
        .remove_song(
            principal.user_id(),
            &PlaylistId::new(id),
            &SongId::new(req.song_id),
        )
        .await?;
    Ok(Json(ApiResponse::message("Song removed from playlist")))
}

/// GET /playlists/:id/activities
pub async fn get_activities(
    State(app_state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PlaylistActivities>>> {
    let playlist_id = PlaylistId::new(id);
    let activities = app_state
        .playlists
        .activities(principal.user_id(), &playlist_id)
        .await?
        .into_iter()
        .map(|view| ActivityItem {
            username: view.username,
            title: view.title,
            action: view.action,
            time: view.time,
        })
        .collect();

    Ok(Json(ApiResponse::data(PlaylistActivities {
        playlist_id,
        activities,
    })))
}
