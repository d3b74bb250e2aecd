/// Collaboration API routes
use super::ApiResponse;
use crate::{error::Result, middleware::Principal, state::AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use openmusic_core::{
    access::authenticated,
    types::{PlaylistId, UserId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationRequest {
    pub playlist_id: String,
    pub user_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCollaboration {
    pub collaboration_id: String,
}

/// POST /collaborations
pub async fn add_collaborator(
    State(app_state): State<AppState>,
    principal: Principal,
    payload: std::result::Result<Json<CollaborationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedCollaboration>>)> {
    authenticated(principal.user_id())?;
    let Json(req) = payload?;

    let collaboration_id = app_state
        .playlists
        .add_collaborator(
            principal.user_id(),
            &PlaylistId::new(req.playlist_id),
            &UserId::new(req.user_id),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(CreatedCollaboration { collaboration_id })),
    ))
}

/// DELETE /collaborations
pub async fn remove_collaborator(
    State(app_state): State<AppState>,
    principal: Principal,
    payload: std::result::Result<Json<CollaborationRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>> {
    authenticated(principal.user_id())?;
    let Json(req) = payload?;

    app_state
        .playlists
        .remove_collaborator(
            principal.user_id(),
            &PlaylistId::new(req.playlist_id),
            &UserId::new(req.user_id),
        )
        .await?;

    Ok(Json(ApiResponse::message("Collaboration removed")))
}
