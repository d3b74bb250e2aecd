/// Album like API routes
use super::ApiResponse;
use crate::{error::Result, middleware::Principal, state::AppState};
use axum::{
    extract::{Path, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use openmusic_core::{access::authenticated, cache::AggregateCache, types::AlbumId};
use serde::Serialize;

/// Marks responses served from the like-count cache
pub const DATA_SOURCE_HEADER: &str = "x-data-source";

#[derive(Debug, Serialize)]
pub struct LikeCount {
    pub likes: u64,
}

/// POST /albums/:id/likes
pub async fn like_album(
    State(app_state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<()>>)> {
    let user = authenticated(principal.user_id())?;
    app_state.likes.like(user, &AlbumId::new(id)).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("Album liked")),
    ))
}

/// DELETE /albums/:id/likes
pub async fn unlike_album(
    State(app_state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>> {
    let user = authenticated(principal.user_id())?;
    app_state.likes.unlike(user, &AlbumId::new(id)).await?;

    Ok(Json(ApiResponse::message("Album unliked")))
}

/// GET /albums/:id/likes
/// Public; answers from cache when possible
pub async fn get_likes(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let count = app_state.likes.get_count(&AlbumId::new(id)).await?;

    let mut response = Json(ApiResponse::data(LikeCount { likes: count.value })).into_response();
    if count.served_from_cache {
        response.headers_mut().insert(
            HeaderName::from_static(DATA_SOURCE_HEADER),
            HeaderValue::from_static("cache"),
        );
    }

    Ok(response)
}
