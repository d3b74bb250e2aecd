/// Playlist export API routes
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
use openmusic_core::{access::authenticated, types::PlaylistId};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub target_email: String,
}

/// POST /export/playlists/:id
/// Queues the export; delivery happens in the consumer process
pub async fn export_playlist(
    State(app_state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    payload: std::result::Result<Json<ExportRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<()>>)> {
    // A missing principal outranks a malformed body
    authenticated(principal.user_id())?;
    let Json(req) = payload?;

    if !is_plausible_email(&req.target_email) {
        return Err(ServerError::BadRequest(
            "targetEmail must be a valid email address".to_string(),
        ));
    }

    app_state
        .playlists
        .request_export(principal.user_id(), &PlaylistId::new(id), &req.target_email)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("Your request is being processed")),
    ))
}

fn is_plausible_email(address: &str) -> bool {
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !address.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_plausible_email("x@example.com"));
        assert!(!is_plausible_email("example.com"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("x@localhost"));
        assert!(!is_plausible_email("x@@example.com"));
        assert!(!is_plausible_email("x y@example.com"));
    }
}
