/// HTTP routing
use crate::{api, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the API router. Every route sees the principal middleware; handlers
/// decide whether a principal is required.
pub fn create_router(app_state: AppState) -> Router {
    let auth_service = Arc::clone(&app_state.auth_service);

    Router::new()
        .route("/health", get(api::health::health))
        // Playlists
        .route(
            "/playlists",
            get(api::playlists::list_playlists).post(api::playlists::create_playlist),
        )
        .route(
            "/playlists/:id",
            axum::routing::delete(api::playlists::delete_playlist),
        )
        .route(
            "/playlists/:id/songs",
            get(api::playlists::get_songs)
                .post(api::playlists::add_song)
                .delete(api::playlists::remove_song),
        )
        .route(
            "/playlists/:id/activities",
            get(api::playlists::get_activities),
        )
        // Collaborations, also reachable under /playlists
        .route(
            "/collaborations",
            post(api::collaborations::add_collaborator)
                .delete(api::collaborations::remove_collaborator),
        )
        .route(
            "/playlists/collaborations",
            post(api::collaborations::add_collaborator)
                .delete(api::collaborations::remove_collaborator),
        )
        // Album likes
        .route(
            "/albums/:id/likes",
            get(api::albums::get_likes)
                .post(api::albums::like_album)
                .delete(api::albums::unlike_album),
        )
        // Exports
        .route(
            "/export/playlists/:id",
            post(api::exports::export_playlist),
        )
        .layer(axum_middleware::from_fn_with_state(
            auth_service,
            middleware::auth_middleware,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
