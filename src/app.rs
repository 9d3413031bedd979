use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/checkin/morning", post(handlers::checkin_morning_form))
        .route("/checkin/evening", post(handlers::checkin_evening_form))
        .route("/api/today", get(handlers::get_today))
        .route("/api/checkin", post(handlers::checkin))
        .route("/api/history", get(handlers::get_history))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/quote", get(handlers::get_quote))
        .route("/api/breathing", get(handlers::get_breathing))
        .route("/api/favorites", get(handlers::get_favorites))
        .route("/api/favorites/toggle", post(handlers::toggle_favorite_quote))
        .route("/api/favorites/:id", delete(handlers::delete_favorite))
        .route("/api/playlists", get(handlers::get_playlists).post(handlers::create_playlist_from_ids))
        .route("/api/playlists/:id", delete(handlers::remove_playlist))
        .route("/api/playlists/:id/play", get(handlers::play_playlist))
        .with_state(state)
}
