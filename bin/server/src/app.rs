//! Router assembly.

use axum::{
    Router,
    routing::{get, patch, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::routes::{admin, league, players, seasons, staff};
use crate::state::AppState;

/// Builds the HTTP router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/league", get(league::summary))
        .route("/players", get(players::list))
        .route("/players/{id}", get(players::get).put(players::update))
        .route("/players/{id}/discord", patch(players::link_discord))
        .route("/seasons", get(seasons::list).post(seasons::create))
        .route("/seasons/current", get(seasons::current))
        .route(
            "/seasons/{id}",
            patch(seasons::update).delete(seasons::delete),
        )
        .route(
            "/staff",
            get(staff::list).post(staff::create).delete(staff::delete),
        )
        .route("/admin/login", post(admin::login))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
