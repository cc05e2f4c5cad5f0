pub mod auth;
pub mod error;
pub mod health;
pub mod payload;
pub mod players;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use podium_core::AppState;

/// Build the full application router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/players", post(players::create).get(players::list))
        .route(
            "/players/{id}",
            get(players::get_by_id).delete(players::delete),
        )
        .route("/players/{id}/xp", put(players::adjust_xp))
        .route("/health", get(health::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
