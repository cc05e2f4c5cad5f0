use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use podium_core::AppState;
use podium_database::model::Player;

use crate::{
    auth::Identity,
    error::ApiError,
    payload::{parse_new_player, parse_player_id, parse_xp_delta},
};

/// POST /players — create a player and return it with its freshly
/// assigned rank.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Player>), ApiError> {
    let new = parse_new_player(&body)?;
    let player = state.store.create_player(new).await?;

    Ok((StatusCode::CREATED, Json(player)))
}

/// GET /players — the leaderboard, ordered by XP descending.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Player>>, ApiError> {
    let players = state.store.leaderboard().await?;

    Ok(Json(players))
}

/// GET /players/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Player>, ApiError> {
    let id = parse_player_id(&id)?;
    let player = state.store.player_by_id(id).await?;

    Ok(Json(player))
}

/// PUT /players/{id}/xp — apply an XP delta on behalf of the
/// authenticated caller.
pub async fn adjust_xp(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Identity(actor): Identity,
    Json(body): Json<Value>,
) -> Result<Json<Player>, ApiError> {
    let id = parse_player_id(&id)?;
    let delta = parse_xp_delta(&body)?;
    let player = state.store.adjust_xp(id, delta, &actor).await?;

    Ok(Json(player))
}

/// DELETE /players/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_player_id(&id)?;
    state.store.delete_player(id).await?;

    Ok(Json(json!({ "message": "Player deleted successfully" })))
}
