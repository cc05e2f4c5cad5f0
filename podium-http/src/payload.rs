use serde_json::Value;
use uuid::Uuid;

use podium_core::PodiumError;
use podium_database::model::NewPlayer;

/// Parse a textual player id, rejecting malformed values before any store
/// call happens.
pub fn parse_player_id(raw: &str) -> Result<Uuid, PodiumError> {
    Uuid::parse_str(raw).map_err(|_| PodiumError::InvalidIdentifier(raw.to_owned()))
}

/// Validate a player-creation body: `name` and `email` are required,
/// `character` is optional free-form.
pub fn parse_new_player(body: &Value) -> Result<NewPlayer, PodiumError> {
    let name = required_string(body, "name")?;
    let email = required_string(body, "email")?;
    let character = body
        .get("character")
        .and_then(Value::as_str)
        .map(str::to_owned);

    Ok(NewPlayer {
        name,
        email,
        character,
    })
}

/// Validate an XP-adjustment body: `xp_to_add` is a required integer and
/// may be negative.
pub fn parse_xp_delta(body: &Value) -> Result<i64, PodiumError> {
    body.get("xp_to_add")
        .ok_or_else(|| PodiumError::InvalidInput("xp_to_add is required".into()))?
        .as_i64()
        .ok_or_else(|| PodiumError::InvalidInput("xp_to_add must be an integer".into()))
}

fn required_string(body: &Value, field: &str) -> Result<String, PodiumError> {
    body.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| PodiumError::InvalidInput(format!("{field} is required")))
}
