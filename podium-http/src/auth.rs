use axum::{extract::FromRequestParts, http::request::Parts};

use podium_core::PodiumError;
use podium_database::model::CallerIdentity;

use crate::error::ApiError;

pub const IDENTITY_HEADER: &str = "x-user-id";

/// Extracts the caller identity supplied by the identity provider.
///
/// The value is trusted verbatim; verifying it happened upstream. XP
/// mutations require it so every score change carries an attributed actor.
#[derive(Debug, Clone)]
pub struct Identity(pub CallerIdentity);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(IDENTITY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        match user_id {
            Some(user_id) => Ok(Self(CallerIdentity(user_id.to_owned()))),
            None => Err(ApiError(PodiumError::InvalidInput(format!(
                "{IDENTITY_HEADER} header is required"
            )))),
        }
    }
}
