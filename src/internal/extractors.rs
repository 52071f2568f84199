use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::warn;

use crate::{error::ApiError, state::AppState};

pub const INTERNAL_API_KEY_HEADER: &str = "x-internal-api-key";

/// Gate for service-to-service routes. Compares the `X-Internal-API-Key`
/// header against the configured secret before the handler body runs, so no
/// repository access happens on unauthenticated requests. A missing key and a
/// wrong key are indistinguishable to the caller.
pub struct InternalAuth;

#[async_trait]
impl FromRequestParts<AppState> for InternalAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(INTERNAL_API_KEY_HEADER)
            .and_then(|h| h.to_str().ok());

        match key {
            Some(k) if k == state.config.internal_api_key => Ok(InternalAuth),
            _ => {
                warn!(path = %parts.uri.path(), "internal route rejected");
                Err(ApiError::Unauthorized)
            }
        }
    }
}
