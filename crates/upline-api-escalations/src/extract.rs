//! Request-context extractors.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// Actor identity recorded in the activity log.
///
/// Resolved from the `x-actor-id` header, where the portal's session layer
/// injects the authenticated caller. Unattributed callers fall back to
/// `system`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorId(pub String);

/// Fallback actor when no identity header is present.
pub const SYSTEM_ACTOR: &str = "system";

#[async_trait]
impl<S> FromRequestParts<S> for ActorId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let actor = parts
            .headers
            .get("x-actor-id")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(SYSTEM_ACTOR)
            .to_string();

        Ok(ActorId(actor))
    }
}
