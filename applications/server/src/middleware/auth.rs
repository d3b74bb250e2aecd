/// Authentication middleware
use crate::{error::ServerError, services::AuthService};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use openmusic_core::UserId;
use std::convert::Infallible;
use std::sync::Arc;

/// Principal resolved from the request, absent for anonymous requests.
/// Can be used as an extractor in handlers.
#[derive(Debug, Clone, Default)]
pub struct Principal(pub Option<UserId>);

impl Principal {
    pub fn user_id(&self) -> Option<&UserId> {
        self.0.as_ref()
    }
}

/// Middleware that validates a Bearer token when one is presented.
///
/// No header leaves the request anonymous; a malformed or invalid token is
/// rejected outright.
pub async fn auth_middleware(
    State(auth_service): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(auth_header) = request.headers().get(axum::http::header::AUTHORIZATION) else {
        return Ok(next.run(request).await);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| ServerError::Auth("Malformed Authorization header".to_string()))?;

    let user_id = auth_service.verify_access_token(token).map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        e
    })?;

    request.extensions_mut().insert(Principal(Some(user_id)));

    Ok(next.run(request).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Principal>()
            .cloned()
            .unwrap_or_default())
    }
}
