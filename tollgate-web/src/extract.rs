//! Request extractors for the bound token and the current authentication

use crate::{AppState, WebError};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::sync::Arc;
use tollgate_security::{Authentication, DefaultUser, Permission, TokenContext};
use tracing::error;

/// The request's [`TokenContext`], installed by the token boundary middleware
#[derive(Debug, Clone)]
pub struct RequestToken(pub Arc<TokenContext>);

impl<S> FromRequestParts<S> for RequestToken
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<Arc<TokenContext>>() {
            Some(context) => Ok(Self(context.clone())),
            None => {
                error!("Token boundary middleware is not installed");
                Err(WebError::Internal("missing token context".to_string()))
            }
        }
    }
}

/// Authentication of the caller; rejects with 403 when there is none
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Authentication<DefaultUser, Permission>);

impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequestToken(context) = RequestToken::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);

        app_state
            .registry
            .require_authentication(&context)
            .map(Self)
            .map_err(WebError::from)
    }
}
