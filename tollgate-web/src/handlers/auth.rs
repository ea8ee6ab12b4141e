//! Login, status, password change and logout

use super::hashing;
use super::types::{LoginRequest, PasswordRequest, StatusResponse};
use crate::extract::{CurrentUser, RequestToken};
use crate::{AppState, WebError, WebResult};
use axum::{extract::State, http::StatusCode, response::Json};
use tollgate_security::AuthenticationService;
use tracing::info;

/// `POST /auth`
pub async fn login(
    State(state): State<AppState>,
    RequestToken(context): RequestToken,
    Json(request): Json<LoginRequest>,
) -> WebResult<Json<StatusResponse>> {
    let authenticator = state.authentication.clone();
    let authentication = hashing(move || {
        authenticator.authenticate(&request.user, &request.password)
    })
    .await?
    .ok_or(WebError::AccessDenied)?;

    state.registry.login(&context, authentication.clone());
    info!("User {} logged in", authentication.user.email);

    Ok(Json(authentication.into()))
}

/// `GET /auth`, `null` when nobody is logged in
pub async fn status(
    State(state): State<AppState>,
    RequestToken(context): RequestToken,
) -> Json<Option<StatusResponse>> {
    Json(
        state
            .registry
            .current_authentication(&context)
            .map(StatusResponse::from),
    )
}

/// `PUT /auth`
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(authentication): CurrentUser,
    Json(request): Json<PasswordRequest>,
) -> WebResult<StatusCode> {
    if request.password.is_empty() {
        return Err(WebError::BadRequest("password must not be empty".to_string()));
    }

    let users = state.users.clone();
    hashing(move || users.update_user_password(&authentication.user.email, &request.password))
        .await??;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /auth`
pub async fn logout(
    State(state): State<AppState>,
    RequestToken(context): RequestToken,
) -> StatusCode {
    if state.registry.logout(&context) {
        info!("Logged out");
    }
    StatusCode::NO_CONTENT
}
