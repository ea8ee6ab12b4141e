//! User management endpoints

use super::hashing;
use super::types::{CreateUserRequest, PasswordRequest};
use crate::{AppState, WebError, WebResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tollgate_security::DefaultUser;

/// `POST /users/{email}`
pub async fn create_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(request): Json<CreateUserRequest>,
) -> WebResult<(StatusCode, Json<DefaultUser>)> {
    if request.password.is_empty() {
        return Err(WebError::BadRequest("password must not be empty".to_string()));
    }

    let user = DefaultUser::new(request.name, request.surname, email);
    let users = state.users.clone();
    let created = user.clone();
    hashing(move || users.create_user(created, &request.password, &request.role)).await??;

    Ok((StatusCode::CREATED, Json(user)))
}

/// `PUT /users/{email}/password`
pub async fn update_user_password(
    State(state): State<AppState>,
    Path(email): Path<String>,
    Json(request): Json<PasswordRequest>,
) -> WebResult<StatusCode> {
    if request.password.is_empty() {
        return Err(WebError::BadRequest("password must not be empty".to_string()));
    }

    let users = state.users.clone();
    hashing(move || users.update_user_password(&email, &request.password)).await??;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /users/{email}`
pub async fn get_user(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> WebResult<Json<DefaultUser>> {
    state
        .users
        .find_user_by_email(&email)
        .map(Json)
        .ok_or_else(|| WebError::NotFound(format!("user {}", email)))
}
