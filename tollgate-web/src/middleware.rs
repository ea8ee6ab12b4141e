//! Request boundary and role guard middleware

use crate::session::SessionCookie;
use crate::{AppState, WebError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tollgate_security::{
    AuthorizationStrategy, Permission, Reconciliation, RolePermissionsRepository, TokenContext,
    TokenScope,
};
use tracing::{debug, warn};

/// Binds the session token for the request and writes changes back.
///
/// The [`TokenContext`] is inserted into the request extensions as an
/// `Arc<TokenContext>`; handlers reach it through
/// [`RequestToken`](crate::extract::RequestToken).
pub async fn token_boundary(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_name = state.session_cookie().to_string();
    let session_id = session_id_from_headers(request.headers(), &cookie_name);
    let mut session = state.sessions.load(session_id.as_deref());

    let context = Arc::new(TokenContext::new());
    let mut response = {
        let scope = TokenScope::begin(&context, &mut session);
        request.extensions_mut().insert(context.clone());

        let response = next.run(request).await;
        if scope.finish() != Reconciliation::Unchanged {
            debug!("Session token changed during request");
        }
        response
    };

    let set_cookie = match state.sessions.save(session) {
        SessionCookie::Keep => None,
        SessionCookie::Set(id) => Some(format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            cookie_name, id
        )),
        SessionCookie::Expire => Some(format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            cookie_name
        )),
    };

    if let Some(cookie) = set_cookie {
        match HeaderValue::from_str(&cookie) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(e) => warn!("Could not encode session cookie: {}", e),
        }
    }

    response
}

/// Extract a cookie value from the `Cookie` headers
pub fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|cookie| {
            let (name, value) = cookie.trim().split_once('=')?;
            (name == cookie_name && !value.is_empty()).then(|| value.to_string())
        })
        .next()
}

/// Route layer state requiring the named role
#[derive(Clone)]
pub struct RoleGuard {
    state: AppState,
    role: &'static str,
}

impl RoleGuard {
    pub fn new(state: AppState, role: &'static str) -> Self {
        Self { state, role }
    }
}

/// Rejects the request with 403 unless the current authentication holds the
/// guard's role or a more privileged one
pub async fn require_role(
    State(guard): State<RoleGuard>,
    request: Request,
    next: Next,
) -> Result<Response, WebError> {
    let required = guard.state.roles.find_by_name(guard.role)?;
    let authentication = request
        .extensions()
        .get::<Arc<TokenContext>>()
        .and_then(|context| guard.state.registry.current_authentication(context));

    let authorized = guard
        .state
        .authorization
        .authorize_current(&Permission::Role(required), authentication.as_ref());
    if !authorized {
        debug!("Access to {} denied, {} required", request.uri(), guard.role);
        return Err(WebError::AccessDenied);
    }

    Ok(next.run(request).await)
}
