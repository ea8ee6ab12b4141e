//! Route definitions for the Tollgate web server

use crate::middleware::{require_role, RoleGuard};
use crate::{handlers, AppState};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tollgate_security::roles;

/// Session endpoints, open to everybody
pub fn auth_routes() -> Router<AppState> {
    Router::new().route(
        "/auth",
        post(handlers::login)
            .get(handlers::status)
            .put(handlers::change_password)
            .delete(handlers::logout),
    )
}

/// User management; reading needs `USER`, creating users and resetting
/// passwords needs `ADMIN`
pub fn user_routes(state: &AppState) -> Router<AppState> {
    let guard = |role: &'static str| {
        middleware::from_fn_with_state(RoleGuard::new(state.clone(), role), require_role)
    };

    Router::new()
        .route(
            "/users/{email}",
            get(handlers::get_user)
                .route_layer(guard(roles::USER))
                .merge(post(handlers::create_user).route_layer(guard(roles::ADMIN))),
        )
        .route(
            "/users/{email}/password",
            put(handlers::update_user_password).route_layer(guard(roles::ADMIN)),
        )
}

pub fn business_routes(state: &AppState) -> Router<AppState> {
    let guard = |role: &'static str| {
        middleware::from_fn_with_state(RoleGuard::new(state.clone(), role), require_role)
    };

    Router::new()
        .route(
            "/business/admin-endpoint",
            get(handlers::admin_endpoint).route_layer(guard(roles::ADMIN)),
        )
        .route(
            "/business/reviewer-endpoint",
            get(handlers::reviewer_endpoint).route_layer(guard(roles::REVIEWER)),
        )
        .route(
            "/business/user-endpoint",
            get(handlers::user_endpoint).route_layer(guard(roles::USER)),
        )
}

/// Operator maintenance, `ADMIN` only
pub fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new().route(
        "/admin/tokens/expired",
        delete(handlers::purge_expired_tokens).route_layer(middleware::from_fn_with_state(
            RoleGuard::new(state.clone(), roles::ADMIN),
            require_role,
        )),
    )
}

/// Create all routes combined
pub fn app_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(auth_routes())
        .merge(user_routes(state))
        .merge(business_routes(state))
        .merge(admin_routes(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tollgate_core::TollgateConfig;
    use tower::ServiceExt;

    fn state() -> AppState {
        let mut config = TollgateConfig::default();
        config.security.hash_iterations = 10;
        AppState::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_health_check_route() {
        let app = crate::create_app(state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_guarded_route_rejects_anonymous() {
        let app = crate::create_app(state());

        for uri in [
            "/business/admin-endpoint",
            "/business/reviewer-endpoint",
            "/business/user-endpoint",
            "/users/admin@tollgate.local",
        ] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
        }
    }
}
