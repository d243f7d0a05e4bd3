pub mod admin;
pub mod errors;
pub mod login;
pub mod pages;
pub mod types;

use crate::middleware::{jwt_auth::verify_jwt, redirect_gate::redirect_gate};
use admin::{get_settings, update_settings};
use axum::{
    Router,
    http::header,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use login::admin_login;
use pages::{health, homepage, page};
use tower_http::cors::{Any, CorsLayer};
use types::SharedState;

/// Builds the application router.
///
/// Every page and the administrative surface sit behind the redirect gate;
/// the health check does not.
pub fn router(state: SharedState) -> Router {
    let admin = Router::new()
        .route(
            "/settings",
            get(get_settings)
                .put(update_settings)
                .route_layer(from_fn_with_state(state.clone(), verify_jwt)),
        )
        .route("/login", post(admin_login));

    let gated = Router::new()
        .route("/", get(homepage))
        .nest(state.routes.admin_prefix.trim_end_matches('/'), admin)
        .fallback(page)
        .layer(from_fn_with_state(state.clone(), redirect_gate));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods(Any);

    Router::new()
        .route("/health", get(health))
        .merge(gated)
        .layer(cors)
        .with_state(state)
}
