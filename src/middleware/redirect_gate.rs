use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::{
    middleware::jwt_auth::is_authenticated,
    redirect::{
        Decision, RequestContext, decide,
        dispatch::redirect_response,
        scope::{is_under_prefix, matches_route},
    },
    routes::types::{AppState, SharedState},
};

/// Builds the decision inputs for one request.
pub fn request_context(state: &AppState, request: &Request) -> RequestContext {
    let path = request.uri().path();
    RequestContext {
        is_admin_context: is_under_prefix(path, &state.routes.admin_prefix),
        is_authenticated: is_authenticated(request.headers(), &state.jwt_key),
        is_homepage: matches_route(path, &state.routes.homepage_path),
        marker: state.marker.read(request.headers()),
    }
}

/// Redirects first-time visitors and lets everyone else through.
///
/// Store failures fail open: the page is served without a redirect or marker.
#[tracing::instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn redirect_gate(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
) -> Response {
    let ctx = request_context(&state, &request);

    let settings = match state.store.get().await {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Could not load redirect settings, serving page as is: {e}");
            return next.run(request).await;
        }
    };

    match decide(&ctx, &settings) {
        Decision::NoAction => {
            debug!(?ctx, "No redirect");
            next.run(request).await
        }
        Decision::Redirect {
            url,
            marker_expiry_seconds,
        } => match redirect_response(
            &state.marker,
            &url,
            marker_expiry_seconds,
            OffsetDateTime::now_utc(),
        ) {
            Ok(response) => {
                info!(%url, marker_expiry_seconds, "Redirecting first-time visitor");
                response
            }
            Err(e) => {
                warn!("Could not build redirect to {url:?}, serving page as is: {e}");
                next.run(request).await
            }
        },
    }
}
