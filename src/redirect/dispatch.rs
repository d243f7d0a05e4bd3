use super::marker::{MarkerConfig, MarkerError};
use axum::{
    http::{
        HeaderValue, StatusCode,
        header::{CACHE_CONTROL, LOCATION, SET_COOKIE},
    },
    response::{IntoResponse, Response},
};
use time::OffsetDateTime;

/// Builds the response for a redirect decision: marker cookie and
/// `302 Found` in one response.
///
/// Either both headers are built or an error is returned and nothing is
/// emitted, so a client is never marked without being redirected.
pub fn redirect_response(
    marker: &MarkerConfig,
    url: &str,
    marker_expiry_seconds: u64,
    now: OffsetDateTime,
) -> Result<Response, MarkerError> {
    let location = HeaderValue::from_str(url)?;
    let cookie = marker.issue(marker_expiry_seconds, now)?;

    Ok((
        StatusCode::FOUND,
        [
            (LOCATION, location),
            (SET_COOKIE, cookie),
            (CACHE_CONTROL, HeaderValue::from_static("no-store")),
        ],
    )
        .into_response())
}
