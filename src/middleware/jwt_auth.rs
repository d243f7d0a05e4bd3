use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    ops::Deref,
};

use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use jwt_simple::{
    algorithms::{HS256Key, MACLike},
    claims::{JWTClaims, NoCustomClaims},
};

use crate::{
    redirect::marker::read_cookie,
    routes::{errors::ApiError, types::{JWT_COOKIE, SharedState}},
};

/// Guards administrative routes. The verified claims are stored in the
/// request extensions.
pub async fn verify_jwt(
    State(state): State<SharedState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError<JwtAuthError>> {
    let token = session_token(request.headers()).ok_or_else(|| {
        ApiError::with_status(JwtAuthError::MissingToken, StatusCode::UNAUTHORIZED)
    })?;

    let decoded_token = verify(&state.jwt_key, token)?;
    request.extensions_mut().insert(decoded_token);
    Ok(next.run(request).await)
}

/// Whether the request carries a session token that verifies under `key`.
pub fn is_authenticated(headers: &HeaderMap, key: &HS256Key) -> bool {
    session_token(headers).is_some_and(|token| verify(key, token).is_ok())
}

fn verify(key: &HS256Key, token: &str) -> Result<JWTClaims<NoCustomClaims>, ApiError<JwtAuthError>> {
    Ok(key.verify_token::<NoCustomClaims>(token, None)?)
}

/// Bearer token from `Authorization`, otherwise the session cookie.
///
/// Any other `Authorization` scheme (e.g. Basic auth added by a proxy in
/// front of the site) is ignored rather than hiding the cookie.
fn session_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .or_else(|| read_cookie(headers, JWT_COOKIE).filter(|token| !token.is_empty()))
}

#[derive(Debug)]
pub enum JwtAuthError {
    MissingToken,
    InvalidJwt(jwt_simple::Error),
}

impl Display for JwtAuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            JwtAuthError::MissingToken => write!(f, "Missing session: log in first"),
            JwtAuthError::InvalidJwt(_) => write!(f, "Jwt is expired or invalid"),
        }
    }
}

impl Error for JwtAuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            JwtAuthError::MissingToken => None,
            JwtAuthError::InvalidJwt(e) => Some(e.deref()),
        }
    }
}

impl From<jwt_simple::Error> for ApiError<JwtAuthError> {
    fn from(value: jwt_simple::Error) -> Self {
        ApiError::with_status(JwtAuthError::InvalidJwt(value), StatusCode::UNAUTHORIZED)
    }
}
